//! Credential file loading
//!
//! The file holds two whitespace-separated tokens: user id, then password.
//! Anything after the second token is ignored.

use courier_core::Credentials;
use std::path::Path;

use crate::error::ProducerError;

/// Read credentials from `path`
pub fn load(path: &Path) -> Result<Credentials, ProducerError> {
    let content =
        std::fs::read_to_string(path).map_err(|source| ProducerError::CredentialsUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

    parse(&content).ok_or_else(|| ProducerError::CredentialsMalformed {
        path: path.to_path_buf(),
    })
}

/// Parse `<user-id> <password>` from text
pub fn parse(content: &str) -> Option<Credentials> {
    let mut tokens = content.split_whitespace();
    let user_id = tokens.next()?;
    let password = tokens.next()?;
    Credentials::new(user_id, password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_two_tokens() {
        let creds = parse("app passw0rd\n").unwrap();
        assert_eq!(creds.user_id(), "app");
        assert_eq!(creds.password(), "passw0rd");
    }

    #[test]
    fn test_parse_any_whitespace() {
        let creds = parse("  app\n\tpassw0rd  trailing").unwrap();
        assert_eq!(creds.user_id(), "app");
        assert_eq!(creds.password(), "passw0rd");
    }

    #[test]
    fn test_parse_short_input() {
        assert!(parse("").is_none());
        assert!(parse("app").is_none());
        assert!(parse("   \n").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "app secret").unwrap();

        let creds = load(file.path()).unwrap();
        assert_eq!(creds.user_id(), "app");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, ProducerError::CredentialsUnavailable { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "only-one-token").unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ProducerError::CredentialsMalformed { .. }));
    }
}
