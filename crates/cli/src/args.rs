//! Command-line arguments
//!
//! Flags override values from the configuration file.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{0} requires a value")]
    MissingValue(String),
    #[error("{flag} expects a number, got `{value}`")]
    InvalidNumber { flag: String, value: String },
    #[error("Unknown argument: {0}")]
    Unknown(String),
}

/// Parsed command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub help: bool,
    pub config_path: Option<PathBuf>,
    pub queue_manager: Option<String>,
    pub queue: Option<String>,
    pub credentials: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub poll_interval_ms: Option<u64>,
    pub max_attempts: Option<u64>,
}

impl CliArgs {
    /// Parse arguments, program name excluded
    pub fn parse<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut parsed = CliArgs::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--help" | "-h" => {
                    parsed.help = true;
                    return Ok(parsed);
                }
                "--config" | "-c" => parsed.config_path = Some(value(&args, &mut i)?.into()),
                "--queue-manager" | "-m" => parsed.queue_manager = Some(value(&args, &mut i)?),
                "--queue" | "-q" => parsed.queue = Some(value(&args, &mut i)?),
                "--credentials" => parsed.credentials = Some(value(&args, &mut i)?.into()),
                "--data" | "-d" => parsed.data = Some(value(&args, &mut i)?.into()),
                "--poll-interval-ms" => {
                    parsed.poll_interval_ms = Some(number(flag, value(&args, &mut i)?)?)
                }
                "--max-attempts" => {
                    parsed.max_attempts = Some(number(flag, value(&args, &mut i)?)?)
                }
                arg => return Err(ArgsError::Unknown(arg.to_string())),
            }
            i += 1;
        }

        Ok(parsed)
    }

    /// Apply flag overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        let producer = &mut config.producer;
        if let Some(queue_manager) = &self.queue_manager {
            producer.queue_manager = queue_manager.clone();
        }
        if let Some(queue) = &self.queue {
            producer.destination = queue.clone();
        }
        if let Some(credentials) = &self.credentials {
            producer.credentials_path = credentials.clone();
        }
        if let Some(data) = &self.data {
            producer.data_path = data.clone();
        }
        if let Some(interval) = self.poll_interval_ms {
            producer.retry.poll_interval_ms = interval;
        }
        if let Some(max_attempts) = self.max_attempts {
            producer.retry.max_attempts = Some(max_attempts);
        }
    }
}

fn value(args: &[String], i: &mut usize) -> Result<String, ArgsError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| ArgsError::MissingValue(flag.clone()))
}

fn number(flag: &str, value: String) -> Result<u64, ArgsError> {
    value.parse().map_err(|_| ArgsError::InvalidNumber {
        flag: flag.to_string(),
        value,
    })
}

pub fn print_help() {
    eprintln!(
        r#"courier-put - forward a line-delimited data file to a queue

USAGE:
    courier-put [OPTIONS]

OPTIONS:
    -c, --config <PATH>          Load configuration from JSON file
    -m, --queue-manager <NAME>   Queue manager to connect to
    -q, --queue <NAME>           Destination queue
        --credentials <PATH>     File holding `<user-id> <password>`
    -d, --data <PATH>            Line-delimited data file
        --poll-interval-ms <MS>  Pause between retries while the queue is full
        --max-attempts <N>       Give up on a record after N retries
    -h, --help                   Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                     Log level filter (default: courier=info)

EXIT STATUS:
    0 when the data file was read to the end, dropped records included.
    The broker reason code when connect or open fails.
    1 for local failures (configuration, credentials, data file).

EXAMPLES:
    # Run with the embedded defaults
    courier-put

    # Run with config file and a different data file
    courier-put --config courier.json --data readings.csv
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        assert_eq!(CliArgs::parse(Vec::<String>::new()).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_all_flags() {
        let args = CliArgs::parse([
            "--config",
            "c.json",
            "-m",
            "QM9",
            "--queue",
            "SENSORS.IN",
            "--credentials",
            "users",
            "--data",
            "in.txt",
            "--poll-interval-ms",
            "50",
            "--max-attempts",
            "7",
        ])
        .unwrap();

        assert_eq!(args.config_path, Some(PathBuf::from("c.json")));
        assert_eq!(args.queue_manager.as_deref(), Some("QM9"));
        assert_eq!(args.queue.as_deref(), Some("SENSORS.IN"));
        assert_eq!(args.credentials, Some(PathBuf::from("users")));
        assert_eq!(args.data, Some(PathBuf::from("in.txt")));
        assert_eq!(args.poll_interval_ms, Some(50));
        assert_eq!(args.max_attempts, Some(7));
        assert!(!args.help);
    }

    #[test]
    fn test_help_short_circuits() {
        let args = CliArgs::parse(["--help", "--bogus"]).unwrap();
        assert!(args.help);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            CliArgs::parse(["--queue"]).unwrap_err(),
            ArgsError::MissingValue("--queue".to_string())
        );
        assert_eq!(
            CliArgs::parse(["--max-attempts", "many"]).unwrap_err(),
            ArgsError::InvalidNumber {
                flag: "--max-attempts".to_string(),
                value: "many".to_string()
            }
        );
        assert_eq!(
            CliArgs::parse(["--verbose"]).unwrap_err(),
            ArgsError::Unknown("--verbose".to_string())
        );
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse(["-q", "OTHER.Q", "--max-attempts", "3"]).unwrap();
        args.apply(&mut config);

        assert_eq!(config.producer.destination, "OTHER.Q");
        assert_eq!(config.producer.queue_manager, "QM_S1558");
        assert_eq!(config.producer.retry.max_attempts, Some(3));
    }
}
