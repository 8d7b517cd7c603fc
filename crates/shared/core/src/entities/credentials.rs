use std::fmt;

/// User id and password presented to the queue manager
///
/// Both tokens are opaque. The password never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_id: String,
    password: String,
}

impl Credentials {
    /// Returns `None` if either token is empty
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Option<Self> {
        let user_id = user_id.into();
        let password = password.into();
        if user_id.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self { user_id, password })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"***")
            .finish()
    }
}
