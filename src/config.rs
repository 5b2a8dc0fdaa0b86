//! Configuration types shared between the CLI and the registry client

use serde::{Deserialize, Serialize};

/// Registry credentials for one invocation. Anonymous unless both fields are
/// present and non-empty; never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AuthConfig {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn has_auth(&self) -> bool {
        self.credentials().is_some()
    }

    /// Username/password pair, or `None` when either half is missing or empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }
}
