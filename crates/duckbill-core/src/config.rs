//! Engine configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_session_timeout_secs() -> u64 {
    30 * 60
}

/// Tunable settings for the conversation engine.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct EngineConfig {
    /// Seconds a session may live before the sweep evicts it, measured from
    /// session creation (not last activity).
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            session_timeout_secs: default_session_timeout_secs(),
        }
    }
}

impl EngineConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the TOML is malformed.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The session timeout as a [`Duration`].
    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout_is_thirty_minutes() {
        let config = EngineConfig::default();
        assert_eq!(config.session_timeout(), Duration::from_secs(1800));
    }

    #[test]
    fn test_from_toml_str() {
        let config = EngineConfig::from_toml_str("session_timeout_secs = 60").unwrap();
        assert_eq!(config.session_timeout_secs, 60);

        let empty = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(empty.session_timeout_secs, 1800);

        assert!(EngineConfig::from_toml_str("session_timeout_secs = []").is_err());
    }
}
