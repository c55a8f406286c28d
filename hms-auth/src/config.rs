//! Runtime configuration
//!
//! Controls where the identity data lives in the substrate and whether the
//! demo admin bypass is honored.

use hms_core::{ErrorContext, HmsError, HmsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Identity manager configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// Storage key holding the user collection
    pub users_key: String,
    /// Storage key holding the active session
    pub session_key: String,
    /// Whether the fixed admin/admin123 login path is enabled
    pub demo_admin_bypass: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users_key: "hms_users".to_string(),
            session_key: "hms_session".to_string(),
            demo_admin_bypass: true,
        }
    }
}

impl AuthConfig {
    /// Demo configuration: the admin bypass login is enabled
    pub fn demo() -> Self {
        Self::default()
    }

    /// Strict configuration: every login goes through credential checks
    pub fn strict() -> Self {
        Self {
            demo_admin_bypass: false,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> HmsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HmsError::Config {
            message: format!("Cannot read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("auth_config")
                .with_operation("load")
                .with_suggestion("Verify the config file path and its permissions"),
        })?;

        let config: AuthConfig = toml::from_str(&content).map_err(|e| HmsError::Config {
            message: format!("Config file is not valid TOML: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("auth_config")
                .with_operation("parse")
                .with_suggestion("Fix the reported line in the config file"),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> HmsResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| HmsError::Config {
            message: format!("Cannot serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("auth_config").with_operation("serialize"),
        })?;

        std::fs::write(path, content).map_err(|e| HmsError::Config {
            message: format!("Cannot write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("auth_config")
                .with_operation("store")
                .with_suggestion("Verify the target directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> HmsResult<()> {
        if self.users_key.is_empty() || self.session_key.is_empty() {
            return Err(HmsError::Config {
                message: "Storage keys must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("auth_config")
                    .with_operation("validate")
                    .with_suggestion("Set users_key and session_key to non-empty values"),
            });
        }

        if self.users_key == self.session_key {
            return Err(HmsError::Config {
                message: "users_key and session_key must differ".to_string(),
                source: None,
                context: ErrorContext::new("auth_config")
                    .with_operation("validate")
                    .with_suggestion(
                        "Give the user collection and the session distinct storage keys",
                    ),
            });
        }

        Ok(())
    }
}
