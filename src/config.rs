//! Configuration System
//!
//! Layered configuration for normalization rules, directory walking and
//! logging. Loaded once per session and treated as read-only afterwards.
//!
//! ```toml
//! [[normalization.properties]]
//! pattern = "**/*.properties"
//!
//! [[normalization.properties]]
//! pattern = "META-INF/build-info.properties"
//! ignore = ["build.time", "created-by"]
//! ```

use crate::error::ApiError;
use crate::hasher::PropertiesAwareHasher;
use crate::logging::LoggingConfig;
use crate::normalize::{FilterRule, PatternFilterRegistry};
use crate::resource::WalkerConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProphashConfig {
    /// Content normalization rules
    #[serde(default)]
    pub normalization: NormalizationConfig,

    /// Directory walking options
    #[serde(default)]
    pub walker: WalkerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Normalization rules by resource kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// `.properties` filter rules; a resource matching none is hashed raw
    #[serde(default)]
    pub properties: Vec<FilterRule>,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Pattern(String, String),
    IgnoredKey(String, String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Pattern(pattern, msg) => {
                write!(f, "Pattern '{}': {}", pattern, msg)
            }
            ValidationError::IgnoredKey(pattern, msg) => {
                write!(f, "Ignored key for '{}': {}", pattern, msg)
            }
            ValidationError::Logging(msg) => {
                write!(f, "Logging: {}", msg)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ProphashConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for rule in &self.normalization.properties {
            if rule.pattern.trim().is_empty() {
                errors.push(ValidationError::Pattern(
                    rule.pattern.clone(),
                    "pattern cannot be empty".to_string(),
                ));
            } else if let Err(e) = PatternFilterRegistry::new([rule.clone()]) {
                errors.push(ValidationError::Pattern(rule.pattern.clone(), e.to_string()));
            }

            if rule.filter.ignored_keys().any(str::is_empty) {
                errors.push(ValidationError::IgnoredKey(
                    rule.pattern.clone(),
                    "ignored key cannot be empty".to_string(),
                ));
            }
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Compile the normalization rules into a hasher.
    pub fn build_hasher(&self) -> Result<PropertiesAwareHasher, ApiError> {
        PropertiesAwareHasher::from_rules(self.normalization.properties.iter().cloned())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render configuration: {}", e)))
    }
}
