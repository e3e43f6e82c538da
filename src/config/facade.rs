//! Config loader: assembles layered sources into a validated [`ProphashConfig`].

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file};
use crate::config::ProphashConfig;
use crate::error::ApiError;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::Path;
use tracing::debug;

/// Loads configuration from files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{PROPHASH_ENV}.toml`,
    /// `PROPHASH_*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<ProphashConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = add_workspace_files(builder, workspace_root);
        let builder = environment::add_to_builder(builder);

        let config: ProphashConfig = builder.build()?.try_deserialize()?;
        Self::finish(config)
    }

    /// Load configuration from a single file, ignoring other file sources.
    /// Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<ProphashConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);

        let config: ProphashConfig = builder.build()?.try_deserialize()?;
        Self::finish(config)
    }

    fn finish(config: ProphashConfig) -> Result<ProphashConfig, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        debug!(
            rules = config.normalization.properties.len(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Layer `config/config.toml`, then `config/{PROPHASH_ENV}.toml`, from the
/// workspace. Missing files are skipped.
fn add_workspace_files(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> ConfigBuilder<DefaultState> {
    let env_name = std::env::var("PROPHASH_ENV").unwrap_or_else(|_| "development".to_string());
    let config_dir = workspace_root.join("config");

    for name in ["config".to_string(), env_name] {
        let path = config_dir.join(format!("{}.toml", name));
        if path.is_file() {
            debug!(config_path = %path.display(), "Adding workspace configuration");
            builder = builder.add_source(File::from(path).required(true));
        }
    }
    builder
}
