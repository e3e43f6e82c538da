//! CLI route: run context and command dispatch.

use crate::cli::output::{format_fingerprints_json, format_fingerprints_text};
use crate::cli::parse::{Commands, OutputFormat};
use crate::config::{ConfigLoader, ProphashConfig};
use crate::error::ApiError;
use crate::hasher::{
    combine_fingerprints, configuration_fingerprint, hash_archive, hash_directory,
    PropertiesAwareHasher,
};
use crate::types::hash_to_hex;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Runtime context for CLI execution: loaded configuration and the hasher
/// built from it.
pub struct RunContext {
    config: ProphashConfig,
    hasher: PropertiesAwareHasher,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Self::from_config(config)
    }

    pub fn from_config(config: ProphashConfig) -> Result<Self, ApiError> {
        let hasher = config.build_hasher()?;
        Ok(Self { config, hasher })
    }

    pub fn config(&self) -> &ProphashConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Hash {
                path,
                format,
                summary,
            } => self.handle_hash(path, *format, *summary),
            Commands::Fingerprint => Ok(hash_to_hex(&configuration_fingerprint(&self.hasher))),
            Commands::Config => self.config.to_toml(),
        }
    }

    fn handle_hash(&self, path: &Path, format: OutputFormat, summary: bool) -> Result<String, ApiError> {
        let started = Instant::now();
        let fingerprints = if path.is_dir() {
            hash_directory(path, &self.config.walker, &self.hasher)?
        } else {
            hash_archive(path, &self.hasher)?
        };
        info!(
            path = %path.display(),
            entries = fingerprints.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Hash command finished"
        );

        if summary {
            return Ok(hash_to_hex(&combine_fingerprints(&fingerprints)));
        }
        match format {
            OutputFormat::Text => Ok(format_fingerprints_text(&fingerprints)),
            OutputFormat::Json => format_fingerprints_json(&fingerprints),
        }
    }
}
