//! Directory walker producing filesystem snapshot entries

use crate::error::HashError;
use crate::resource::entry::{FileSnapshotEntry, ResourceEntry};
use crate::resource::path;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Walker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    #[serde(default)]
    pub follow_symlinks: bool,
    /// File or directory names to skip entirely (default: [".git"])
    #[serde(default = "default_ignore_names")]
    pub ignore_names: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

fn default_ignore_names() -> Vec<String> {
    vec![".git".to_string()]
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_names: default_ignore_names(),
            max_depth: None,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Snapshot every regular file under the root.
    ///
    /// Returns entries sorted by relative path for determinism.
    pub fn walk(&self) -> Result<Vec<FileSnapshotEntry>, HashError> {
        let root = path::canonicalize_root(&self.root)?;
        let mut files = Vec::new();

        let walker = WalkDir::new(&root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(entry));

        for entry in walker {
            let entry = entry.map_err(|e| HashError::Walk(e.to_string()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
            // Directories carry no content; symlinks are skipped unless followed
        }

        debug!(root = %root.display(), files = files.len(), "Snapshotting directory");

        let mut entries = files
            .par_iter()
            .map(|file| FileSnapshotEntry::snapshot(&root, file))
            .collect::<Result<Vec<_>, _>>()?;

        entries.sort_by(|a, b| a.relative_path_segments().cmp(b.relative_path_segments()));
        Ok(entries)
    }

    /// Check if an entry is named in the ignore list (the root never is)
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_names
            .iter()
            .any(|ignored| ignored.as_str() == name)
    }
}
