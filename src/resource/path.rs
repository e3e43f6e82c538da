//! Relative path handling for resource entries

use crate::error::HashError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a root directory (resolves symlinks, `..`, `.`).
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, HashError> {
    dunce::canonicalize(path).map_err(|e| HashError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Normalize one path segment to NFC so macOS (NFD) and other platforms agree.
pub fn normalize_segment(segment: &str) -> String {
    segment.nfc().collect()
}

/// Split an archive entry name into normalized segments.
///
/// Archive names always use `/`; empty segments (leading, trailing or doubled
/// slashes) are dropped, so `dir/` and `dir` give the same segments.
pub fn segments_from_entry_name(name: &str) -> Vec<String> {
    name.split('/')
        .filter(|segment| !segment.is_empty())
        .map(normalize_segment)
        .collect()
}

/// Segments of `path` relative to `root`. Both must be absolute and `path`
/// must lie under `root`.
pub fn relative_segments(root: &Path, path: &Path) -> Result<Vec<String>, HashError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        HashError::InvalidPath(format!(
            "{} is not under {}",
            path.display(),
            root.display()
        ))
    })?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                segments.push(normalize_segment(&name.to_string_lossy()));
            }
            Component::CurDir => {}
            other => {
                return Err(HashError::InvalidPath(format!(
                    "Unexpected component {:?} in {}",
                    other,
                    relative.display()
                )))
            }
        }
    }
    Ok(segments)
}
