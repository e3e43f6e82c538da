//! Classpath-level hashing: every entry of an archive or directory tree.

use crate::error::HashError;
use crate::hasher::{put_str, ResourceHasher};
use crate::resource::{read_archive, ResourceEntry, Walker, WalkerConfig};
use crate::types::{hash_to_hex, Hash};
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::path::Path;
use tracing::info;

/// Hash of one classpath entry, keyed by its relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFingerprint {
    pub path: String,
    #[serde(serialize_with = "serialize_hash")]
    pub hash: Option<Hash>,
}

fn serialize_hash<S: Serializer>(hash: &Option<Hash>, serializer: S) -> Result<S::Ok, S::Error> {
    match hash {
        Some(hash) => serializer.serialize_some(&hash_to_hex(hash)),
        None => serializer.serialize_none(),
    }
}

/// Hash entries in parallel. Output is sorted by path and does not depend
/// on scheduling.
pub fn hash_entries<E>(
    entries: &[E],
    hasher: &dyn ResourceHasher,
) -> Result<Vec<EntryFingerprint>, HashError>
where
    E: ResourceEntry,
{
    let mut fingerprints = entries
        .par_iter()
        .map(|entry| {
            Ok(EntryFingerprint {
                path: entry.relative_path(),
                hash: hasher.hash(entry)?,
            })
        })
        .collect::<Result<Vec<_>, HashError>>()?;

    fingerprints.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(fingerprints)
}

/// Hash every entry of the zip archive at `path`.
pub fn hash_archive(
    path: &Path,
    hasher: &dyn ResourceHasher,
) -> Result<Vec<EntryFingerprint>, HashError> {
    let entries = read_archive(path)?;
    let fingerprints = hash_entries(&entries, hasher)?;
    info!(archive = %path.display(), entries = fingerprints.len(), "Hashed archive");
    Ok(fingerprints)
}

/// Hash every regular file under `root`.
pub fn hash_directory(
    root: &Path,
    config: &WalkerConfig,
    hasher: &dyn ResourceHasher,
) -> Result<Vec<EntryFingerprint>, HashError> {
    let entries = Walker::with_config(root.to_path_buf(), config.clone()).walk()?;
    let fingerprints = hash_entries(&entries, hasher)?;
    info!(root = %root.display(), entries = fingerprints.len(), "Hashed directory");
    Ok(fingerprints)
}

/// Fold fingerprints into a single hash. Entries without a hash
/// (directories) do not contribute, so an archive and the directory it was
/// extracted from combine to the same value.
pub fn combine_fingerprints(fingerprints: &[EntryFingerprint]) -> Hash {
    let mut hasher = blake3::Hasher::new();
    for fingerprint in fingerprints {
        if let Some(hash) = &fingerprint.hash {
            put_str(&mut hasher, &fingerprint.path);
            hasher.update(hash);
        }
    }
    *hasher.finalize().as_bytes()
}
