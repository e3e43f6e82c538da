//! Raw content hashing using BLAKE3

use crate::error::HashError;
use crate::hasher::ResourceHasher;
use crate::resource::ResourceEntry;
use crate::types::Hash;
use blake3::Hasher;

/// Compute content hash for resource bytes
///
/// Uses BLAKE3 to hash content deterministically.
pub fn compute_content_hash(content: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}

/// Generic hasher: BLAKE3 over the raw bytes of an entry.
///
/// Directories have no hash. Entries that already know their content hash
/// (filesystem snapshots) are not read again.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawContentHasher;

impl RawContentHasher {
    pub fn new() -> Self {
        Self
    }
}

impl ResourceHasher for RawContentHasher {
    fn hash(&self, entry: &dyn ResourceEntry) -> Result<Option<Hash>, HashError> {
        if entry.is_directory() {
            return Ok(None);
        }
        if let Some(hash) = entry.known_content_hash() {
            return Ok(Some(hash));
        }
        let content = entry.content()?;
        Ok(Some(compute_content_hash(&content)))
    }

    fn append_configuration(&self, hasher: &mut Hasher) {
        hasher.update(b"raw-content");
    }
}
