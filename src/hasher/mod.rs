//! Resource hashers
//!
//! A hasher turns a [`ResourceEntry`] into a content hash that the build
//! fingerprints classpath entries with. [`RawContentHasher`] hashes bytes as
//! they are; [`PropertiesAwareHasher`] hashes a canonical form of
//! `.properties` resources and delegates everything else.

pub mod classpath;
pub mod properties;
pub mod raw;

pub use classpath::{combine_fingerprints, hash_archive, hash_directory, hash_entries, EntryFingerprint};
pub use properties::PropertiesAwareHasher;
pub use raw::{compute_content_hash, RawContentHasher};

use crate::error::HashError;
use crate::resource::ResourceEntry;
use crate::types::Hash;

/// Hashing capability over resource entries.
///
/// Implementations hold only immutable configuration and may be shared
/// across threads.
pub trait ResourceHasher: Send + Sync {
    /// Hash one entry. `None` means the entry has no content hash
    /// (directories).
    fn hash(&self, entry: &dyn ResourceEntry) -> Result<Option<Hash>, HashError>;

    /// Feed a deterministic description of this hasher's configuration.
    fn append_configuration(&self, hasher: &mut blake3::Hasher);
}

impl<T: ResourceHasher + ?Sized> ResourceHasher for &T {
    fn hash(&self, entry: &dyn ResourceEntry) -> Result<Option<Hash>, HashError> {
        (**self).hash(entry)
    }

    fn append_configuration(&self, hasher: &mut blake3::Hasher) {
        (**self).append_configuration(hasher)
    }
}

impl<T: ResourceHasher + ?Sized> ResourceHasher for Box<T> {
    fn hash(&self, entry: &dyn ResourceEntry) -> Result<Option<Hash>, HashError> {
        (**self).hash(entry)
    }

    fn append_configuration(&self, hasher: &mut blake3::Hasher) {
        (**self).append_configuration(hasher)
    }
}

/// Digest of a hasher's configuration, for inclusion in cache keys.
pub fn configuration_fingerprint(hasher: &dyn ResourceHasher) -> Hash {
    let mut digest = blake3::Hasher::new();
    hasher.append_configuration(&mut digest);
    *digest.finalize().as_bytes()
}

/// Write a length-prefixed string into a configuration digest
pub(crate) fn put_str(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}
