//! Resource entries: the unit of content a hasher sees.
//!
//! Two backing contexts produce entries: a file inside an archive and a file
//! snapshotted from disk. Hashers only use the [`ResourceEntry`] trait and
//! never look at which adapter they were given.

use crate::error::HashError;
use crate::hasher::raw::compute_content_hash;
use crate::resource::path;
use crate::types::Hash;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// A named, byte-addressable resource being hashed for change detection.
pub trait ResourceEntry: Send + Sync {
    /// Path segments relative to the archive or directory root.
    fn relative_path_segments(&self) -> &[String];

    fn is_directory(&self) -> bool;

    /// Content length in bytes
    fn size(&self) -> u64;

    /// Raw content. Read failures propagate; they are not a hashing concern.
    fn content(&self) -> Result<Cow<'_, [u8]>, HashError>;

    /// Content hash already known to the backing context, if any.
    ///
    /// Must equal the BLAKE3 hash of [`ResourceEntry::content`].
    fn known_content_hash(&self) -> Option<Hash> {
        None
    }

    /// `/`-joined relative path, as matched against filter patterns
    fn relative_path(&self) -> String {
        self.relative_path_segments().join("/")
    }

    /// Human-readable location for diagnostics
    fn display_name(&self) -> String {
        self.relative_path()
    }
}

/// An entry read from an archive, content held in memory.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    archive_path: PathBuf,
    name: String,
    segments: Vec<String>,
    content: Vec<u8>,
    directory: bool,
}

impl ArchiveEntry {
    pub fn new(archive_path: impl Into<PathBuf>, name: impl Into<String>, content: Vec<u8>) -> Self {
        let name = name.into();
        let directory = name.ends_with('/');
        Self {
            archive_path: archive_path.into(),
            segments: path::segments_from_entry_name(&name),
            name,
            content,
            directory,
        }
    }

    /// A directory entry; directories carry no content.
    pub fn directory(archive_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let mut entry = Self::new(archive_path, name, Vec::new());
        entry.directory = true;
        entry
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Entry name as stored in the archive
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ResourceEntry for ArchiveEntry {
    fn relative_path_segments(&self) -> &[String] {
        &self.segments
    }

    fn is_directory(&self) -> bool {
        self.directory
    }

    fn size(&self) -> u64 {
        self.content.len() as u64
    }

    fn content(&self) -> Result<Cow<'_, [u8]>, HashError> {
        Ok(Cow::Borrowed(&self.content))
    }

    fn display_name(&self) -> String {
        format!("{}!/{}", self.archive_path.display(), self.name)
    }
}

/// A regular file on disk, snapshotted with its content hash.
#[derive(Debug, Clone)]
pub struct FileSnapshotEntry {
    absolute_path: PathBuf,
    content_hash: Hash,
    size: u64,
    segments: Vec<String>,
}

impl FileSnapshotEntry {
    /// Build an entry from an already computed snapshot.
    pub fn new(absolute_path: PathBuf, content_hash: Hash, size: u64, segments: Vec<String>) -> Self {
        Self {
            absolute_path,
            content_hash,
            size,
            segments,
        }
    }

    /// Snapshot the file at `absolute_path`, relative to `root`.
    pub fn snapshot(root: &Path, absolute_path: &Path) -> Result<Self, HashError> {
        let segments = path::relative_segments(root, absolute_path)?;
        let content = fs::read(absolute_path).map_err(|e| HashError::Io {
            path: absolute_path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::new(
            absolute_path.to_path_buf(),
            compute_content_hash(&content),
            content.len() as u64,
            segments,
        ))
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    pub fn content_hash(&self) -> Hash {
        self.content_hash
    }
}

impl ResourceEntry for FileSnapshotEntry {
    fn relative_path_segments(&self) -> &[String] {
        &self.segments
    }

    fn is_directory(&self) -> bool {
        false
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn content(&self) -> Result<Cow<'_, [u8]>, HashError> {
        fs::read(&self.absolute_path)
            .map(Cow::Owned)
            .map_err(|e| HashError::Io {
                path: self.absolute_path.clone(),
                source: e,
            })
    }

    fn known_content_hash(&self) -> Option<Hash> {
        Some(self.content_hash)
    }

    fn display_name(&self) -> String {
        self.absolute_path.display().to_string()
    }
}
