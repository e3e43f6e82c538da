//! Resource entries and the contexts that produce them
//!
//! An entry is either a file inside a zip archive or a file snapshotted from
//! a directory tree. Both implement [`ResourceEntry`].

pub mod archive;
pub mod entry;
pub mod path;
pub mod walker;

pub use archive::{read_archive, read_archive_from};
pub use entry::{ArchiveEntry, FileSnapshotEntry, ResourceEntry};
pub use walker::{Walker, WalkerConfig};
