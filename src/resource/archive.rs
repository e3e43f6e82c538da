//! Zip archive reader producing archive entries

use crate::error::HashError;
use crate::resource::entry::ArchiveEntry;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Upper bound on buffer pre-allocation; the declared size comes from the
/// archive header and is not trusted.
const MAX_PREALLOCATION: u64 = 1 << 20;

/// Read every entry of the zip archive at `path`, in archive order.
pub fn read_archive(path: &Path) -> Result<Vec<ArchiveEntry>, HashError> {
    let file = File::open(path).map_err(|e| HashError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_archive_from(path, file)
}

/// Read entries from any seekable zip source; `path` is used for diagnostics.
pub fn read_archive_from<R: Read + Seek>(
    path: &Path,
    reader: R,
) -> Result<Vec<ArchiveEntry>, HashError> {
    let archive_error = |e: zip::result::ZipError| HashError::Archive {
        path: path.to_path_buf(),
        source: e,
    };

    let mut archive = ZipArchive::new(reader).map_err(archive_error)?;
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(archive_error)?;
        let name = file.name().to_string();
        if file.is_dir() {
            entries.push(ArchiveEntry::directory(path, name));
            continue;
        }
        let mut content = Vec::with_capacity(initial_capacity(file.size()));
        file.read_to_end(&mut content).map_err(|e| HashError::Io {
            path: path.join(&name),
            source: e,
        })?;
        entries.push(ArchiveEntry::new(path, name, content));
    }

    debug!(archive = %path.display(), entries = entries.len(), "Read archive");
    Ok(entries)
}

fn initial_capacity(declared_size: u64) -> usize {
    usize::try_from(declared_size.min(MAX_PREALLOCATION)).unwrap_or(0)
}
