//! Output file writing
//!
//! Implements write-only-on-change: touching an unchanged output would
//! invalidate the build tool's timestamp tracking and cascade into needless
//! rebuilds, so content is compared before any write. Writes go through
//! tempfile + rename so an interrupted run never leaves a truncated output.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::BundleResult;

/// Outcome of a single output write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// File was created or its content replaced
    Written,
    /// Existing file already had the exact bytes; left untouched
    UpToDate,
}

/// Write `content` to `path` unless the file already matches byte-for-byte.
///
/// Parent directories are created as needed. With `atomic` set, the write
/// goes through a tempfile in the same directory followed by a rename.
pub fn write_if_changed(path: &Path, content: &str, atomic: bool) -> BundleResult<WriteStatus> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    if path.exists() {
        let existing = fs::read(path)?;
        if existing == content.as_bytes() {
            return Ok(WriteStatus::UpToDate);
        }
    }

    if atomic {
        atomic_write(path, content.as_bytes())?;
    } else {
        fs::write(path, content)?;
    }

    Ok(WriteStatus::Written)
}

/// Write content to a file atomically via tempfile + rename.
fn atomic_write(path: &Path, content: &[u8]) -> BundleResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
