//! Snapshot file I/O
//!
//! ## Write protocol
//! 1. Serialize the whole state as pretty JSON
//! 2. Write it to a temp file in the snapshot's own directory and fsync
//! 3. Rename the temp file over the canonical path
//!
//! The rename is the only step that makes a new snapshot visible, so a crash
//! never leaves a half-written file at the canonical path.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

use super::Snapshot;

/// Load the snapshot at `path`
///
/// Returns:
/// - `Ok(None)`: no file, or an empty file (start empty)
/// - `Ok(Some(snapshot))`: parsed state
/// - `Err(_)`: unreadable or unparseable file; startup must fail
pub fn read_snapshot(path: &Path) -> Result<Option<Snapshot>> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if data.is_empty() {
        return Ok(None);
    }

    let snapshot = serde_json::from_slice(&data)?;
    Ok(Some(snapshot))
}

/// Atomically replace the snapshot at `path`
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let data = serde_json::to_vec_pretty(snapshot)?;

    // Same directory as the target so the rename never crosses filesystems
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(&data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
