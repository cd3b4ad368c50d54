//! Removal of export directories left behind by a previous run.

use std::fs;
use std::io;
use std::path::Path;

/// Removes every entry of `dir` whose name starts with `prefix`, files and directories alike.
/// Entries that cannot be removed are skipped. Returns the number of removed entries.
pub fn sweep_stale_exports(dir: &Path, prefix: &str) -> io::Result<usize> {
    if prefix.is_empty() {
        tracing::warn!("empty export prefix, skipping the sweep");
        return Ok(0);
    }
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "unreadable temp dir entry");
                continue;
            }
        };
        if !entry.file_name().to_string_lossy().starts_with(prefix) {
            continue;
        }
        let path = entry.path();
        let res = match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => fs::remove_dir_all(&path),
            Ok(_) => fs::remove_file(&path),
            Err(e) => Err(e),
        };
        match res {
            Ok(()) => removed += 1,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "could not remove stale export")
            }
        }
    }
    Ok(removed)
}
