// ABOUTME: Atomic file write shared by the index and record modules.
// ABOUTME: Writes to a .tmp sibling, fsyncs, then renames into place for crash safety.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Write `bytes` to `path` atomically: write a `.tmp` sibling, fsync it,
/// then rename over the destination.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");

    let mut file = File::create(&tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;

    Ok(())
}
