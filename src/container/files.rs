use std::{fs, io::Write, path::Path};

use tempfile::NamedTempFile;
use tracing::info;

use crate::{Error, Result};

/// Compresses `source` into `dest`. Returns the input and the container.
pub fn compress_file(source: &Path, dest: &Path) -> Result<(Vec<u8>, Vec<u8>)> {
    let input = fs::read(source).map_err(|e| Error::io(source, e))?;
    let container = super::compress(&input)?;
    write_atomically(dest, &container)?;
    info!(source = %source.display(), dest = %dest.display(), "compression complete");
    Ok((input, container))
}

/// Decompresses `source` into `dest`. Returns the decoded bytes.
pub fn decompress_file(source: &Path, dest: &Path) -> Result<Vec<u8>> {
    let container = fs::read(source).map_err(|e| Error::io(source, e))?;
    let output = super::decompress(&container)?;
    write_atomically(dest, &output)?;
    info!(source = %source.display(), dest = %dest.display(), "decompression complete");
    Ok(output)
}

/// Writes to a temporary file next to `dest` and renames it into place, so
/// `dest` is either left untouched or fully written.
pub fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| Error::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(dest).map_err(|e| Error::io(dest, e.error))?;
    Ok(())
}
