//! Disk mirror for the serialized manifest
//!
//! Writes are skipped when the file already holds the same bytes, so file
//! watchers (the host's dev server included) aren't woken up for nothing.

use crate::errors::ManifestError;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Write `payload` to `path` unless the file already contains it
///
/// Returns `true` if a write happened. A failed pre-read counts as "changed";
/// a failed write is returned as an error.
pub fn write_if_changed(path: &Path, payload: &str) -> Result<bool, ManifestError> {
    match fs::read_to_string(path) {
        Ok(existing) if existing == payload => {
            debug!("Manifest at {:?} is up to date", path);
            return Ok(false);
        }
        Ok(_) => debug!("Manifest at {:?} changed", path),
        Err(e) => debug!("No readable manifest at {:?}: {}", path, e),
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // Atomic write: write to temp file then rename
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "manifest".to_string());
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));
    {
        let file = fs::File::create(&temp_path)?;
        let mut writer = std::io::BufWriter::new(file);
        writer.write_all(payload.as_bytes())?;
        writer.flush()?;
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!("Manifest written to {:?}", path);
    Ok(true)
}
