use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use uuid::Uuid;

use crate::error::ProcessingError;

/// An uploaded payload written to disk under a collision-free name. The file
/// is removed when the guard drops, on every exit path of the owning request.
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Writes `bytes` to `<dir>/<uuid4>.<ext>`, taking the extension from the
    /// text after the last `.` in the uploaded filename. The extension is not
    /// validated; decode is the only gate.
    pub fn write(dir: &Path, original_name: &str, bytes: &[u8]) -> Result<Self, ProcessingError> {
        let extension = original_name.rsplit('.').next().unwrap_or("bin");
        let path = dir.join(format!("{}.{}", Uuid::new_v4(), extension));
        fs::write(&path, bytes).map_err(|e| ProcessingError::InvalidUpload(e.to_string()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("Error deleting temporary file {}: {}", self.path.display(), e);
        }
    }
}

/// Creates `dir` if missing and removes every file in it. Used at startup and
/// shutdown to clear leftovers from a prior unclean exit. Per-file removal
/// failures are logged and skipped, never retried.
pub fn purge_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if let Err(e) = fs::remove_file(&path) {
            warn!("Error removing file {}: {}", path.display(), e);
        }
    }
    Ok(())
}
