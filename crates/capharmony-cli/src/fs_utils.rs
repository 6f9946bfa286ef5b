//! File-system helpers used by the template installer and the merger

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::errors::HarmonyError;

/// Create `dir` and its parents if absent
pub fn ensure_dir(dir: &Path) -> Result<(), HarmonyError> {
    fs::create_dir_all(dir).map_err(|e| HarmonyError::io(dir, e))
}

/// Recursively copy the contents of `src` into `dst`, overwriting files that
/// already exist. Returns the number of files copied.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<usize, HarmonyError> {
    let copy_failed = |message: String| HarmonyError::CopyFailed {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        message,
    };

    if !src.is_dir() {
        return Err(copy_failed("source is not a directory".to_string()));
    }
    ensure_dir(dst)?;

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| copy_failed(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| copy_failed(e.to_string()))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                ensure_dir(parent)?;
            }
            fs::copy(entry.path(), &target).map_err(|e| HarmonyError::io(&target, e))?;
            copied += 1;
        }
    }

    tracing::debug!("Copied {} file(s) from {:?} to {:?}", copied, src, dst);
    Ok(copied)
}
