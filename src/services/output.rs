use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempPath};

use crate::error::ConvertError;

/// Destination of one image/palette pair.
///
/// Both files appear together or not at all: each payload is written to a
/// temporary file next to its destination, then both are renamed into
/// place. If the palette rename fails the image destination goes back to
/// what it was before: the previous image is restored, or the new one is
/// removed when there was none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPair {
    image_path: PathBuf,
    palette_path: PathBuf,
}

impl OutputPair {
    pub fn new(image_path: impl Into<PathBuf>, palette_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            palette_path: palette_path.into(),
        }
    }

    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    pub fn palette_path(&self) -> &Path {
        &self.palette_path
    }

    /// Write both payloads and promote them into place.
    pub fn commit(&self, image_data: &[u8], palette_data: &[u8]) -> Result<(), ConvertError> {
        let image_tmp = stage(&self.image_path, image_data)?;
        let palette_tmp = stage(&self.palette_path, palette_data)?;
        let previous = set_aside(&self.image_path)?;

        if let Err(e) = image_tmp.persist(&self.image_path) {
            self.roll_back(previous);
            return Err(ConvertError::io(&self.image_path, e.error));
        }
        if let Err(e) = palette_tmp.persist(&self.palette_path) {
            self.roll_back(previous);
            return Err(ConvertError::io(&self.palette_path, e.error));
        }

        tracing::debug!(
            image = %self.image_path.display(),
            palette = %self.palette_path.display(),
            "Committed output pair"
        );
        Ok(())
    }

    /// Put the image destination back the way it was before `commit`.
    fn roll_back(&self, previous: Option<TempPath>) {
        let restored = match previous {
            Some(previous) => previous.persist(&self.image_path).map_err(|e| e.error),
            None => match std::fs::remove_file(&self.image_path) {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(error) = restored {
            tracing::warn!(
                path = %self.image_path.display(),
                error = %error,
                "Failed to restore image after a failed commit"
            );
        }
    }
}

/// Write a single file through a temp file beside it, so `dest` only
/// ever holds complete contents.
pub(crate) fn write_file(dest: &Path, data: &[u8]) -> Result<(), ConvertError> {
    stage(dest, data)?
        .persist(dest)
        .map_err(|e| ConvertError::io(dest, e.error))?;
    Ok(())
}

/// Directory a destination's temp files go in.
fn parent_dir(dest: &Path) -> &Path {
    dest.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Move an existing file at `dest` to a temp path beside it.
///
/// The returned path deletes the old file when dropped.
fn set_aside(dest: &Path) -> Result<Option<TempPath>, ConvertError> {
    if !dest.is_file() {
        return Ok(None);
    }
    let backup = tempfile::Builder::new()
        .prefix(".bgpack-prev-")
        .tempfile_in(parent_dir(dest))
        .map_err(|e| ConvertError::io(dest, e))?
        .into_temp_path();
    std::fs::rename(dest, &backup).map_err(|e| ConvertError::io(dest, e))?;
    Ok(Some(backup))
}

/// Write `data` to a temp file in `dest`'s directory.
fn stage(dest: &Path, data: &[u8]) -> Result<NamedTempFile, ConvertError> {
    let mut file = tempfile::Builder::new()
        .prefix(".bgpack-")
        .tempfile_in(parent_dir(dest))
        .map_err(|e| ConvertError::io(dest, e))?;
    file.write_all(data).map_err(|e| ConvertError::io(dest, e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| ConvertError::io(dest, e))?;
    Ok(file)
}
