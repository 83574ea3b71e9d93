//! # Image Store Module
//!
//! Ephemeral storage for photos while they are being described. Every photo
//! is written under a fresh UUID so concurrent requests never share a file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use uuid::Uuid;

use crate::vision_errors::VisionError;

/// Extension of every stored image; Telegram re-encodes photos as JPEG
pub const IMAGE_EXTENSION: &str = "jpeg";
/// Minimum bytes required for format detection
pub const MIN_FORMAT_BYTES: usize = 8;

/// Writes photos to a directory and removes them once answered
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `bytes` to `<dir>/<uuid>.jpeg` and return the new path
    ///
    /// The file is created with `create_new`, so an existing file is never
    /// overwritten.
    pub async fn store(&self, bytes: &[u8]) -> Result<PathBuf, VisionError> {
        let path = self
            .dir
            .join(format!("{}.{}", Uuid::new_v4(), IMAGE_EXTENSION));

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        debug!(image_path = %path.display(), bytes = bytes.len(), "Stored image");
        Ok(path)
    }

    /// Delete a stored image
    ///
    /// Fails with [`VisionError::ImageNotFound`] when nothing exists at `path`.
    pub async fn remove(&self, path: &Path) -> Result<(), VisionError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                info!(image_path = %path.display(), "Removed image");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(VisionError::ImageNotFound(path.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Guess the format of an image buffer from its leading magic bytes
pub fn detect_image_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.len() < MIN_FORMAT_BYTES {
        return None;
    }
    image::guess_format(bytes).ok()
}

/// Whether the buffer looks like a JPEG photo
pub fn is_supported_photo(bytes: &[u8]) -> bool {
    matches!(detect_image_format(bytes), Some(ImageFormat::Jpeg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_buffers_are_rejected() {
        assert_eq!(detect_image_format(&[0xFF, 0xD8, 0xFF]), None);
        assert!(!is_supported_photo(&[]));
    }

    #[test]
    fn test_png_is_not_a_photo() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        assert_eq!(detect_image_format(png), Some(ImageFormat::Png));
        assert!(!is_supported_photo(png));
    }
}
