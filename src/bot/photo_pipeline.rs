//! Photo Pipeline module: one photo in, one model answer out

use tracing::{debug, error, warn};

use crate::image_store::{detect_image_format, is_supported_photo, ImageStore};
use crate::vision::{GenerativeModel, VisionService};
use crate::vision_errors::VisionError;

/// Stores a photo, describes it and removes it again
#[derive(Debug)]
pub struct PhotoPipeline<M> {
    store: ImageStore,
    vision: VisionService<M>,
}

impl<M: GenerativeModel> PhotoPipeline<M> {
    pub fn new(store: ImageStore, vision: VisionService<M>) -> Self {
        Self { store, vision }
    }

    pub fn vision(&self) -> &VisionService<M> {
        &self.vision
    }

    /// Describe a downloaded photo
    ///
    /// The temporary file is removed whatever the query outcome. A failed
    /// removal is logged and does not replace the query result.
    pub async fn run(&self, bytes: &[u8]) -> Result<String, VisionError> {
        if !is_supported_photo(bytes) {
            warn!(
                format = ?detect_image_format(bytes),
                bytes = bytes.len(),
                "Unsupported image format rejected"
            );
            return Err(VisionError::UnsupportedFormat);
        }

        let image_path = self.store.store(bytes).await?;

        let result = self.vision.describe(&image_path).await;

        // Always clean up the temporary file
        if let Err(cleanup_err) = self.store.remove(&image_path).await {
            error!(
                image_path = %image_path.display(),
                error = %cleanup_err,
                "Failed to clean up temporary image"
            );
        } else {
            debug!(image_path = %image_path.display(), "Temporary image cleaned up");
        }

        result
    }
}
