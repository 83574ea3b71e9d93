//! # Vision Query Module
//!
//! Builds the fixed describe prompt for a stored photo and hands it to a
//! [`GenerativeModel`]. The model is injected, so the production Gemini
//! client and test doubles share the same service.

use std::future::Future;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::vision_errors::VisionError;

/// MIME type attached to every image part
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Instruction sent after the image
pub const DESCRIBE_PROMPT: &str = "\nWhat do you think about this photo? Describe and explain it. If it is question then solve it. Translate your answer into Russian and Uzbek.\n";

/// Raw image bytes tagged with their MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Ordered model input: one image part followed by one instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub image: ImagePart,
    pub instruction: String,
}

impl Prompt {
    /// The describe/solve/translate prompt for a JPEG photo
    pub fn describe(data: Vec<u8>) -> Self {
        Self {
            image: ImagePart {
                mime_type: IMAGE_MIME_TYPE.to_string(),
                data,
            },
            instruction: DESCRIBE_PROMPT.to_string(),
        }
    }
}

/// A remote model that turns an image prompt into text
pub trait GenerativeModel: Send + Sync {
    fn generate(&self, prompt: &Prompt) -> impl Future<Output = Result<String, VisionError>> + Send;
}

/// Describes stored images with the injected model
#[derive(Debug)]
pub struct VisionService<M> {
    model: M,
}

impl<M: GenerativeModel> VisionService<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Read the image at `image_path` and return the model's text verbatim
    ///
    /// A missing file fails with [`VisionError::ImageNotFound`] before the
    /// model is contacted.
    pub async fn describe(&self, image_path: &Path) -> Result<String, VisionError> {
        let data = match tokio::fs::read(image_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(VisionError::ImageNotFound(image_path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(
            image_path = %image_path.display(),
            bytes = data.len(),
            "Sending image to vision model"
        );

        let text = self.model.generate(&Prompt::describe(data)).await?;

        info!(
            image_path = %image_path.display(),
            chars = text.chars().count(),
            "Vision model answered"
        );
        Ok(text)
    }
}
