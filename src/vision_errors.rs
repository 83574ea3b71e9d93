//! # Vision Error Types Module
//!
//! This module defines the error types used along the photo processing path:
//! temporary image storage, the vision query and the remote model call.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while storing, describing or downloading a photo
#[derive(Debug, Error)]
pub enum VisionError {
    /// The image file was not present when it was read or removed
    #[error("Could not find image: {}", .0.display())]
    ImageNotFound(PathBuf),
    /// Any other filesystem failure
    #[error("Image I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The received bytes are not a JPEG photo
    #[error("Unsupported image format")]
    UnsupportedFormat,
    /// The photo could not be fetched from Telegram
    #[error("Photo download failed: {0}")]
    Download(String),
    /// The model request never produced an HTTP response
    #[error("Model request failed: {0}")]
    Http(String),
    /// The model API answered with a non-success status
    #[error("Model API error (status {status}): {message}")]
    RemoteStatus { status: u16, message: String },
    /// The prompt or the answer was rejected by the safety filters
    #[error("Response blocked by safety filters: {0}")]
    Blocked(String),
    /// The model answered without any text
    #[error("Model returned no text")]
    EmptyResponse,
    /// The request payload could not be encoded
    #[error("Invalid model request: {0}")]
    InvalidRequest(String),
    /// The model answer could not be decoded
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
}

impl VisionError {
    /// Localization key of the reply sent to the user when this error ends a request
    pub fn user_message_key(&self) -> &'static str {
        match self {
            VisionError::ImageNotFound(_) | VisionError::Io(_) => "error-image-storage",
            VisionError::UnsupportedFormat => "error-unsupported-format",
            VisionError::Download(_) => "error-download-failed",
            VisionError::Blocked(_) => "error-blocked",
            VisionError::EmptyResponse => "error-empty-response",
            VisionError::Http(_)
            | VisionError::RemoteStatus { .. }
            | VisionError::InvalidRequest(_)
            | VisionError::InvalidResponse(_) => "error-model-failed",
        }
    }
}
