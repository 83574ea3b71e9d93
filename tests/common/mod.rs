//! Shared test doubles for the photo path

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use vision_bot::vision::{GenerativeModel, Prompt};
use vision_bot::vision_errors::VisionError;

/// Smallest buffer the format sniffer recognises as JPEG
pub const JPEG_BYTES: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xD9,
];

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

pub enum MockReply {
    Text(String),
    RemoteError,
    Blocked,
}

/// Model double that records every prompt it receives
pub struct RecordingModel {
    reply: MockReply,
    watch_dir: Option<PathBuf>,
    prompts: Mutex<Vec<Prompt>>,
    files_during_call: Mutex<Vec<PathBuf>>,
}

impl RecordingModel {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            watch_dir: None,
            prompts: Mutex::new(Vec::new()),
            files_during_call: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::new(MockReply::Text(text.to_string()))
    }

    /// Also record the files present in `dir` while the model is called
    pub fn watching(dir: &Path, reply: MockReply) -> Self {
        Self {
            watch_dir: Some(dir.to_path_buf()),
            ..Self::new(reply)
        }
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn files_during_call(&self) -> Vec<PathBuf> {
        self.files_during_call.lock().unwrap().clone()
    }
}

impl GenerativeModel for RecordingModel {
    async fn generate(&self, prompt: &Prompt) -> Result<String, VisionError> {
        self.prompts.lock().unwrap().push(prompt.clone());

        if let Some(dir) = &self.watch_dir {
            let files = list_files(dir);
            self.files_during_call.lock().unwrap().extend(files);
        }

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::RemoteError => Err(VisionError::RemoteStatus {
                status: 500,
                message: "internal error".to_string(),
            }),
            MockReply::Blocked => Err(VisionError::Blocked("SAFETY".to_string())),
        }
    }
}

pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}
