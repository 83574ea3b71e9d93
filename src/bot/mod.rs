//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Routes incoming messages through the conversation state machine
//! - `photo_pipeline`: Stores, describes and cleans up a single photo
//! - `ui_builder`: Splits replies and builds keyboard markups

pub mod message_handler;
pub mod photo_pipeline;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use message_handler::{
    classify_input, download_client, fetch_bytes, message_handler, reply_messages, schema, Command,
    SharedPipeline, DOWNLOAD_TIMEOUT,
};
pub use photo_pipeline::PhotoPipeline;

// Re-export utility functions that might be used elsewhere
pub use ui_builder::{remove_keyboard, split_message, TELEGRAM_MESSAGE_LIMIT};
