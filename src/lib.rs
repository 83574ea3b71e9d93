//! # Vision Telegram Bot
//!
//! A Telegram bot that forwards photos to a multimodal Gemini model and
//! replies with the model's description of the image.

pub mod bot;
pub mod config;
pub mod dialogue;
pub mod gemini;
pub mod image_store;
pub mod localization;
pub mod vision;
pub mod vision_errors;
