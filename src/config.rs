//! # Configuration Module
//!
//! Reads the bot settings from the process environment. Only the two
//! secrets are required; everything else has a default.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const GENERATIVEAI_API_KEY: &str = "GENERATIVEAI_API_KEY";
pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const GEMINI_API_BASE: &str = "GEMINI_API_BASE";
pub const GEMINI_TIMEOUT_SECS: &str = "GEMINI_TIMEOUT_SECS";
pub const IMAGE_DIR: &str = "IMAGE_DIR";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct BotConfig {
    pub telegram_bot_token: String,
    pub generativeai_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub request_timeout: Duration,
    /// Directory for temporary photo files
    pub image_dir: PathBuf,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_bot_token", &"[redacted]")
            .field("generativeai_api_key", &"[redacted]")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("request_timeout", &self.request_timeout)
            .field("image_dir", &self.image_dir)
            .finish()
    }
}

impl BotConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let telegram_bot_token = get(TELEGRAM_BOT_TOKEN).ok_or(ConfigError::Missing(TELEGRAM_BOT_TOKEN))?;
        let generativeai_api_key =
            get(GENERATIVEAI_API_KEY).ok_or(ConfigError::Missing(GENERATIVEAI_API_KEY))?;

        let request_timeout = match get(GEMINI_TIMEOUT_SECS) {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: GEMINI_TIMEOUT_SECS,
                        value,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            telegram_bot_token,
            generativeai_api_key,
            gemini_model: get(GEMINI_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: get(GEMINI_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            request_timeout,
            image_dir: get(IMAGE_DIR).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_required_secrets() {
        let config = BotConfig::from_lookup(lookup(&[
            (TELEGRAM_BOT_TOKEN, "123:abc"),
            (GENERATIVEAI_API_KEY, "key"),
        ]))
        .unwrap();

        assert_eq!(config.telegram_bot_token, "123:abc");
        assert_eq!(config.generativeai_api_key, "key");
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert_eq!(config.gemini_api_base, DEFAULT_API_BASE);
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.image_dir, PathBuf::from("."));
    }

    #[test]
    fn test_missing_and_blank_secrets() {
        let err = BotConfig::from_lookup(lookup(&[(GENERATIVEAI_API_KEY, "key")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(TELEGRAM_BOT_TOKEN));

        let err = BotConfig::from_lookup(lookup(&[
            (TELEGRAM_BOT_TOKEN, "123:abc"),
            (GENERATIVEAI_API_KEY, "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(GENERATIVEAI_API_KEY));
    }

    #[test]
    fn test_overrides_and_invalid_timeout() {
        let config = BotConfig::from_lookup(lookup(&[
            (TELEGRAM_BOT_TOKEN, "t"),
            (GENERATIVEAI_API_KEY, "k"),
            (GEMINI_MODEL, "gemini-pro-vision"),
            (IMAGE_DIR, "/tmp/photos"),
            (GEMINI_TIMEOUT_SECS, "15"),
        ]))
        .unwrap();
        assert_eq!(config.gemini_model, "gemini-pro-vision");
        assert_eq!(config.image_dir, PathBuf::from("/tmp/photos"));
        assert_eq!(config.request_timeout, Duration::from_secs(15));

        let err = BotConfig::from_lookup(lookup(&[
            (TELEGRAM_BOT_TOKEN, "t"),
            (GENERATIVEAI_API_KEY, "k"),
            (GEMINI_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: GEMINI_TIMEOUT_SECS, .. }));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = BotConfig::from_lookup(lookup(&[
            (TELEGRAM_BOT_TOKEN, "secret-token"),
            (GENERATIVEAI_API_KEY, "secret-key"),
        ]))
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(!debug.contains("secret-key"));
    }
}
