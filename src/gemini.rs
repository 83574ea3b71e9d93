//! # Gemini Client Module
//!
//! [`GenerativeModel`] implementation backed by the Gemini
//! `generateContent` REST endpoint. Decoding parameters and safety
//! thresholds are fixed; only the model name, API base and timeout come
//! from configuration.

use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::BotConfig;
use crate::vision::{GenerativeModel, Prompt};
use crate::vision_errors::VisionError;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Decoding parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_p: 1.0,
            top_k: 32,
            max_output_tokens: 4096,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Block medium-and-above content in all four harm categories
pub fn default_safety_settings() -> Vec<SafetySetting> {
    [
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: HarmBlockThreshold::BlockMediumAndAbove,
    })
    .collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: &'a GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Extract the generated text from a `generateContent` response body
pub fn parse_generate_response(body: &str) -> Result<String, VisionError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| VisionError::InvalidResponse(e.to_string()))?;

    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(VisionError::Blocked(reason));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(VisionError::EmptyResponse);
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return match candidate.finish_reason.as_deref() {
            Some(reason @ ("SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST")) => {
                Err(VisionError::Blocked(reason.to_string()))
            }
            _ => Err(VisionError::EmptyResponse),
        };
    }

    Ok(text)
}

fn summarize_error_body(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.chars().take(200).collect(),
    }
}

/// Gemini REST client
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("generation_config", &self.generation_config)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, VisionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VisionError::Http(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: model.into(),
            generation_config: GenerationConfig::default(),
            safety_settings: default_safety_settings(),
        })
    }

    pub fn from_config(config: &BotConfig) -> Result<Self, VisionError> {
        Ok(Self::new(
            config.generativeai_api_key.clone(),
            config.gemini_model.clone(),
            config.request_timeout,
        )?
        .with_api_base(config.gemini_api_base.clone()))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    /// JSON payload for one prompt: the image part first, then the instruction
    pub fn build_request_body(&self, prompt: &Prompt) -> Result<serde_json::Value, VisionError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![
                    RequestPart::InlineData {
                        inline_data: InlineData {
                            mime_type: &prompt.image.mime_type,
                            data: general_purpose::STANDARD.encode(&prompt.image.data),
                        },
                    },
                    RequestPart::Text {
                        text: &prompt.instruction,
                    },
                ],
            }],
            generation_config: &self.generation_config,
            safety_settings: &self.safety_settings,
        };
        serde_json::to_value(request).map_err(|e| VisionError::InvalidRequest(e.to_string()))
    }
}

impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &Prompt) -> Result<String, VisionError> {
        let payload = self.build_request_body(prompt)?;
        debug!(
            target: "llm.gemini",
            model = %self.model,
            image_bytes = prompt.image.data.len(),
            "Calling generateContent"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!(
                    timeout = e.is_timeout(),
                    connect = e.is_connect(),
                    "Gemini request failed to send: {e}"
                );
                VisionError::Http(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VisionError::Http(e.to_string()))?;

        if !status.is_success() {
            let message = summarize_error_body(&body);
            warn!(status = status.as_u16(), %message, "Gemini API error");
            return Err(VisionError::RemoteStatus {
                status: status.as_u16(),
                message,
            });
        }

        parse_generate_response(&body)
    }
}
