//! Gemini `generateContent` API client.
//!
//! One blocking call per request, no retries and no caching; the 30-second
//! client timeout is the only bound this crate imposes. Callers hold the
//! credential in their configuration and pass it in here — there is no
//! process-wide key state.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AiConfig;

const USER_AGENT: &str = concat!("social-metrics/", env!("CARGO_PKG_VERSION"));

/// Gemini client errors.
///
/// These never cross into the record-entry workflow; the classifier maps them
/// to its fallback suggestion and the report generator renders them into the
/// document body.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Model returned no completion")]
    EmptyCompletion,

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Seam for the external text-generation model.
///
/// Production uses [`GeminiClient`]; tests substitute stub backends.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one prompt through the model and return its raw text completion
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Gemini API client
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from the AI section of the application configuration.
    ///
    /// Returns `InvalidApiKey` when no credential is configured; callers treat
    /// that as "feature unavailable" rather than an error.
    pub fn new(config: &AiConfig, api_key: String) -> Result<Self, AiError> {
        if api_key.trim().is_empty() {
            return Err(AiError::InvalidApiKey);
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(model = %self.model, "Querying Gemini API");

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();

        if status == 401 || status == 403 {
            return Err(AiError::InvalidApiKey);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AiError::Api(status.as_u16(), error_text));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;

        let text = generate_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(AiError::EmptyCompletion)?;

        if text.trim().is_empty() {
            return Err(AiError::EmptyCompletion);
        }

        Ok(text)
    }
}
