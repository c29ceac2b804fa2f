//! Text-generation collaborator and its Gemini HTTP implementation

use crate::config::{ExplanationConfig, GenerationProvider};
use crate::error::{MatcherError, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Anything that can answer a system + user prompt pair with free text.
/// Output is untrusted: it may be slow, fail, or not be the format asked for.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    fn model_name(&self) -> &str;
}

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MatcherError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Client for the configured provider, or `None` when generation is
    /// disabled or no usable API key is set
    pub fn from_config(config: &ExplanationConfig) -> Result<Option<Self>> {
        if config.provider == GenerationProvider::Disabled {
            return Ok(None);
        }

        let api_key = match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() && key != "mock" => key,
            _ => {
                warn!(
                    "{} is not set, explanations will use the fallback",
                    config.api_key_env
                );
                return Ok(None);
            }
        };

        Self::new(
            api_key,
            config.model.clone(),
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }

    /// The key travels in a header so it never appears in the URL or in errors
    fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        // The system instruction travels in the same content part as the request
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{}\n\nUser Request: {}", system_prompt, user_prompt),
                }],
            }],
        };

        debug!("Requesting explanation from {}", self.model);

        let response = self
            .client
            .post(self.request_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MatcherError::Generation(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        body.first_text().ok_or_else(|| {
            MatcherError::Generation("Gemini response contained no text".to_string())
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// --- generateContent request/response types ---

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|part| part.text.as_str()).collect();
        (!text.is_empty()).then_some(text)
    }
}
