//! Google Generative AI Dispatcher
//!
//! The message sequence is flattened into a single prompt string, one
//! `role: content` line per message, and sent as one user part. The reply is
//! the first candidate's concatenated part text.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Dispatcher, api_base_or, require_key, require_model_name};
use crate::config::ModelConfig;
use crate::constants::endpoints;
use crate::types::{DocError, Message, Result};

const PROVIDER: &str = "google-generativeai";

/// Google Generative AI dispatcher
pub struct GeminiDispatcher {
    api_key: SecretString,
    api_base: String,
    model: String,
    max_tokens: Option<u32>,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiDispatcher")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiDispatcher {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        Ok(Self {
            api_key: require_key(config, PROVIDER)?,
            api_base: api_base_or(config, endpoints::GEMINI_API_BASE),
            model: require_model_name(config, PROVIDER)?,
            max_tokens: config.max_tokens,
            client: reqwest::Client::new(),
        })
    }

    /// Flatten the sequence into `role: content` lines, newline-joined.
    fn flatten(messages: &[Message]) -> String {
        messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl Dispatcher for GeminiDispatcher {
    async fn dispatch(&self, messages: &[Message]) -> Result<String> {
        info!("Dispatching to Google Generative AI (model: {})", self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::flatten(messages),
                }],
            }],
            generation_config: self.max_tokens.map(|max_output_tokens| GenerationConfig {
                max_output_tokens,
            }),
        };
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );

        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&request)
            .send()
            .await
            .map_err(|e| DocError::dispatch(PROVIDER, format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DocError::dispatch(
                PROVIDER,
                format!("API error ({}): {}", status, body),
            ));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| DocError::dispatch(PROVIDER, format!("cannot parse response: {}", e)))?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(DocError::dispatch(PROVIDER, "no text in response"));
        }
        Ok(text)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}
