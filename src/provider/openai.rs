//! OpenAI Chat Completions Dispatcher
//!
//! POSTs the message sequence to `{api_base}/chat/completions` and returns
//! the first choice's message content.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Dispatcher, api_base_or, require_key, require_model_name};
use crate::config::ModelConfig;
use crate::constants::endpoints;
use crate::types::{DocError, Message, Result};

const PROVIDER: &str = "openai";

/// OpenAI-compatible chat-completions dispatcher
pub struct OpenAiDispatcher {
    api_key: SecretString,
    api_base: String,
    model: String,
    max_tokens: Option<u32>,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiDispatcher")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiDispatcher {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        Ok(Self {
            api_key: require_key(config, "openai")?,
            api_base: api_base_or(config, endpoints::OPENAI_API_BASE),
            model: require_model_name(config, "openai")?,
            max_tokens: config.max_tokens,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl Dispatcher for OpenAiDispatcher {
    async fn dispatch(&self, messages: &[Message]) -> Result<String> {
        info!("Dispatching to OpenAI (model: {})", self.model);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            stream: false,
            max_tokens: self.max_tokens,
        };
        let url = format!("{}/chat/completions", self.api_base);

        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
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

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| DocError::dispatch(PROVIDER, format!("cannot parse response: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DocError::dispatch(PROVIDER, "no content in response"))
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
