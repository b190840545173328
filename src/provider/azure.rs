//! Azure OpenAI Dispatcher
//!
//! Same chat-completion shape as OpenAI, but the model name acts as the
//! deployment name in a versioned endpoint path and the key travels in an
//! `api-key` header. `api_base` is required (the resource endpoint).

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Dispatcher, require_key, require_model_name};
use crate::config::ModelConfig;
use crate::constants::endpoints;
use crate::types::{DocError, Message, Result};

const PROVIDER: &str = "azure-openai";

/// Azure OpenAI chat-completions dispatcher
pub struct AzureOpenAiDispatcher {
    api_key: SecretString,
    api_base: String,
    deployment: String,
    max_tokens: Option<u32>,
    client: reqwest::Client,
}

impl std::fmt::Debug for AzureOpenAiDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiDispatcher")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("deployment", &self.deployment)
            .finish()
    }
}

impl AzureOpenAiDispatcher {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let api_base = config
            .api_base
            .as_deref()
            .filter(|base| !base.is_empty())
            .ok_or_else(|| DocError::missing_field(PROVIDER, "api_base"))?
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key: require_key(config, PROVIDER)?,
            api_base,
            deployment: require_model_name(config, PROVIDER)?,
            max_tokens: config.max_tokens,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.api_base,
            self.deployment,
            endpoints::AZURE_API_VERSION
        )
    }
}

#[async_trait]
impl Dispatcher for AzureOpenAiDispatcher {
    async fn dispatch(&self, messages: &[Message]) -> Result<String> {
        info!("Dispatching to Azure OpenAI (deployment: {})", self.deployment);

        let request = AzureChatRequest {
            messages,
            stream: false,
            max_tokens: self.max_tokens,
        };
        let url = self.endpoint();

        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header("api-key", self.api_key.expose_secret())
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

        let body: AzureChatResponse = response
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
struct AzureChatRequest<'a> {
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct AzureChatResponse {
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
