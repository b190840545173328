//! Ollama Local LLM Dispatcher
//!
//! POSTs the message sequence to `{api_base}/api/chat`. No API key; a
//! non-success status is a fatal error for the task.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Dispatcher, api_base_or, require_model_name};
use crate::config::ModelConfig;
use crate::constants::endpoints;
use crate::types::{DocError, Message, Result};

const PROVIDER: &str = "ollama";

/// Ollama chat dispatcher
#[derive(Debug)]
pub struct OllamaDispatcher {
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaDispatcher {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        Ok(Self {
            api_base: api_base_or(config, endpoints::OLLAMA_API_BASE),
            model: require_model_name(config, PROVIDER)?,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl Dispatcher for OllamaDispatcher {
    async fn dispatch(&self, messages: &[Message]) -> Result<String> {
        info!("Dispatching to Ollama (model: {})", self.model);

        let request = OllamaChatRequest {
            model: &self.model,
            messages,
            stream: false,
        };
        let url = format!("{}/api/chat", self.api_base);

        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    DocError::dispatch(
                        PROVIDER,
                        format!(
                            "cannot connect to {}. Is Ollama running? Start with: ollama serve",
                            self.api_base
                        ),
                    )
                } else {
                    DocError::dispatch(PROVIDER, format!("request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DocError::dispatch(
                PROVIDER,
                format!("API error ({}): {}", status, body),
            ));
        }

        let body: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| DocError::dispatch(PROVIDER, format!("cannot parse response: {}", e)))?;

        Ok(body.message.content)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;
    use crate::provider::test_support::model;

    #[test]
    fn test_no_key_required() {
        let mut config = model(Provider::Ollama);
        config.key = None;
        let dispatcher = OllamaDispatcher::new(&config).unwrap();
        assert_eq!(dispatcher.api_base, endpoints::OLLAMA_API_BASE);
    }

    #[test]
    fn test_missing_model_name_names_the_field() {
        let mut config = model(Provider::Ollama);
        config.model_name = String::new();
        let err = OllamaDispatcher::new(&config).unwrap_err();
        assert!(err.to_string().contains("'model_name'"));
    }

    #[tokio::test]
    async fn test_dispatch_extracts_message_content() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"message":{"role":"assistant","content":"local reply"},"done":true}"#)
            .create_async()
            .await;

        let mut config = model(Provider::Ollama);
        config.api_base = Some(server.url());
        let dispatcher = OllamaDispatcher::new(&config).unwrap();

        let reply = dispatcher.dispatch(&[Message::user("hi")]).await.unwrap();
        assert_eq!(reply, "local reply");
    }

    #[tokio::test]
    async fn test_dispatch_non_success_is_fatal_for_the_task() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body("model not loaded")
            .create_async()
            .await;

        let mut config = model(Provider::Ollama);
        config.api_base = Some(server.url());
        let dispatcher = OllamaDispatcher::new(&config).unwrap();

        let err = dispatcher.dispatch(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, DocError::Dispatch { .. }));
    }
}
