//! Anthropic Messages Dispatcher
//!
//! Uses the native messages endpoint. System messages travel in the
//! top-level `system` field; the reply is the concatenation of the response
//! content blocks. `max_tokens` is required by the API and defaults to 1024
//! when unset.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Dispatcher, api_base_or, require_key, require_model_name};
use crate::config::ModelConfig;
use crate::constants::endpoints;
use crate::types::{DocError, Message, Result, Role};

const PROVIDER: &str = "claude";

/// Anthropic messages dispatcher
pub struct ClaudeDispatcher {
    api_key: SecretString,
    api_base: String,
    model: String,
    max_tokens: u32,
    client: reqwest::Client,
}

impl std::fmt::Debug for ClaudeDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeDispatcher")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ClaudeDispatcher {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        Ok(Self {
            api_key: require_key(config, PROVIDER)?,
            api_base: api_base_or(config, endpoints::CLAUDE_API_BASE),
            model: require_model_name(config, PROVIDER)?,
            max_tokens: config
                .max_tokens
                .unwrap_or(endpoints::CLAUDE_DEFAULT_MAX_TOKENS),
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl Dispatcher for ClaudeDispatcher {
    async fn dispatch(&self, messages: &[Message]) -> Result<String> {
        info!("Dispatching to Claude (model: {})", self.model);

        // The messages API takes system text separately from the turn list.
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();
        let turns: Vec<&Message> = messages.iter().filter(|m| m.role != Role::System).collect();

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: (!system.is_empty()).then(|| system.join("\n")),
            messages: &turns,
        };
        let url = format!("{}/v1/messages", self.api_base);

        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", endpoints::CLAUDE_API_VERSION)
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

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| DocError::dispatch(PROVIDER, format!("cannot parse response: {}", e)))?;

        let text: String = body
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(DocError::dispatch(PROVIDER, "no text blocks in response"));
        }
        Ok(text)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: &'a [&'a Message],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;
    use crate::provider::test_support::model;

    #[test]
    fn test_missing_key_names_the_field() {
        let mut config = model(Provider::Claude);
        config.key = None;
        let err = ClaudeDispatcher::new(&config).unwrap_err();
        assert!(err.to_string().contains("'key'"));
    }

    #[test]
    fn test_max_tokens_defaults_to_1024() {
        let dispatcher = ClaudeDispatcher::new(&model(Provider::Claude)).unwrap();
        assert_eq!(dispatcher.max_tokens, 1024);
    }

    #[tokio::test]
    async fn test_dispatch_joins_content_blocks() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", endpoints::CLAUDE_API_VERSION)
            .with_status(200)
            .with_body(
                r#"{"content":[{"type":"text","text":"part one"},{"type":"text","text":" part two"}]}"#,
            )
            .create_async()
            .await;

        let mut config = model(Provider::Claude);
        config.api_base = Some(server.url());
        let dispatcher = ClaudeDispatcher::new(&config).unwrap();

        let messages = vec![Message::system("be brief"), Message::user("hi")];
        let reply = dispatcher.dispatch(&messages).await.unwrap();
        assert_eq!(reply, "part one part two");
    }
}
