//! Provider Dispatchers
//!
//! One [`Dispatcher`] implementation per backend. Selection happens by the
//! configured provider tag; every call is a single non-streaming round trip
//! with no retry and no caching. Missing required configuration fields fail
//! before any network call, naming the specific field.

mod azure;
mod claude;
mod gemini;
mod ollama;
mod openai;

pub use azure::AzureOpenAiDispatcher;
pub use claude::ClaudeDispatcher;
pub use gemini::GeminiDispatcher;
pub use ollama::OllamaDispatcher;
pub use openai::OpenAiDispatcher;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::config::{ModelConfig, Provider};
use crate::types::{DocError, Message, Result};

/// Capability interface for one outbound model request.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Send the message sequence and return the generated text.
    async fn dispatch(&self, messages: &[Message]) -> Result<String>;

    /// Provider tag for logging and error context
    fn name(&self) -> &'static str;
}

/// Select a dispatcher implementation by the configured provider tag.
pub fn create_dispatcher(config: &ModelConfig) -> Result<Box<dyn Dispatcher>> {
    match config.provider {
        Provider::Openai => Ok(Box::new(OpenAiDispatcher::new(config)?)),
        Provider::AzureOpenai => Ok(Box::new(AzureOpenAiDispatcher::new(config)?)),
        Provider::Ollama => Ok(Box::new(OllamaDispatcher::new(config)?)),
        Provider::Claude => Ok(Box::new(ClaudeDispatcher::new(config)?)),
        Provider::GoogleGenerativeai => Ok(Box::new(GeminiDispatcher::new(config)?)),
    }
}

/// Required API key for a provider, wrapped for redaction.
fn require_key(config: &ModelConfig, provider: &'static str) -> Result<SecretString> {
    match config.key.as_deref() {
        Some(key) if !key.is_empty() => Ok(SecretString::from(key.to_string())),
        _ => Err(DocError::missing_field(provider, "key")),
    }
}

/// Required model name for a provider.
fn require_model_name(config: &ModelConfig, provider: &'static str) -> Result<String> {
    if config.model_name.is_empty() {
        return Err(DocError::missing_field(provider, "model_name"));
    }
    Ok(config.model_name.clone())
}

/// API base with any trailing slash removed, or the provider default.
fn api_base_or(config: &ModelConfig, default: &str) -> String {
    config
        .api_base
        .as_deref()
        .filter(|base| !base.is_empty())
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_support::model;

    impl std::fmt::Debug for dyn Dispatcher {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Dispatcher").field("name", &self.name()).finish()
        }
    }

    #[test]
    fn test_create_dispatcher_selects_by_tag() {
        for (provider, name) in [
            (Provider::Openai, "openai"),
            (Provider::Ollama, "ollama"),
            (Provider::Claude, "claude"),
            (Provider::GoogleGenerativeai, "google-generativeai"),
        ] {
            let mut config = model(provider);
            config.api_base = Some("http://localhost:1".to_string());
            let dispatcher = create_dispatcher(&config).unwrap();
            assert_eq!(dispatcher.name(), name);
        }
    }

    #[test]
    fn test_azure_requires_api_base() {
        let config = model(Provider::AzureOpenai);
        let err = create_dispatcher(&config).unwrap_err();
        assert!(err.to_string().contains("api_base"));
    }

    #[test]
    fn test_api_base_trailing_slash_stripped() {
        let mut config = model(Provider::Openai);
        config.api_base = Some("http://example.com/v1/".to_string());
        assert_eq!(api_base_or(&config, "unused"), "http://example.com/v1");
    }
}
