//! Configuration Types
//!
//! Alias → model records plus a default alias. The generation pipeline treats
//! a loaded `Config` as read-only; mutation happens only through the config
//! CLI commands, which persist via [`super::ConfigLoader`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{DocError, Result};

// =============================================================================
// Provider
// =============================================================================

/// Supported LLM backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    Openai,
    AzureOpenai,
    Ollama,
    Claude,
    GoogleGenerativeai,
}

impl Provider {
    /// Canonical tag as written in config files and CLI arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Openai => "openai",
            Self::AzureOpenai => "azure-openai",
            Self::Ollama => "ollama",
            Self::Claude => "claude",
            Self::GoogleGenerativeai => "google-generativeai",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "openai" => Ok(Self::Openai),
            "azure-openai" => Ok(Self::AzureOpenai),
            "ollama" => Ok(Self::Ollama),
            "claude" => Ok(Self::Claude),
            "google-generativeai" => Ok(Self::GoogleGenerativeai),
            _ => Err(DocError::Config(format!(
                "unsupported provider '{}'. Supported: openai, azure-openai, ollama, claude, google-generativeai",
                s
            ))),
        }
    }
}

// =============================================================================
// Model Configuration
// =============================================================================

/// One configured model record, keyed by alias in [`Config::models`].
///
/// The API key is stored in the user's own config file (as the key they
/// entered), but is redacted in debug output and masked in listings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub provider: Provider,
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("model_name", &self.model_name)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ModelConfig {
    /// API key with all but the first and last two characters replaced
    pub fn masked_key(&self) -> String {
        match self.key.as_deref() {
            None | Some("") => "(none)".to_string(),
            Some(key) if key.len() <= 4 => "*".repeat(key.len()),
            Some(key) => {
                format!("{}{}{}", &key[..2], "*".repeat(key.len() - 4), &key[key.len() - 2..])
            }
        }
    }
}

// =============================================================================
// Config
// =============================================================================

/// Root configuration: a default alias plus alias → model records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Alias used when a task names no model
    pub default_model: String,
    /// All configured models, keyed by alias
    pub models: BTreeMap<String, ModelConfig>,
}

impl Config {
    /// Resolve a task's model: explicit alias → configured default → error.
    pub fn resolve<'a>(&'a self, alias: Option<&'a str>) -> Result<(&'a str, &'a ModelConfig)> {
        let alias = match alias {
            Some(a) => a,
            None if !self.default_model.is_empty() => self.default_model.as_str(),
            None => {
                return Err(DocError::config(
                    "no default model configured. Run 'doc-gpt config' to add one",
                ));
            }
        };

        let model = self.models.get(alias).ok_or_else(|| {
            DocError::Config(format!("model alias '{}' not found in configuration", alias))
        })?;

        Ok((alias, model))
    }

    /// Add or replace a model record. The first configured alias becomes the
    /// default when none is set yet.
    pub fn upsert_model(&mut self, alias: impl Into<String>, model: ModelConfig) {
        let alias = alias.into();
        if self.default_model.is_empty() {
            self.default_model = alias.clone();
        }
        self.models.insert(alias, model);
    }

    /// Set the default alias; the alias must already be configured.
    pub fn set_default(&mut self, alias: &str) -> Result<()> {
        if !self.models.contains_key(alias) {
            return Err(DocError::Config(format!(
                "model alias '{}' not found in configuration",
                alias
            )));
        }
        self.default_model = alias.to_string();
        Ok(())
    }

    /// Remove a model record by alias. Clears the default if it pointed here.
    pub fn remove_model(&mut self, alias: &str) -> Result<ModelConfig> {
        let removed = self.models.remove(alias).ok_or_else(|| {
            DocError::Config(format!("no configuration found for alias '{}'", alias))
        })?;
        if self.default_model == alias {
            self.default_model.clear();
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(provider: Provider) -> ModelConfig {
        ModelConfig {
            provider,
            model_name: "test-model".to_string(),
            key: Some("sk-abcdef123456".to_string()),
            api_base: None,
            max_tokens: None,
        }
    }

    #[test]
    fn test_resolve_explicit_alias() {
        let mut config = Config::default();
        config.upsert_model("gpt", model(Provider::Openai));

        let (alias, resolved) = config.resolve(Some("gpt")).unwrap();
        assert_eq!(alias, "gpt");
        assert_eq!(resolved.provider, Provider::Openai);
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let mut config = Config::default();
        config.upsert_model("local", model(Provider::Ollama));

        // first upsert became the default
        let (alias, _) = config.resolve(None).unwrap();
        assert_eq!(alias, "local");
    }

    #[test]
    fn test_resolve_no_default_is_config_error() {
        let config = Config::default();
        let err = config.resolve(None).unwrap_err();
        assert!(matches!(err, DocError::Config(_)));
        assert!(err.to_string().contains("no default model"));
    }

    #[test]
    fn test_resolve_unknown_alias() {
        let mut config = Config::default();
        config.upsert_model("gpt", model(Provider::Openai));

        let err = config.resolve(Some("missing")).unwrap_err();
        assert!(err.to_string().contains("'missing' not found"));
    }

    #[test]
    fn test_set_default_requires_known_alias() {
        let mut config = Config::default();
        assert!(config.set_default("nope").is_err());

        config.upsert_model("gpt", model(Provider::Openai));
        config.upsert_model("local", model(Provider::Ollama));
        config.set_default("local").unwrap();
        assert_eq!(config.default_model, "local");
    }

    #[test]
    fn test_remove_model_clears_default() {
        let mut config = Config::default();
        config.upsert_model("gpt", model(Provider::Openai));
        config.remove_model("gpt").unwrap();
        assert!(config.default_model.is_empty());
        assert!(config.models.is_empty());
    }

    #[test]
    fn test_masked_key() {
        let m = model(Provider::Openai);
        let masked = m.masked_key();
        assert!(masked.starts_with("sk"));
        assert!(masked.ends_with("56"));
        assert!(masked.contains('*'));
        assert!(!masked.contains("abcdef"));
    }

    #[test]
    fn test_provider_round_trip() {
        for tag in [
            "openai",
            "azure-openai",
            "ollama",
            "claude",
            "google-generativeai",
        ] {
            let provider: Provider = tag.parse().unwrap();
            assert_eq!(provider.as_str(), tag);
        }
        assert!("bedrock".parse::<Provider>().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let m = model(Provider::Claude);
        let debug = format!("{:?}", m);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("abcdef"));
    }
}
