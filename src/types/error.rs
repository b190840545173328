//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Scope
//!
//! Every error in this taxonomy is task-scoped: a failing task is caught at
//! its own boundary, reported, and never aborts sibling tasks in a batch.
//! Only CLI argument and config-command errors surface as a non-zero exit.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // -------------------------------------------------------------------------
    // Task Errors
    // -------------------------------------------------------------------------
    /// Invalid user input for a task (empty prompt, missing argument)
    #[error("Usage error: {0}")]
    Usage(String),

    /// Invalid or incomplete model configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Source could not be read or decoded
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Provider request failed (network or non-success status)
    #[error("Dispatch error ({provider}): {message}")]
    Dispatch {
        provider: &'static str,
        message: String,
    },
}

impl DocError {
    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an extraction error
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Create a dispatch error with provider context
    pub fn dispatch(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Dispatch {
            provider,
            message: message.into(),
        }
    }

    /// Config error for a required provider field that is absent
    pub fn missing_field(provider: &'static str, field: &'static str) -> Self {
        Self::Config(format!(
            "missing required field '{}' for provider '{}'",
            field, provider
        ))
    }
}

pub type Result<T> = std::result::Result<T, DocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_the_field() {
        let err = DocError::missing_field("openai", "key");
        let msg = err.to_string();
        assert!(msg.contains("'key'"));
        assert!(msg.contains("'openai'"));
    }

    #[test]
    fn test_dispatch_display_includes_provider() {
        let err = DocError::dispatch("ollama", "connection refused");
        assert_eq!(
            err.to_string(),
            "Dispatch error (ollama): connection refused"
        );
    }
}
