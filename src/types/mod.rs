//! Core Types
//!
//! Sources, chat messages, and the per-input unit of work.

pub mod error;

pub use error::{DocError, Result};

use std::path::{Path, PathBuf};

use serde::Serialize;
use url::Url;

// =============================================================================
// Source
// =============================================================================

/// A single extractable input: a local file (or directory) or a remote page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(Url),
}

impl Source {
    /// Classify a raw user input string.
    ///
    /// Anything that parses as an absolute http(s) URL with a host is remote;
    /// everything else is treated as a local path.
    pub fn parse(input: &str) -> Self {
        if let Ok(url) = Url::parse(input)
            && matches!(url.scheme(), "http" | "https")
            && url.host_str().is_some()
        {
            return Self::Url(url);
        }
        Self::File(PathBuf::from(input))
    }

    /// Short human-readable name for logs and per-task reports
    pub fn display_name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.to_string(),
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Url(_) => None,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Ordered message list: at most one system message, always first, followed
/// by exactly one user message.
pub type MessageSequence = Vec<Message>;

// =============================================================================
// Task
// =============================================================================

/// Ephemeral unit of work for one resolved input.
///
/// Created per input by the batch coordinator, consumed entirely within one
/// pipeline run, never persisted.
#[derive(Debug, Clone)]
pub struct Task {
    /// Input to extract and generate from
    pub input: Source,
    /// Explicit output target; derived from the input when absent
    pub output: Option<PathBuf>,
    /// Model alias; the configured default when absent
    pub model_alias: Option<String>,
    /// Explicit prompt source; falls back to ./prompt.md, then interactive
    pub prompt_file: Option<String>,
    /// Explicit instructions source; falls back to ./instructions.md, then none
    pub instructions_file: Option<String>,
    /// Write the full message transcript instead of the raw reply
    pub include_prompt: bool,
    /// Per-task max_tokens override
    pub max_tokens: Option<u32>,
}

impl Task {
    /// Create a task with only an input; everything else defaulted.
    pub fn new(input: Source) -> Self {
        Self {
            input,
            output: None,
            model_alias: None,
            prompt_file: None,
            instructions_file: None,
            include_prompt: false,
            max_tokens: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse_url() {
        let source = Source::parse("https://example.com/page");
        assert!(matches!(source, Source::Url(_)));
    }

    #[test]
    fn test_source_parse_url_with_port() {
        let source = Source::parse("http://localhost:8080/docs");
        assert!(matches!(source, Source::Url(_)));
    }

    #[test]
    fn test_source_parse_path() {
        let source = Source::parse("docs/report.pdf");
        assert_eq!(source, Source::File(PathBuf::from("docs/report.pdf")));
    }

    #[test]
    fn test_source_parse_rejects_other_schemes() {
        // ftp parses as a URL but is not a fetchable source for us
        let source = Source::parse("ftp://example.com/file.txt");
        assert!(matches!(source, Source::File(_)));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = Message::system("follow the rules");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
    }
}
