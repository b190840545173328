//! Global Constants
//!
//! Centralized constants for extraction, prompting, and output conventions.

/// File extensions the extractor understands (lowercase, no leading dot).
pub const RECOGNIZED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md", "pptx"];

/// Output file conventions
pub mod output {
    /// Suffix appended to derived output filenames for generated content
    pub const GENERATED_SUFFIX: &str = ".doc-gpt.md";

    /// Suffix appended to derived output filenames for extraction-only runs
    pub const EXTRACTED_SUFFIX: &str = ".doc-gpt.txt";

    /// Divider written between successive entries in a shared output file
    pub const ENTRY_DIVIDER: &str = "\n------\n\n";

    /// Maximum length of a filename derived from a URL
    pub const MAX_DERIVED_NAME_LEN: usize = 100;
}

/// Prompt discovery and message template conventions
pub mod prompt {
    /// Prompt file looked up in the working directory when none is given
    pub const DEFAULT_PROMPT_FILE: &str = "prompt.md";

    /// Instructions file looked up in the working directory when none is given
    pub const DEFAULT_INSTRUCTIONS_FILE: &str = "instructions.md";

    /// Tag wrapping the extracted document text in the user message
    pub const DOCUMENT_TAG: &str = "ProvidedDocument";
}

/// Provider endpoint defaults
pub mod endpoints {
    /// Default OpenAI API base
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

    /// Default Ollama API base
    pub const OLLAMA_API_BASE: &str = "http://localhost:11434";

    /// Default Anthropic API base
    pub const CLAUDE_API_BASE: &str = "https://api.anthropic.com";

    /// Default Google Generative AI API base
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

    /// Azure OpenAI chat completions API version
    pub const AZURE_API_VERSION: &str = "2024-02-01";

    /// Anthropic API version header value
    pub const CLAUDE_API_VERSION: &str = "2023-06-01";

    /// Default max_tokens for Claude when none is configured
    pub const CLAUDE_DEFAULT_MAX_TOKENS: u32 = 1024;
}
