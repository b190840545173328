//! Message Builder
//!
//! Resolves prompt and instructions text, then assembles the message
//! sequence sent to a provider: an optional system message followed by one
//! user message holding the wrapped document text and the prompt.

use std::path::Path;

use crate::constants::prompt as prompt_const;
use crate::extract;
use crate::types::{DocError, Message, MessageSequence, Result, Source};

/// Fallback source for prompt text when no file is available.
///
/// The terminal implementation lives with the CLI; tests inject stubs.
pub trait PromptInput: Send + Sync {
    fn read_prompt(&self) -> Result<String>;
}

/// Resolve prompt text: explicit source → ./prompt.md → interactive input.
///
/// File-based prompts go through the extractor, so a PDF or remote prompt
/// works the same as a markdown file.
pub async fn resolve_prompt(explicit: Option<&str>, fallback: &dyn PromptInput) -> Result<String> {
    if let Some(spec) = explicit {
        return Ok(extract::extract(&Source::parse(spec)).await);
    }

    let default_file = Path::new(prompt_const::DEFAULT_PROMPT_FILE);
    if default_file.exists() {
        return Ok(extract::extract(&Source::File(default_file.to_path_buf())).await);
    }

    fallback.read_prompt()
}

/// Resolve instructions text: explicit source → ./instructions.md → empty.
pub async fn resolve_instructions(explicit: Option<&str>) -> String {
    if let Some(spec) = explicit {
        return extract::extract(&Source::parse(spec)).await;
    }

    let default_file = Path::new(prompt_const::DEFAULT_INSTRUCTIONS_FILE);
    if default_file.exists() {
        return extract::extract(&Source::File(default_file.to_path_buf())).await;
    }

    String::new()
}

/// Assemble the message sequence.
///
/// The user message is always the fixed template: document text wrapped in
/// the delimiting tag, a blank line, then the prompt verbatim. Non-empty
/// instructions become a system message prepended to the sequence. An empty
/// or whitespace-only prompt is a usage error.
pub fn build(document: &str, prompt: &str, instructions: &str) -> Result<MessageSequence> {
    if prompt.trim().is_empty() {
        return Err(DocError::usage("prompt cannot be empty"));
    }

    let mut messages = Vec::with_capacity(2);
    if !instructions.trim().is_empty() {
        messages.push(Message::system(instructions));
    }

    let tag = prompt_const::DOCUMENT_TAG;
    messages.push(Message::user(format!(
        "<{tag}>\n{document}\n</{tag}>\n\n{prompt}"
    )));

    Ok(messages)
}
