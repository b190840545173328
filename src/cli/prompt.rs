//! Interactive Prompt Input
//!
//! Terminal fallback used when no prompt file is given and no ./prompt.md
//! exists. Injected into the pipeline as a [`PromptInput`] so the core never
//! touches the terminal directly.

use console::Term;

use crate::message::PromptInput;
use crate::types::Result;

/// Reads the prompt from the user's terminal.
pub struct TerminalPrompt;

impl PromptInput for TerminalPrompt {
    fn read_prompt(&self) -> Result<String> {
        let term = Term::stderr();
        term.write_str("Enter your prompt: ")?;
        Ok(term.read_line()?)
    }
}
