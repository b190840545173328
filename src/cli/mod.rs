//! Command-Line Interface
//!
//! Command handlers and the interactive prompt fallback.

pub mod commands;
pub mod prompt;
