//! doc-gpt - Document-Driven Content Generation
//!
//! Extracts text from documents (txt/md/pdf/docx/pptx), directories, or web
//! pages, combines it with a prompt and optional system instructions, sends
//! the assembled message sequence to a configured LLM backend, and appends
//! the reply to an output file.
//!
//! ## Pipeline
//!
//! resolve → (per input, concurrently within a batch chunk)
//! extract → build → dispatch → write
//!
//! ## Modules
//!
//! - [`resolve`]: expand a path/URL/directory into extractable sources
//! - [`extract`]: format-agnostic text extraction
//! - [`message`]: prompt resolution and message assembly
//! - [`provider`]: one dispatcher per LLM backend
//! - [`pipeline`]: per-task runner and the chunked batch coordinator
//! - [`output`]: append-only output aggregation
//! - [`config`]: alias → model records and persistence

pub mod cli;
pub mod config;
pub mod constants;
pub mod extract;
pub mod message;
pub mod output;
pub mod pipeline;
pub mod provider;
pub mod resolve;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, ModelConfig, Provider};

// Error Types
pub use types::error::{DocError, Result};

// Core Types
pub use types::{Message, MessageSequence, Role, Source, Task};

// Pipeline
pub use pipeline::{BatchReport, Pipeline, run_batch, run_chunked};

// Providers
pub use provider::{Dispatcher, create_dispatcher};
