//! Configuration
//!
//! Alias → model records, loading, and persistence.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Config, ModelConfig, Provider};
