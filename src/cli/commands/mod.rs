//! CLI command handlers

pub mod config;
pub mod extract;
pub mod generate;
