//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. User config (~/.config/doc-gpt/config.toml)
//! 3. Environment variables (DOC_GPT_* prefix)
//!
//! Mutations from the config CLI commands are written back as TOML to the
//! user config file.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use tracing::debug;

use super::types::Config;
use crate::types::{DocError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full resolution chain:
    /// defaults → user config file → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = Self::config_path()
            && path.exists()
        {
            debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }

        figment = figment.merge(Env::prefixed("DOC_GPT_").split("__").lowercase(true));

        figment
            .extract()
            .map_err(|e| DocError::Config(format!("configuration error: {}", e)))
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| DocError::Config(format!("configuration error: {}", e)))
    }

    /// Persist configuration to the user config file
    pub fn save(config: &Config) -> Result<PathBuf> {
        let path = Self::config_path()
            .ok_or_else(|| DocError::config("cannot determine user config directory"))?;
        Self::save_to_file(config, &path)?;
        Ok(path)
    }

    /// Persist configuration to a specific file
    pub fn save_to_file(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let rendered = toml::to_string_pretty(config)
            .map_err(|e| DocError::Config(format!("cannot serialize configuration: {}", e)))?;
        fs::write(path, rendered)?;
        Ok(())
    }

    /// Path of the user config file (~/.config/doc-gpt/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "doc-gpt").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
