//! Config Commands
//!
//! Alias CRUD over the user config file: add or update a model, set the
//! default alias, delete an alias, and list everything with masked keys.

use console::style;

use crate::config::{ConfigLoader, ModelConfig, Provider};
use crate::types::Result;

/// Add a new model record or update an existing one.
pub fn register(
    alias: String,
    model_name: String,
    provider: Provider,
    key: Option<String>,
    api_base: Option<String>,
    max_tokens: Option<u32>,
) -> Result<()> {
    let mut config = ConfigLoader::load()?;

    let existed = config.models.contains_key(&alias);
    config.upsert_model(
        &alias,
        ModelConfig {
            provider,
            model_name,
            key,
            api_base,
            max_tokens,
        },
    );
    let path = ConfigLoader::save(&config)?;

    let verb = if existed { "updated" } else { "added" };
    println!("Configuration {} for model alias '{}'", verb, alias);
    println!("  File: {}", path.display());
    Ok(())
}

/// Set the default model alias.
pub fn set_default(alias: &str) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    config.set_default(alias)?;
    ConfigLoader::save(&config)?;
    println!("Default model set to '{}'", alias);
    Ok(())
}

/// Delete a model configuration by alias.
pub fn delete(alias: &str) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    let removed = config.remove_model(alias)?;
    ConfigLoader::save(&config)?;

    println!("Deleted configuration for alias '{}'", alias);
    println!("  Model Name: {}", removed.model_name);
    println!("  Provider:   {}", removed.provider);
    println!("  API Key:    {}", removed.masked_key());
    Ok(())
}

/// Show all models with their provider and masked key.
pub fn show_models() -> Result<()> {
    let config = ConfigLoader::load()?;

    if config.models.is_empty() {
        eprintln!("{}", style("No models configured.").yellow());
        return Ok(());
    }

    println!("Configured models:");
    for (alias, model) in &config.models {
        let default_marker = if *alias == config.default_model {
            " (default)"
        } else {
            ""
        };
        println!("- Alias: {}{}", alias, default_marker);
        println!("  Model Name: {}", model.model_name);
        println!("  Provider:   {}", model.provider);
        println!("  API Key:    {}", model.masked_key());
        println!(
            "  API Base:   {}",
            model.api_base.as_deref().unwrap_or("(default)")
        );
        println!();
    }
    Ok(())
}
