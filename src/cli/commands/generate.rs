//! Generate Command
//!
//! Resolves the input into sources, builds one task per source, and runs the
//! batch. Per-task failures are reported but never change the exit code.

use std::path::PathBuf;
use std::sync::Arc;

use console::style;

use crate::cli::prompt::TerminalPrompt;
use crate::config::ConfigLoader;
use crate::pipeline::{self, Pipeline};
use crate::types::{Result, Source, Task};

/// Options for one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: String,
    pub output: Option<PathBuf>,
    pub model_alias: Option<String>,
    pub prompt_file: Option<String>,
    pub instructions_file: Option<String>,
    pub batch_size: usize,
    pub include_prompt: bool,
    pub max_tokens: Option<u32>,
}

pub async fn run(options: GenerateOptions) -> Result<()> {
    let template = Task {
        // placeholder; replaced per resolved source
        input: Source::parse(&options.input),
        output: options.output,
        model_alias: options.model_alias,
        prompt_file: options.prompt_file,
        instructions_file: options.instructions_file,
        include_prompt: options.include_prompt,
        max_tokens: options.max_tokens,
    };

    let tasks = pipeline::tasks_for_input(&options.input, &template);
    if tasks.is_empty() {
        eprintln!("{}", style("No valid files found.").yellow());
        return Ok(());
    }

    let config = ConfigLoader::load()?;
    let pipeline = Pipeline::new(config, Arc::new(TerminalPrompt));
    let report = pipeline::run_batch(&pipeline, tasks, options.batch_size).await;

    if report.failed > 0 {
        eprintln!(
            "{}",
            style(format!(
                "{} task(s) completed, {} failed.",
                report.completed, report.failed
            ))
            .yellow()
        );
    } else {
        println!(
            "{}",
            style("Content generation completed successfully.").green()
        );
    }

    Ok(())
}
