use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doc_gpt::config::Provider;

#[derive(Parser)]
#[command(name = "doc-gpt")]
#[command(
    version,
    about = "Generate content from documents and web pages with configurable LLM backends"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate content using the specified model and input
    #[command(alias = "g")]
    Generate {
        #[arg(short, long, help = "Input file, directory, or URL")]
        input: String,
        #[arg(short, long, help = "Output file or directory")]
        output: Option<PathBuf>,
        #[arg(short, long, help = "Model alias")]
        model_alias: Option<String>,
        #[arg(short, long, help = "Prompt file (or URL)")]
        prompt: Option<String>,
        #[arg(short = 's', long, help = "Instructions file (or URL)")]
        instructions: Option<String>,
        #[arg(
            short,
            long,
            default_value = "1",
            help = "Number of tasks to run concurrently"
        )]
        batch_size: usize,
        #[arg(long, help = "Write the full prompt transcript alongside the reply")]
        include_prompt: bool,
        #[arg(long, help = "Max tokens override for this run")]
        max_tokens: Option<u32>,
    },

    /// Extract text from an input without calling a model
    Extract {
        #[arg(short, long, help = "Input file, directory, or URL")]
        input: String,
        #[arg(short, long, help = "Output file or directory")]
        output: Option<PathBuf>,
    },

    /// Configure a new model or update an existing one
    Config {
        #[arg(short, long, help = "Model alias")]
        alias: String,
        #[arg(short, long, help = "Model name")]
        model_name: String,
        #[arg(short, long, help = "Provider name", value_parser = parse_provider)]
        provider: Provider,
        #[arg(short, long, help = "API key")]
        key: Option<String>,
        #[arg(short = 'b', long, help = "API base URL")]
        api_base: Option<String>,
        #[arg(long, help = "Default max tokens for this model")]
        max_tokens: Option<u32>,
    },

    /// Set the default model
    SetDefault {
        #[arg(help = "Model alias")]
        alias: String,
    },

    /// Delete a model configuration by alias
    DeleteConfig {
        #[arg(help = "Model alias")]
        alias: String,
    },

    /// Show all models with their provider and masked key
    ShowModels,
}

fn parse_provider(s: &str) -> Result<Provider, String> {
    s.parse().map_err(|e: doc_gpt::DocError| e.to_string())
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", console::style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            input,
            output,
            model_alias,
            prompt,
            instructions,
            batch_size,
            include_prompt,
            max_tokens,
        } => {
            let options = doc_gpt::cli::commands::generate::GenerateOptions {
                input,
                output,
                model_alias,
                prompt_file: prompt,
                instructions_file: instructions,
                batch_size,
                include_prompt,
                max_tokens,
            };
            let rt = Runtime::new()?;
            rt.block_on(doc_gpt::cli::commands::generate::run(options))?;
        }
        Commands::Extract { input, output } => {
            let rt = Runtime::new()?;
            rt.block_on(doc_gpt::cli::commands::extract::run(&input, output))?;
        }
        Commands::Config {
            alias,
            model_name,
            provider,
            key,
            api_base,
            max_tokens,
        } => {
            doc_gpt::cli::commands::config::register(
                alias, model_name, provider, key, api_base, max_tokens,
            )?;
        }
        Commands::SetDefault { alias } => {
            doc_gpt::cli::commands::config::set_default(&alias)?;
        }
        Commands::DeleteConfig { alias } => {
            doc_gpt::cli::commands::config::delete(&alias)?;
        }
        Commands::ShowModels => {
            doc_gpt::cli::commands::config::show_models()?;
        }
    }

    Ok(())
}
