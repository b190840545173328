//! Content-Generation Pipeline
//!
//! The per-input pipeline (extract → build → dispatch → write) and the
//! batch coordinator that runs it over many inputs. Configuration is read
//! once per task construction and treated as immutable from then on.

pub mod batch;

pub use batch::{BatchReport, run_batch, run_chunked};

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::constants::output as output_const;
use crate::message::{self, PromptInput};
use crate::output;
use crate::provider;
use crate::types::{Result, Task};
use crate::{extract, resolve};

/// Per-input pipeline runner.
///
/// Owns the loaded configuration and the prompt fallback; everything else a
/// task needs is local to one `run_task` call, so concurrent tasks share no
/// mutable state.
pub struct Pipeline {
    config: Config,
    prompt_input: Arc<dyn PromptInput>,
}

impl Pipeline {
    pub fn new(config: Config, prompt_input: Arc<dyn PromptInput>) -> Self {
        Self {
            config,
            prompt_input,
        }
    }

    /// Run one task end to end: extract the input, assemble the message
    /// sequence, dispatch it, and append the reply to the output target.
    ///
    /// Every failure surfaces here and is caught by the batch coordinator at
    /// this boundary; nothing propagates across tasks.
    pub async fn run_task(&self, task: &Task) -> Result<PathBuf> {
        info!("Processing task for {}", task.input);

        let (alias, model) = self.config.resolve(task.model_alias.as_deref())?;
        let mut model = model.clone();
        if task.max_tokens.is_some() {
            model.max_tokens = task.max_tokens;
        }

        let document = extract::extract(&task.input).await;
        let prompt =
            message::resolve_prompt(task.prompt_file.as_deref(), self.prompt_input.as_ref())
                .await?;
        let instructions = message::resolve_instructions(task.instructions_file.as_deref()).await;

        let messages = message::build(&document, &prompt, &instructions)?;

        let dispatcher = provider::create_dispatcher(&model)?;
        info!("Requesting generation via alias '{}'", alias);
        let generated = dispatcher.dispatch(&messages).await?;

        let content = if task.include_prompt {
            output::format_transcript(&messages, &generated)
        } else {
            generated
        };

        output::write(
            &content,
            task.output.as_deref(),
            &task.input,
            output_const::GENERATED_SUFFIX,
        )
    }
}

/// Resolve an input and fan it out into per-source tasks.
///
/// Every task carries its own copy of the shared options; units never share
/// mutable state.
pub fn tasks_for_input(input: &str, template: &Task) -> Vec<Task> {
    resolve::resolve(input)
        .into_iter()
        .map(|source| Task {
            input: source,
            ..template.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModelConfig, Provider};
    use crate::types::{DocError, Source};
    use tempfile::TempDir;

    struct NoPrompt;

    impl PromptInput for NoPrompt {
        fn read_prompt(&self) -> Result<String> {
            Err(DocError::usage("no interactive terminal in tests"))
        }
    }

    fn pipeline_with(config: Config) -> Pipeline {
        Pipeline::new(config, Arc::new(NoPrompt))
    }

    #[tokio::test]
    async fn test_unknown_alias_aborts_only_this_task() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("doc.txt");
        std::fs::write(&input, "text").unwrap();

        let mut task = Task::new(Source::File(input));
        task.model_alias = Some("missing".to_string());

        let err = pipeline_with(Config::default())
            .run_task(&task)
            .await
            .unwrap_err();
        assert!(matches!(err, DocError::Config(_)));
    }

    #[tokio::test]
    async fn test_end_to_end_with_stub_backend() {
        // stub provider: an ollama-shaped mock that echoes a fixed reply
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            // the backend must receive exactly one user message in the
            // fixed wrapped-document template, with no system preamble
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "messages": [{
                    "role": "user",
                    "content": "<ProvidedDocument>\nHello world\n</ProvidedDocument>\n\nSummarize."
                }]
            })))
            .with_status(200)
            .with_body(r#"{"message":{"content":"echoed summary"}}"#)
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let input = temp.path().join("doc.txt");
        std::fs::write(&input, "Hello world").unwrap();
        let prompt_file = temp.path().join("ask.md");
        std::fs::write(&prompt_file, "Summarize.").unwrap();
        let out = temp.path().join("result.md");

        let mut config = Config::default();
        config.upsert_model(
            "stub",
            ModelConfig {
                provider: Provider::Ollama,
                model_name: "stub".to_string(),
                key: None,
                api_base: Some(server.url()),
                max_tokens: None,
            },
        );

        let mut task = Task::new(Source::File(input));
        task.prompt_file = Some(prompt_file.to_string_lossy().into_owned());
        task.output = Some(out.clone());

        let written = pipeline_with(config).run_task(&task).await.unwrap();
        assert_eq!(written, out);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "echoed summary\n");
    }

    #[tokio::test]
    async fn test_include_prompt_writes_transcript() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"message":{"content":"reply"}}"#)
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let input = temp.path().join("doc.txt");
        std::fs::write(&input, "body").unwrap();
        let prompt_file = temp.path().join("ask.md");
        std::fs::write(&prompt_file, "Go.").unwrap();
        let out = temp.path().join("result.md");

        let mut config = Config::default();
        config.upsert_model(
            "stub",
            ModelConfig {
                provider: Provider::Ollama,
                model_name: "stub".to_string(),
                key: None,
                api_base: Some(server.url()),
                max_tokens: None,
            },
        );

        let mut task = Task::new(Source::File(input));
        task.prompt_file = Some(prompt_file.to_string_lossy().into_owned());
        task.output = Some(out.clone());
        task.include_prompt = true;

        pipeline_with(config).run_task(&task).await.unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("# user\n\n<ProvidedDocument>\nbody\n</ProvidedDocument>"));
        assert!(written.contains("# response\n\nreply"));
    }
}
