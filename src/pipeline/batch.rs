//! Batch Coordinator
//!
//! Partitions work into consecutive chunks and runs each chunk's items
//! concurrently, draining the whole chunk before the next one starts
//! (a strict barrier between chunks; no ordering guarantee within one).

use std::future::Future;

use futures::StreamExt;
use tracing::warn;

use super::Pipeline;
use crate::types::Task;

/// Outcome summary of one batch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub completed: usize,
    pub failed: usize,
}

/// Run a closure over every item, `chunk_size` at a time.
///
/// Items within a chunk run concurrently via `buffer_unordered`; chunks run
/// strictly sequentially. Results are returned in completion order.
pub async fn run_chunked<T, F, Fut, R>(items: Vec<T>, chunk_size: usize, f: F) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let chunk_size = chunk_size.max(1);
    let mut results = Vec::with_capacity(items.len());
    let mut remaining = items.into_iter();

    loop {
        let chunk: Vec<T> = remaining.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }

        let width = chunk.len();
        let mut stream = futures::stream::iter(chunk).map(&f).buffer_unordered(width);
        while let Some(result) = stream.next().await {
            results.push(result);
        }
    }

    results
}

/// Run the full per-input pipeline for every task, `batch_size` at a time.
///
/// Each task is caught at its own boundary: a failing task is reported and
/// counted, and its siblings run to completion regardless.
pub async fn run_batch(pipeline: &Pipeline, tasks: Vec<Task>, batch_size: usize) -> BatchReport {
    let outcomes = run_chunked(tasks, batch_size, |task| async move {
        let name = task.input.display_name();
        match pipeline.run_task(&task).await {
            Ok(path) => {
                println!("Output written to {}", path.display());
                true
            }
            Err(e) => {
                warn!("Task failed for {}: {}", name, e);
                eprintln!("{}: {}", name, e);
                false
            }
        }
    })
    .await;

    let completed = outcomes.iter().filter(|ok| **ok).count();
    BatchReport {
        completed,
        failed: outcomes.len() - completed,
    }
}
