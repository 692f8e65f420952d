//! Bounded worker pool.

use anyhow::Context;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::thread;
use tracing::dispatcher::{self, Dispatch};

use crate::error::Result;

/// Default pool size: the machine's available parallelism.
pub fn default_jobs() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Apply `task` to every item on a dedicated pool of at most `jobs` threads.
///
/// The pool is joined before returning and results come back in item
/// order. Workers log through the caller's subscriber.
pub fn run_bounded<T, R, F>(items: &[T], jobs: usize, task: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let workers = jobs.clamp(1, items.len());
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("devprov-worker-{}", index))
        .build()
        .context("building install thread pool")?;

    tracing::debug!("Starting {} worker(s) for {} item(s)", workers, items.len());

    let dispatch: Dispatch = dispatcher::get_default(Dispatch::clone);
    let results: Vec<R> = pool.install(|| {
        items
            .par_iter()
            .map(|item| dispatcher::with_default(&dispatch, || task(item)))
            .collect()
    });

    Ok(results)
}
