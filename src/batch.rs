//! Batch compression of independent files
//!
//! Each file is compressed on its own blocking task; a single text is never
//! split across tasks. Concurrency is capped by `batch_concurrency`.

use crate::error::{CompressError, Result};
use crate::{default_output_path, CompressionReport, Compressor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// One job per input, writing `<stem>_comp.bin` into `out_dir`.
pub fn jobs_for(inputs: &[PathBuf], out_dir: &Path) -> Vec<BatchJob> {
    inputs
        .iter()
        .map(|input| BatchJob {
            input: input.clone(),
            output: default_output_path(input, out_dir),
        })
        .collect()
}

/// Compress every job, returning results in job order.
pub async fn compress_batch(
    compressor: Arc<Compressor>,
    jobs: Vec<BatchJob>,
) -> Vec<Result<CompressionReport>> {
    let limit = compressor.config().batch_concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(limit));
    debug!(jobs = jobs.len(), limit, "starting batch");

    let handles: Vec<_> = jobs
        .into_iter()
        .map(|job| {
            let semaphore = semaphore.clone();
            let compressor = compressor.clone();
            tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| CompressError::BatchError(e.to_string()))?;
                tokio::task::spawn_blocking(move || compressor.compress_file(&job.input, &job.output))
                    .await
                    .map_err(|e| CompressError::BatchError(e.to_string()))?
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(
            handle
                .await
                .unwrap_or_else(|e| Err(CompressError::BatchError(e.to_string()))),
        );
    }
    results
}
