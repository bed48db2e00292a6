use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use kanal::AsyncReceiver;
use restamp_config::Config;
use restamp_ocr::OcrEngine;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::cli::Cli;
use crate::pipeline::{self, ImageOutcome, JobContext};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

pub fn scan_input_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read input dir {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            files.push(path);
        } else {
            tracing::info!("skipping {}", path.display());
        }
    }
    files.sort();
    Ok(files)
}

/// Process every image in the input directory, a worker task per image.
///
/// Images are independent, so workers only share the read-only job context;
/// the semaphore caps concurrency and the cancellation token lets Ctrl+C
/// stop new work while in-flight images finish.
pub async fn run(
    cli: Cli,
    config: Arc<Config>,
    engine: Arc<OcrEngine>,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("failed to create output dir {}", cli.output_dir.display()))?;

    let files = scan_input_dir(&cli.input_dir)?;
    if files.is_empty() {
        tracing::warn!("no images found in {}", cli.input_dir.display());
        return Ok(());
    }

    let jobs = match cli.jobs {
        0 => config.batch.jobs,
        n => n,
    };
    let jobs = if jobs == 0 {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    } else {
        jobs
    };
    tracing::info!("processing {} images with {} workers", files.len(), jobs);

    let ctx = Arc::new(JobContext::from_cli(&cli, config, engine));
    let cancel = CancellationToken::new();
    let semaphore = Arc::new(Semaphore::new(jobs));
    let (outcome_tx, outcome_rx) = kanal::bounded_async::<ImageOutcome>(256);

    let total = files.len();
    let collector = tokio::spawn(collect_outcomes(outcome_rx, total));

    let mut workers = JoinSet::new();
    for input in files {
        let output = cli.output_dir.join(input.file_name().unwrap_or_default());
        let ctx = ctx.clone();
        let semaphore = semaphore.clone();
        let cancel = cancel.child_token();
        let tx = outcome_tx.clone();

        workers.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            if cancel.is_cancelled() {
                return;
            }
            let result = pipeline::process_image(&input, &output, &ctx).await;
            let _ = tx.send(ImageOutcome { input, result }).await;
        });
    }
    drop(outcome_tx);

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            cancel.cancel();
        }
        _ = async { while workers.join_next().await.is_some() {} } => {}
    }
    while workers.join_next().await.is_some() {}

    let (done, failed) = collector.await.unwrap_or((0, 0));
    tracing::info!("batch complete: {done} written, {failed} failed");
    Ok(())
}

/// Log worker outcomes as they land and tally the final summary.
pub async fn collect_outcomes(rx: AsyncReceiver<ImageOutcome>, total: usize) -> (usize, usize) {
    let mut done = 0usize;
    let mut failed = 0usize;

    while let Ok(outcome) = rx.recv().await {
        match outcome.result {
            Ok(()) => {
                done += 1;
                tracing::info!("[{}/{}] {}", done + failed, total, outcome.input.display());
            }
            Err(e) => {
                failed += 1;
                tracing::error!(
                    "[{}/{}] {} failed: {e:#}",
                    done + failed,
                    total,
                    outcome.input.display()
                );
            }
        }
    }

    (done, failed)
}
