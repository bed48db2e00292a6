use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod batch;
mod cli;
mod pipeline;
mod profile;

#[cfg(test)]
mod tests;

use self::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Arc::new(profile::load_config());

    let engine = restamp_ocr::OcrEngine::new(&config.ocr);
    if let Err(e) = engine.probe().await {
        tracing::error!("OCR engine unavailable: {e:#}");
        anyhow::bail!("exiting due to OCR init failure");
    }

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    batch::run(cli, config, Arc::new(engine), shutdown).await
}
