use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use restamp_config::ocr::OcrConfig;
use restamp_types::Token;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::tsv;

/// Word-level OCR over a Tesseract-compatible binary.
///
/// The image is fed on stdin and tokens are read back from the TSV output,
/// so no intermediate files are written.
pub struct OcrEngine {
    binary: String,
    language: String,
    psm: u32,
    timeout: Duration,
}

impl OcrEngine {
    pub fn new(cfg: &OcrConfig) -> Self {
        Self {
            binary: cfg.binary.clone(),
            language: cfg.language.clone(),
            psm: cfg.psm,
            timeout: Duration::from_millis(cfg.timeout_ms),
        }
    }

    /// Verify the configured binary is runnable.
    pub async fn probe(&self) -> Result<()> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| {
                format!("failed to run {:?}. Is Tesseract installed?", self.binary)
            })?;

        if !output.status.success() {
            bail!("{:?} --version exited with {}", self.binary, output.status);
        }
        Ok(())
    }

    /// Recognize word tokens in an encoded (PNG) image.
    pub async fn recognize(&self, png_bytes: &[u8]) -> Result<Vec<Token>> {
        let mut child = Command::new(&self.binary)
            .arg("-")
            .arg("-")
            .arg("--psm")
            .arg(self.psm.to_string())
            .arg("-l")
            .arg(&self.language)
            .arg("tsv")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {:?}", self.binary))?;

        let mut stdin = child.stdin.take().context("failed to open tesseract stdin")?;
        stdin
            .write_all(png_bytes)
            .await
            .context("failed to feed image to tesseract")?;
        drop(stdin);

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.context("failed to read tesseract output")?,
            // Dropping the child kills it; the image is skipped, not retried.
            Err(_) => bail!("OCR timed out after {} ms", self.timeout.as_millis()),
        };

        if !output.status.success() {
            bail!("tesseract exited with {}", output.status);
        }

        let tokens = tsv::parse_tsv(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!("OCR returned {} word tokens", tokens.len());
        Ok(tokens)
    }
}
