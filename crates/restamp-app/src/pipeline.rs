use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::FontVec;
use anyhow::{Context, Result};
use image::{ImageFormat, ImageReader, Rgb, RgbImage};
use restamp_config::Config;
use restamp_core::{locator, temporal};
use restamp_ocr::OcrEngine;
use restamp_render::compositor::{self, Anchor};
use restamp_render::{fitter, sampler};

use crate::cli::Cli;

/// Everything a worker needs to process one image. Shared across the batch;
/// nothing here is mutated per image.
pub struct JobContext {
    pub config: Arc<Config>,
    pub engine: Arc<OcrEngine>,
    pub font: Arc<Option<FontVec>>,
    pub font_size: u32,
    pub exact_position: bool,
}

impl JobContext {
    pub fn from_cli(cli: &Cli, config: Arc<Config>, engine: Arc<OcrEngine>) -> Self {
        let font = Arc::new(restamp_render::resolve_font(
            cli.font_path.as_deref(),
            &config.render.font_candidates,
        ));
        Self {
            config,
            engine,
            font,
            font_size: cli.font_size,
            exact_position: cli.exact_position,
        }
    }
}

/// Result of one image, reported back to the batch collector.
pub struct ImageOutcome {
    pub input: PathBuf,
    pub result: Result<()>,
}

/// Locate, adjust and repaint the overlay of a single photo.
///
/// OCR failures and I/O failures are errors for this image only; locate and
/// parse misses degrade to the configured sentinel/placeholder instead.
pub async fn process_image(input: &Path, output: &Path, ctx: &JobContext) -> Result<()> {
    let input_owned = input.to_path_buf();
    let fraction = ctx.config.ocr.search_fraction;

    // Decode and carve off the bottom strip for OCR (blocking work).
    let (img, crop_y, strip_png) =
        tokio::task::spawn_blocking(move || -> Result<(RgbImage, u32, Vec<u8>)> {
            let img = ImageReader::open(&input_owned)
                .with_context(|| format!("failed to open {}", input_owned.display()))?
                .decode()
                .with_context(|| format!("failed to decode {}", input_owned.display()))?
                .to_rgb8();
            let crop_y = crop_origin(img.height(), fraction);
            let png = encode_strip(&img, crop_y)?;
            Ok((img, crop_y, png))
        })
        .await
        .context("decode task panicked")??;

    let tokens = ctx
        .engine
        .recognize(&strip_png)
        .await
        .with_context(|| format!("OCR failed for {}", input.display()))?;

    let height = img.height();
    let overlay = locator::locate(&tokens, &ctx.config.overlay, height, crop_y as i32);
    tracing::debug!("located overlay {:?} at {:?}", overlay.text, overlay.rect);

    let adjusted = match temporal::adjust(
        &overlay.text,
        ctx.config.overlay.layout,
        ctx.config.overlay.shift,
    ) {
        Some(text) => text,
        None => {
            tracing::warn!(
                "overlay text {:?} did not parse, using placeholder",
                overlay.text
            );
            ctx.config.overlay.placeholder_text.clone()
        }
    };

    let (rect, fixed_size, anchor) = if ctx.exact_position {
        let calib = &ctx.config.render.exact;
        (
            calib.resolve(height),
            Some(calib.font_size as f32),
            Anchor::TopLeft,
        )
    } else if ctx.font_size > 0 {
        (overlay.rect, Some(ctx.font_size as f32), Anchor::Center)
    } else {
        (overlay.rect, None, Anchor::Center)
    };

    let font = ctx.font.clone();
    let config = ctx.config.clone();
    let output_owned = output.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let background = sampler::sample_background(&img, &rect);
        let plan = fitter::fit(
            font.as_ref().as_ref(),
            &adjusted,
            rect.width,
            rect.height,
            fixed_size,
            config.render.min_font_size,
        );
        let out = compositor::composite(
            &img,
            rect,
            background,
            Rgb(config.render.text_color),
            font.as_ref().as_ref(),
            &plan,
            &adjusted,
            anchor,
        );
        out.save(&output_owned)
            .with_context(|| format!("failed to save {}", output_owned.display()))
    })
    .await
    .context("render task panicked")??;

    Ok(())
}

fn crop_origin(height: u32, fraction: f32) -> u32 {
    let origin = (height as f32 * (1.0 - fraction)) as u32;
    origin.min(height.saturating_sub(1))
}

fn encode_strip(img: &RgbImage, crop_y: u32) -> Result<Vec<u8>> {
    let strip = image::imageops::crop_imm(img, 0, crop_y, img.width(), img.height() - crop_y)
        .to_image();
    let mut png = Vec::new();
    strip
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context("failed to encode OCR strip")?;
    Ok(png)
}
