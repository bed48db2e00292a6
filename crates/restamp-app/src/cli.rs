use std::path::PathBuf;

use clap::Parser;

/// Rewrites the camera date/time overlay burned into each photo of a
/// directory, shifting it forward and repainting it in place.
#[derive(Debug, Parser)]
#[command(name = "restamp", version, about)]
pub struct Cli {
    /// Directory of input photos (.png/.jpg/.jpeg)
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Directory for rewritten photos; created if absent
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Font file for the replacement text; system fonts are tried otherwise
    #[arg(long)]
    pub font_path: Option<PathBuf>,

    /// Fixed font size; 0 picks a size that fits the detected box
    #[arg(long, default_value_t = 0)]
    pub font_size: u32,

    /// Skip detection and use the calibrated overlay rectangle
    #[arg(long)]
    pub exact_position: bool,

    /// Concurrent image workers; 0 uses the available parallelism
    #[arg(long, default_value_t = 0)]
    pub jobs: usize,
}
