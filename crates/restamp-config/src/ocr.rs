use std::env;

use serde::{Deserialize, Serialize};

fn default_binary() -> String {
    "tesseract".to_string()
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_psm() -> u32 {
    // Sparse text: overlay words float on photo content, not on a page.
    11
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_search_fraction() -> f32 {
    0.3
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract-compatible binary to invoke.
    #[serde(default = "default_binary")]
    pub binary: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Page segmentation mode passed as --psm.
    #[serde(default = "default_psm")]
    pub psm: u32,
    /// Per-image recognition timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Fraction of the image height, measured from the bottom, handed to OCR.
    #[serde(default = "default_search_fraction")]
    pub search_fraction: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            language: default_language(),
            psm: default_psm(),
            timeout_ms: default_timeout_ms(),
            search_fraction: default_search_fraction(),
        }
    }
}

impl OcrConfig {
    pub fn new() -> Self {
        let mut cfg = Self::default();

        if let Ok(binary) = env::var("RESTAMP_TESSERACT_BIN") {
            cfg.binary = binary;
        }
        if let Some(timeout_ms) = env::var("RESTAMP_OCR_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            cfg.timeout_ms = timeout_ms;
        }

        cfg
    }
}
