use serde::{Deserialize, Serialize};

use self::batch::BatchConfig;
use self::ocr::OcrConfig;
use self::overlay::OverlayConfig;
use self::render::RenderConfig;

pub mod batch;
pub mod ocr;
pub mod overlay;
pub mod render;

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub overlay: OverlayConfig,
    pub render: RenderConfig,
    pub batch: BatchConfig,
}

impl Config {
    /// Built-in defaults with environment overrides applied.
    pub fn new() -> Self {
        Config {
            ocr: OcrConfig::new(),
            overlay: OverlayConfig::default(),
            render: RenderConfig::default(),
            batch: BatchConfig::new(),
        }
    }
}
