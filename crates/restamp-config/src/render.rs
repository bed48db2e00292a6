use std::path::PathBuf;

use restamp_types::Rect;
use serde::{Deserialize, Serialize};

fn default_font_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
        PathBuf::from("/System/Library/Fonts/Arial.ttf"),
        PathBuf::from(r"C:\Windows\Fonts\arial.ttf"),
    ]
}

fn default_text_color() -> [u8; 3] {
    // Camera overlays render white ink on a darker wash.
    [255, 255, 255]
}

fn default_min_font_size() -> f32 {
    8.0
}

/// Pre-calibrated overlay geometry for exact-position mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibratedRect {
    pub x: i32,
    pub from_bottom: u32,
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
}

impl Default for CalibratedRect {
    fn default() -> Self {
        Self {
            x: 10,
            from_bottom: 30,
            width: 300,
            height: 20,
            font_size: 20,
        }
    }
}

impl CalibratedRect {
    pub fn resolve(&self, image_height: u32) -> Rect {
        Rect::new(
            self.x,
            image_height as i32 - self.from_bottom as i32,
            self.width,
            self.height,
        )
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RenderConfig {
    /// System fonts tried in order when no font file is supplied.
    #[serde(default = "default_font_candidates")]
    pub font_candidates: Vec<PathBuf>,
    #[serde(default = "default_text_color")]
    pub text_color: [u8; 3],
    /// Floor for the converge-to-fit loop.
    #[serde(default = "default_min_font_size")]
    pub min_font_size: f32,
    pub exact: CalibratedRect,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_candidates: default_font_candidates(),
            text_color: default_text_color(),
            min_font_size: default_min_font_size(),
            exact: CalibratedRect::default(),
        }
    }
}
