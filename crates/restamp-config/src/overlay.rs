use restamp_types::Rect;
use serde::{Deserialize, Serialize};

/// Supported overlay text layouts.
///
/// `DmyGmt` is the canonical camera style: `DD/MM/YY H:MM AP GMT +HH:MM`.
/// `Iso` covers overlays rendered as `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    DmyGmt,
    Iso,
}

impl Default for LayoutKind {
    fn default() -> Self {
        LayoutKind::DmyGmt
    }
}

/// Calendar shift applied to the parsed overlay value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeShift {
    pub months: u32,
    pub days: i64,
    pub hours: i64,
}

impl Default for TimeShift {
    fn default() -> Self {
        Self {
            months: 1,
            days: 1,
            hours: 1,
        }
    }
}

/// Fixed rectangle anchored to the image's lower-left corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelRect {
    pub x: i32,
    /// Distance from the bottom edge of the image to the rect's top edge.
    pub from_bottom: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for SentinelRect {
    fn default() -> Self {
        Self {
            x: 10,
            from_bottom: 30,
            width: 300,
            height: 20,
        }
    }
}

impl SentinelRect {
    pub fn resolve(&self, image_height: u32) -> Rect {
        Rect::new(
            self.x,
            image_height as i32 - self.from_bottom as i32,
            self.width,
            self.height,
        )
    }
}

fn default_fallback_text() -> String {
    "26/09/24 9:04 PM GMT +05:30".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OverlayConfig {
    pub layout: LayoutKind,
    /// Example text returned when no overlay is detected at all.
    #[serde(default = "default_fallback_text")]
    pub fallback_text: String,
    /// Text rendered when the located overlay does not parse.
    #[serde(default = "default_fallback_text")]
    pub placeholder_text: String,
    pub fallback_rect: SentinelRect,
    pub shift: TimeShift,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            layout: LayoutKind::default(),
            fallback_text: default_fallback_text(),
            placeholder_text: default_fallback_text(),
            fallback_rect: SentinelRect::default(),
            shift: TimeShift::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_rect_resolves_against_image_height() {
        let rect = SentinelRect::default().resolve(480);
        assert_eq!(rect, Rect::new(10, 450, 300, 20));
    }
}
