use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect as DrawRect;
use restamp_types::Rect;

use crate::fitter::RenderPlan;

/// Where the replacement text sits inside the overlay rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Centered on the measured text dimensions.
    Center,
    /// Top-left, as exact-position mode paints it.
    TopLeft,
}

/// Paint the overlay rectangle with the sampled background, then draw the
/// replacement text. Returns a new image; the input is left untouched.
pub fn composite(
    img: &RgbImage,
    rect: Rect,
    background: Rgb<u8>,
    ink: Rgb<u8>,
    font: Option<&FontVec>,
    plan: &RenderPlan,
    text: &str,
    anchor: Anchor,
) -> RgbImage {
    let mut out = img.clone();
    if rect.width == 0 || rect.height == 0 {
        return out;
    }

    let fill = DrawRect::at(rect.x, rect.y).of_size(rect.width, rect.height);
    draw_filled_rect_mut(&mut out, fill, background);

    let Some(font) = font else {
        return out;
    };

    let (text_x, text_y) = match anchor {
        Anchor::Center => (
            rect.x + ((rect.width as f32 - plan.text_width) / 2.0) as i32,
            rect.y + ((rect.height as f32 - plan.text_height) / 2.0) as i32,
        ),
        Anchor::TopLeft => (rect.x, rect.y),
    };

    draw_text_mut(
        &mut out,
        ink,
        text_x.max(0),
        text_y.max(0),
        plan.scale,
        font,
        text,
    );
    out
}
