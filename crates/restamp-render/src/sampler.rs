use std::collections::HashMap;

use image::{Rgb, RgbImage};
use restamp_types::Rect;

/// Rows sampled on each side of the rectangle.
const STRIP: u32 = 5;

/// Infer the overlay's background fill from pixels around the rectangle.
///
/// Samples thin strips immediately above and below the rect plus the row
/// through its vertical center, restricted to the rect's horizontal extent
/// and clipped to the image. Returns the MODE color, not the mean: overlay
/// washes are near-solid, and stray glyph-edge pixels caught in a strip
/// must not tint the estimate. Black when nothing was sampleable.
pub fn sample_background(img: &RgbImage, rect: &Rect) -> Rgb<u8> {
    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();

    let x0 = rect.x.clamp(0, img.width() as i32) as u32;
    let x1 = rect.right().clamp(0, img.width() as i32) as u32;

    let mut tally_row = |y: i64| {
        if y < 0 || y >= img.height() as i64 {
            return;
        }
        for x in x0..x1 {
            *counts.entry(img.get_pixel(x, y as u32).0).or_insert(0) += 1;
        }
    };

    // Rows [y-STRIP, y) above and [y+h, y+h+STRIP) below.
    for dy in 1..=STRIP as i64 {
        tally_row(rect.y as i64 - dy);
    }
    for dy in 0..STRIP as i64 {
        tally_row(rect.bottom() as i64 + dy);
    }
    tally_row(rect.y as i64 + rect.height as i64 / 2);

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(color, _)| Rgb(color))
        .unwrap_or(Rgb([0, 0, 0]))
}
