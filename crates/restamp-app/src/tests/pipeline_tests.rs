//! Pipeline stages driven end-to-end on a synthetic image, with OCR tokens
//! supplied directly instead of running the engine.

use image::{Rgb, RgbImage};
use restamp_config::Config;
use restamp_core::{locator, temporal};
use restamp_render::compositor::{self, Anchor};
use restamp_render::{fitter, sampler};
use restamp_types::{Rect, Token};

fn token(text: &str, x: i32, y: i32, w: u32, h: u32) -> Token {
    Token {
        text: text.to_string(),
        rect: Rect::new(x, y, w, h),
        confidence: 93.0,
    }
}

/// 320x240 photo with a dark overlay banner along the bottom rows 216..240.
fn overlay_image() -> RgbImage {
    RgbImage::from_fn(320, 240, |_, y| {
        if y >= 216 {
            Rgb([32, 32, 32])
        } else {
            Rgb([10, 120, 200])
        }
    })
}

#[test]
fn stages_compose_into_a_rewritten_overlay() {
    let config = Config::default();
    let img = overlay_image();
    let height = img.height();
    // OCR saw the bottom 30% of the image; tokens are in crop coordinates.
    let crop_y = 168;
    let tokens = vec![
        token("30/11/24", 12, 52, 70, 16),
        token("11:30", 88, 52, 40, 16),
        token("PM", 134, 52, 24, 16),
        token("GMT", 164, 52, 34, 16),
        token("+05:30", 204, 52, 52, 16),
    ];

    let overlay = locator::locate(&tokens, &config.overlay, height, crop_y);
    assert_eq!(overlay.text, "30/11/24 11:30 PM GMT +05:30");
    assert_eq!(overlay.rect, Rect::new(12, 220, 244, 16));

    let adjusted =
        temporal::adjust(&overlay.text, config.overlay.layout, config.overlay.shift).unwrap();
    assert_eq!(adjusted, "01/01/25 12:30 AM GMT +05:30");

    let background = sampler::sample_background(&img, &overlay.rect);
    assert_eq!(background, Rgb([32, 32, 32]));

    let plan = fitter::fit(
        None,
        &adjusted,
        overlay.rect.width,
        overlay.rect.height,
        None,
        config.render.min_font_size,
    );
    let out = compositor::composite(
        &img,
        overlay.rect,
        background,
        Rgb(config.render.text_color),
        None,
        &plan,
        &adjusted,
        Anchor::Center,
    );

    // The overlay area is repainted with the sampled wash.
    for (x, y) in [(12, 220), (255, 235), (130, 228)] {
        assert_eq!(out.get_pixel(x, y), &Rgb([32, 32, 32]));
    }
    // The rest of the photo is untouched.
    assert_eq!(out.get_pixel(5, 5), &Rgb([10, 120, 200]));
    assert_eq!(out.get_pixel(300, 100), &Rgb([10, 120, 200]));
}

#[test]
fn noisy_tokens_still_produce_a_rewrite() {
    let config = Config::default();
    let img = overlay_image();
    // Only fragments survived OCR; component assembly takes over.
    let tokens = vec![token("12/05/24", 10, 50, 70, 15), token("3:15", 90, 50, 30, 15)];

    let overlay = locator::locate(&tokens, &config.overlay, img.height(), 168);
    assert_eq!(overlay.text, "12/05/24 3:15");

    // The fragment is not a full overlay, so the adjuster refuses it and the
    // pipeline falls back to the configured placeholder.
    let adjusted = temporal::adjust(&overlay.text, config.overlay.layout, config.overlay.shift);
    assert_eq!(adjusted, None);
}

#[test]
fn exact_position_uses_the_calibrated_rect() {
    let config = Config::default();
    let img = overlay_image();
    let text = "26/09/24 9:04 PM GMT +05:30";

    let rect = config.render.exact.resolve(img.height());
    assert_eq!(rect, Rect::new(10, 210, 300, 20));

    let background = sampler::sample_background(&img, &rect);
    let plan = fitter::fit(
        None,
        text,
        rect.width,
        rect.height,
        Some(config.render.exact.font_size as f32),
        config.render.min_font_size,
    );
    assert_eq!(plan.scale, 20.0);

    let out = compositor::composite(
        &img,
        rect,
        background,
        Rgb([255, 255, 255]),
        None,
        &plan,
        text,
        Anchor::TopLeft,
    );
    assert_eq!(out.get_pixel(10, 210), &background);
    assert_eq!(out.get_pixel(309, 229), &background);
}
