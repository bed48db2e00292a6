use ab_glyph::{Font, FontVec, ScaleFont};

/// Font size and measured text dimensions chosen to fit the overlay box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPlan {
    pub scale: f32,
    pub text_width: f32,
    pub text_height: f32,
}

/// Measure rendered text dimensions at the given scale: the sum of glyph
/// advances for the width, ascent minus descent for the height.
pub fn measure_text(font: &FontVec, text: &str, scale: f32) -> (f32, f32) {
    let scaled = font.as_scaled(scale);
    let width = text
        .chars()
        .map(|ch| scaled.h_advance(scaled.scaled_glyph(ch).id))
        .sum();
    let height = scaled.ascent() - scaled.descent();
    (width, height)
}

/// Pick a font size for `text` inside a `bound_w` x `bound_h` box.
///
/// With `fixed_size` the converge loop is skipped entirely (caller-calibrated
/// size, or explicit --font-size). Otherwise the candidate starts at the box
/// height and shrinks until both measured dimensions fit or the floor is
/// reached. Without a font there is nothing to measure; the plan carries the
/// starting size and zero dimensions, and the compositor skips glyphs.
pub fn fit(
    font: Option<&FontVec>,
    text: &str,
    bound_w: u32,
    bound_h: u32,
    fixed_size: Option<f32>,
    floor: f32,
) -> RenderPlan {
    let Some(font) = font else {
        return RenderPlan {
            scale: fixed_size.unwrap_or(bound_h as f32),
            text_width: 0.0,
            text_height: 0.0,
        };
    };

    let scale = match fixed_size {
        Some(size) => size,
        None => fit_scale(bound_h as f32, floor, bound_w as f32, bound_h as f32, |s| {
            measure_text(font, text, s)
        }),
    };

    let (text_width, text_height) = measure_text(font, text, scale);
    RenderPlan {
        scale,
        text_width,
        text_height,
    }
}

/// Shrink from `start` one unit at a time until the measured dimensions fit
/// the box or the floor is hit. Always terminates; never exceeds `start`.
fn fit_scale(
    start: f32,
    floor: f32,
    bound_w: f32,
    bound_h: f32,
    measure: impl Fn(f32) -> (f32, f32),
) -> f32 {
    let mut scale = start.max(floor);
    loop {
        let (w, h) = measure(scale);
        if (w <= bound_w && h <= bound_h) || scale <= floor {
            return scale;
        }
        scale -= 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Synthetic measure: width is half a unit per point of scale per char,
    // height equals the scale. Lets the loop be exercised without font files.
    fn measure_for(chars: usize) -> impl Fn(f32) -> (f32, f32) {
        move |scale| (scale * 0.5 * chars as f32, scale)
    }

    #[test]
    fn fitting_text_keeps_the_starting_size() {
        assert_eq!(fit_scale(20.0, 8.0, 300.0, 20.0, measure_for(10)), 20.0);
    }

    #[test]
    fn wide_text_shrinks_until_it_fits() {
        // 40 chars at scale s measure 20s wide; 300 wide box needs s <= 15.
        let scale = fit_scale(20.0, 8.0, 300.0, 20.0, measure_for(40));
        assert_eq!(scale, 15.0);
    }

    #[test]
    fn result_never_exceeds_the_start() {
        for chars in [1, 10, 40, 200] {
            let scale = fit_scale(20.0, 8.0, 300.0, 20.0, measure_for(chars));
            assert!(scale <= 20.0);
        }
    }

    #[test]
    fn floor_terminates_the_loop_when_nothing_fits() {
        // 10 units per char: even the floor size overflows a 10px box.
        let scale = fit_scale(20.0, 8.0, 10.0, 20.0, move |s| (s * 10.0, s));
        assert_eq!(scale, 8.0);
    }

    #[test]
    fn start_below_floor_is_raised_to_the_floor() {
        let scale = fit_scale(4.0, 8.0, 300.0, 20.0, measure_for(4));
        assert_eq!(scale, 8.0);
    }

    #[test]
    fn no_font_plan_carries_the_fixed_or_starting_size() {
        let plan = fit(None, "30/11/24", 300, 20, None, 8.0);
        assert_eq!(plan.scale, 20.0);
        assert_eq!(plan.text_width, 0.0);

        let plan = fit(None, "30/11/24", 300, 20, Some(14.0), 8.0);
        assert_eq!(plan.scale, 14.0);
    }
}
