use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle, origin at the image's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Smallest rectangle enclosing both operands.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect {
            x,
            y,
            width: (right - x) as u32,
            height: (bottom - y) as u32,
        }
    }

    /// Shift vertically, e.g. back into full-image coordinates after a crop.
    pub fn translate_y(&self, dy: i32) -> Rect {
        Rect {
            y: self.y + dy,
            ..*self
        }
    }
}

/// A single OCR-recognized word.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub rect: Rect,
    /// Recognition confidence, 0-100.
    pub confidence: f32,
}

/// Result of locating the date/time overlay in one image.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayMatch {
    /// Matched text, possibly reassembled from several tokens.
    pub text: String,
    pub rect: Rect,
    /// Sizing hint for the replacement text, taken from the rect height.
    pub font_size: u32,
}

impl OverlayMatch {
    pub fn from_rect(text: String, rect: Rect) -> Self {
        let font_size = rect.height;
        Self {
            text,
            rect,
            font_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_encloses_both_operands() {
        let a = Rect::new(10, 20, 30, 10);
        let b = Rect::new(50, 15, 20, 25);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(10, 15, 60, 25));
        assert!(u.x <= a.x && u.x <= b.x);
        assert!(u.right() >= a.right() && u.right() >= b.right());
        assert!(u.bottom() >= a.bottom() && u.bottom() >= b.bottom());
    }

    #[test]
    fn union_is_commutative() {
        let a = Rect::new(-5, 0, 10, 10);
        let b = Rect::new(3, -2, 4, 4);
        assert_eq!(a.union(&b), b.union(&a));
    }

    #[test]
    fn translate_y_moves_only_the_origin() {
        let r = Rect::new(10, 5, 100, 20).translate_y(70);
        assert_eq!(r, Rect::new(10, 75, 100, 20));
    }

    #[test]
    fn overlay_match_infers_font_size_from_height() {
        let m = OverlayMatch::from_rect("x".into(), Rect::new(0, 0, 40, 18));
        assert_eq!(m.font_size, 18);
    }
}
