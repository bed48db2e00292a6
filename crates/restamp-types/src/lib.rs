pub mod types;

pub use types::{OverlayMatch, Rect, Token};
