//! Locates the date/time overlay among OCR word tokens.
//!
//! A single logical date string frequently arrives split across several OCR
//! tokens, so detection runs as an ordered list of strategies: full-pattern
//! match over the joined token text, component assembly from fragments,
//! partial date-or-time fallback, and finally a configured sentinel so the
//! pipeline never fails outright.

use std::sync::LazyLock;

use regex::Regex;
use restamp_config::overlay::{LayoutKind, OverlayConfig};
use restamp_types::{OverlayMatch, Rect, Token};

static DMY_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{2}/\d{2}/\d{2} \d{1,2}:\d{2} [AP]M GMT [+-]\d{2}:\d{2}").unwrap()
});
static ISO_FULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}").unwrap());

static DMY_DATE_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{2}$").unwrap());
static ISO_DATE_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static DMY_TIME_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:\d{2}$").unwrap());
static ISO_TIME_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:\d{2}:\d{2}$").unwrap());
static MERIDIEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?i)[AP]M$").unwrap());
static UTC_OFFSET_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]\d{2}:\d{2}$").unwrap());

fn full_pattern(layout: LayoutKind) -> &'static Regex {
    match layout {
        LayoutKind::DmyGmt => &DMY_FULL,
        LayoutKind::Iso => &ISO_FULL,
    }
}

fn date_fragment(layout: LayoutKind) -> &'static Regex {
    match layout {
        LayoutKind::DmyGmt => &DMY_DATE_FRAGMENT,
        LayoutKind::Iso => &ISO_DATE_FRAGMENT,
    }
}

fn time_fragment(layout: LayoutKind) -> &'static Regex {
    match layout {
        LayoutKind::DmyGmt => &DMY_TIME_FRAGMENT,
        LayoutKind::Iso => &ISO_TIME_FRAGMENT,
    }
}

/// Find the overlay among `tokens`.
///
/// Token rectangles are expected in the coordinate space of the OCR'd crop;
/// `search_offset_y` shifts strategy results back into full-image
/// coordinates. The sentinel fallback is resolved from configuration against
/// `image_height` and is already in full-image coordinates.
pub fn locate(
    tokens: &[Token],
    cfg: &OverlayConfig,
    image_height: u32,
    search_offset_y: i32,
) -> OverlayMatch {
    const STRATEGIES: &[fn(&[Token], LayoutKind) -> Option<(String, Rect)>] =
        &[match_full_pattern, assemble_components, partial_fragment];

    for strategy in STRATEGIES {
        if let Some((text, rect)) = strategy(tokens, cfg.layout) {
            return OverlayMatch::from_rect(text, rect.translate_y(search_offset_y));
        }
    }

    OverlayMatch::from_rect(
        cfg.fallback_text.clone(),
        cfg.fallback_rect.resolve(image_height),
    )
}

/// Tier 1: search the space-joined token text for the complete layout.
///
/// The bounding rect is the union of every token whose text is a substring
/// of the matched string or contains it, since the overlay may have been
/// recognized as one token or as many.
fn match_full_pattern(tokens: &[Token], layout: LayoutKind) -> Option<(String, Rect)> {
    let joined = tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let matched = full_pattern(layout).find(&joined)?.as_str().to_string();

    let rect = union_of(
        tokens
            .iter()
            .filter(|t| matched.contains(&t.text) || t.text.contains(&matched)),
    )?;
    Some((matched, rect))
}

/// Tier 2: reassemble the overlay from per-token fragments.
///
/// Requires at least a date fragment and a time fragment; meridiem markers,
/// the GMT literal and a UTC offset join in when present.
fn assemble_components(tokens: &[Token], layout: LayoutKind) -> Option<(String, Rect)> {
    let date_re = date_fragment(layout);
    let time_re = time_fragment(layout);

    let mut parts: Vec<&Token> = Vec::new();
    let mut has_date = false;
    let mut has_time = false;

    for token in tokens {
        let text = token.text.as_str();
        let is_date = date_re.is_match(text);
        let is_time = !is_date && time_re.is_match(text);
        let is_extra = layout == LayoutKind::DmyGmt
            && (MERIDIEM.is_match(text)
                || text.eq_ignore_ascii_case("GMT")
                || UTC_OFFSET_FRAGMENT.is_match(text));

        if is_date || is_time || is_extra {
            has_date |= is_date;
            has_time |= is_time;
            parts.push(token);
        }
    }

    if !(has_date && has_time) {
        return None;
    }

    let text = parts
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let rect = union_of(parts.into_iter())?;
    Some((text, rect))
}

/// Tier 3: a lone date fragment, or failing that a lone time fragment.
fn partial_fragment(tokens: &[Token], layout: LayoutKind) -> Option<(String, Rect)> {
    let date_re = date_fragment(layout);
    let time_re = time_fragment(layout);

    let found = tokens
        .iter()
        .find(|t| date_re.is_match(&t.text))
        .or_else(|| tokens.iter().find(|t| time_re.is_match(&t.text)))?;
    Some((found.text.clone(), found.rect))
}

fn union_of<'a>(tokens: impl Iterator<Item = &'a Token>) -> Option<Rect> {
    tokens.map(|t| t.rect).reduce(|acc, r| acc.union(&r))
}
