use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use anyhow::{Context, Result, anyhow};

/// Ordered font fallback: the caller-supplied file first, then the
/// configured system candidates. Font availability is environment-dependent
/// and must never fail the pipeline; when nothing loads, `None` is returned
/// and glyph drawing is skipped downstream.
pub fn resolve_font(explicit: Option<&Path>, candidates: &[PathBuf]) -> Option<FontVec> {
    if let Some(path) = explicit {
        match load_font(path) {
            Ok(font) => {
                tracing::info!("Loaded font: {}", path.display());
                return Some(font);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load font {}: {e:#}. Falling back to system fonts.",
                    path.display()
                );
            }
        }
    }

    for path in candidates {
        if let Ok(font) = load_font(path) {
            tracing::info!("Loaded system font: {}", path.display());
            return Some(font);
        }
    }

    tracing::warn!("No usable font found, replacement text will not be drawn");
    None
}

fn load_font(path: &Path) -> Result<FontVec> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read font file {}", path.display()))?;
    FontVec::try_from_vec(data)
        .map_err(|_| anyhow!("failed to parse font file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_candidates_resolve_to_none() {
        let candidates = vec![PathBuf::from("/definitely/not/a/font.ttf")];
        assert!(resolve_font(None, &candidates).is_none());
    }

    #[test]
    fn garbage_font_file_is_rejected() {
        let dir = std::env::temp_dir().join("restamp-font-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("not-a-font.ttf");
        std::fs::write(&path, b"this is not a font").unwrap();
        assert!(resolve_font(Some(&path), &[]).is_none());
    }
}
