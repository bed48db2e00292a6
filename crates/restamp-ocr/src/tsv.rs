use restamp_types::{Rect, Token};

/// Tesseract TSV rows at this level describe single words.
const WORD_LEVEL: &str = "5";

/// Parse Tesseract TSV output into word tokens.
///
/// Columns: level, page_num, block_num, par_num, line_num, word_num, left,
/// top, width, height, conf, text. Non-word rows, empty text and the
/// negative confidence tesseract emits for structural rows are all dropped;
/// a malformed row is skipped rather than failing the whole image.
pub fn parse_tsv(tsv: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for line in tsv.lines().skip(1) {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 || fields[0] != WORD_LEVEL {
            continue;
        }

        let text = fields[11].trim();
        if text.is_empty() {
            continue;
        }

        let Some(rect) = parse_rect(&fields[6..10]) else {
            continue;
        };
        let Ok(confidence) = fields[10].parse::<f32>() else {
            continue;
        };
        if confidence < 0.0 {
            continue;
        }

        tokens.push(Token {
            text: text.to_string(),
            rect,
            confidence,
        });
    }

    tokens
}

fn parse_rect(fields: &[&str]) -> Option<Rect> {
    let x = fields[0].parse().ok()?;
    let y = fields[1].parse().ok()?;
    let width = fields[2].parse().ok()?;
    let height = fields[3].parse().ok()?;
    Some(Rect::new(x, y, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    #[test]
    fn parses_word_rows() {
        let tsv = format!(
            "{HEADER}\n\
             1\t1\t0\t0\t0\t0\t0\t0\t640\t144\t-1\t\n\
             5\t1\t1\t1\t1\t1\t10\t4\t70\t16\t96.2\t30/11/24\n\
             5\t1\t1\t1\t1\t2\t86\t4\t32\t16\t91.0\t9:12\n"
        );
        let tokens = parse_tsv(&tsv);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "30/11/24");
        assert_eq!(tokens[0].rect, Rect::new(10, 4, 70, 16));
        assert_eq!(tokens[0].confidence, 96.2);
        assert_eq!(tokens[1].text, "9:12");
    }

    #[test]
    fn skips_non_word_levels_and_blank_text() {
        let tsv = format!(
            "{HEADER}\n\
             4\t1\t1\t1\t1\t0\t10\t4\t200\t16\t-1\t\n\
             5\t1\t1\t1\t1\t1\t10\t4\t70\t16\t95.0\t   \n"
        );
        assert!(parse_tsv(&tsv).is_empty());
    }

    #[test]
    fn skips_negative_confidence_words() {
        let tsv = format!("{HEADER}\n5\t1\t1\t1\t1\t1\t10\t4\t70\t16\t-1\tghost\n");
        assert!(parse_tsv(&tsv).is_empty());
    }

    #[test]
    fn skips_malformed_rows() {
        let tsv = format!(
            "{HEADER}\n\
             garbage line without tabs\n\
             5\t1\t1\t1\t1\t1\tNaN\t4\t70\t16\t95.0\tbroken\n\
             5\t1\t1\t1\t1\t2\t10\t4\t70\t16\t95.0\tok\n"
        );
        let tokens = parse_tsv(&tsv);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "ok");
    }

    #[test]
    fn empty_output_yields_no_tokens() {
        assert!(parse_tsv("").is_empty());
        assert!(parse_tsv(HEADER).is_empty());
    }
}
