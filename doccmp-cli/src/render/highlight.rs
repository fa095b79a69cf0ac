//! Whole-word token highlighting

use super::Segment;
use regex::Regex;
use tracing::warn;

/// Split `text` into segments, raising the depth of every whole-word
/// occurrence of each token.
///
/// Tokens are trimmed and empty ones skipped. Every token is matched against
/// the original text, so a token listed twice, or two tokens covering the
/// same characters, give depth 2. The segments concatenate back to `text`.
pub fn highlight_tokens(text: &str, tokens: &[String]) -> Vec<Segment> {
    let mut depth = vec![0usize; text.len()];
    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let pattern = format!(r"\b{}\b", regex::escape(token));
        let regex = match Regex::new(&pattern) {
            Ok(regex) => regex,
            Err(e) => {
                warn!("Skipping token {:?}: {}", token, e);
                continue;
            }
        };
        for found in regex.find_iter(text) {
            for d in &mut depth[found.range()] {
                *d += 1;
            }
        }
    }
    split_by_depth(text, &depth)
}

/// Group consecutive bytes of equal depth; depth only changes on match
/// boundaries, which are char boundaries.
fn split_by_depth(text: &str, depth: &[usize]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;
    for end in 1..=text.len() {
        if end == text.len() || depth[end] != depth[start] {
            segments.push(Segment {
                text: text[start..end].to_string(),
                depth: depth[start],
            });
            start = end;
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::join_segments;
    use pretty_assertions::assert_eq;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    /// Render with `[`/`]` per depth level
    fn bracketed(text: &str, words: &[&str]) -> String {
        highlight_tokens(text, &tokens(words))
            .iter()
            .map(|s| format!("{}{}{}", "[".repeat(s.depth), s.text, "]".repeat(s.depth)))
            .collect()
    }

    #[test]
    fn test_empty_token_list_leaves_text_unchanged() {
        let text = "Total: 1,200 units";
        assert_eq!(highlight_tokens(text, &[]), vec![Segment::plain(text)]);
        assert!(highlight_tokens("", &tokens(&["x"])).is_empty());
    }

    #[test]
    fn test_absent_token_changes_nothing() {
        assert_eq!(bracketed("alpha beta", &["gamma"]), "alpha beta");
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(bracketed("cat concat cat.", &["cat"]), "[cat] concat [cat].");
    }

    #[test]
    fn test_tokens_are_trimmed_and_blank_skipped() {
        assert_eq!(bracketed("one two", &["  two ", "", "   "]), "one [two]");
    }

    #[test]
    fn test_duplicate_tokens_double_wrap() {
        assert_eq!(
            highlight_tokens("World", &tokens(&["World", "World"])),
            vec![Segment {
                text: "World".into(),
                depth: 2
            }]
        );
    }

    #[test]
    fn test_overlapping_tokens_nest() {
        assert_eq!(bracketed("big World", &["big World", "World"]), "[big ][[World]]");
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert_eq!(bracketed("a+b ab", &["a+b"]), "[a+b] ab");
    }

    #[test]
    fn test_unicode_words() {
        let segments = highlight_tokens("합계 금액 합계금액", &tokens(&["합계"]));
        assert_eq!(
            segments,
            vec![Segment::highlighted("합계"), Segment::plain(" 금액 합계금액")]
        );
    }

    #[test]
    fn test_private_use_characters_are_kept() {
        let text = "a\u{E000}b \u{E001}c";
        let segments = highlight_tokens(text, &tokens(&["c"]));
        assert_eq!(join_segments(&segments), text);
        assert_eq!(segments.last(), Some(&Segment::highlighted("c")));
    }

    #[test]
    fn test_segments_split_around_tokens() {
        let segments = highlight_tokens("Hello big World", &tokens(&["big"]));
        assert_eq!(
            segments,
            vec![
                Segment::plain("Hello "),
                Segment::highlighted("big"),
                Segment::plain(" World"),
            ]
        );
    }
}
