//! Character-level comparison of two texts
//!
//! Whitespace is removed from both sides, then the strings are compared
//! position by position up to the longer length. A position mismatches when
//! the characters differ or only one side has a character there.

use super::Segment;
use std::fmt;

/// What differs at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    Changed { left: char, right: char },
    OnlyLeft(char),
    OnlyRight(char),
}

/// A mismatching position, 1-indexed into the whitespace-stripped texts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub position: usize,
    pub kind: MismatchKind,
}

impl Mismatch {
    /// Human-readable description using the given side names
    pub fn describe(&self, left_name: &str, right_name: &str) -> String {
        match self.kind {
            MismatchKind::Changed { left, right } => {
                format!("position {}: '{}' → '{}'", self.position, left, right)
            }
            MismatchKind::OnlyLeft(c) => {
                format!("position {}: '{}' only in {}", self.position, c, left_name)
            }
            MismatchKind::OnlyRight(c) => {
                format!("position {}: '{}' only in {}", self.position, c, right_name)
            }
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe("text1", "text2"))
    }
}

/// Outcome of [`char_diff`]
#[derive(Debug, Clone, PartialEq)]
pub struct CharDiff {
    pub left: Vec<char>,
    pub right: Vec<char>,
    pub mismatches: Vec<Mismatch>,
}

/// Remove every whitespace character
pub fn strip_whitespace(text: &str) -> Vec<char> {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Compare two texts character by character after removing whitespace
pub fn char_diff(left: &str, right: &str) -> CharDiff {
    let left = strip_whitespace(left);
    let right = strip_whitespace(right);

    let len = left.len().max(right.len());
    let mismatches = (0..len)
        .filter_map(|i| {
            let kind = match (left.get(i), right.get(i)) {
                (Some(&l), Some(&r)) if l == r => return None,
                (Some(&l), Some(&r)) => MismatchKind::Changed { left: l, right: r },
                (Some(&l), None) => MismatchKind::OnlyLeft(l),
                (None, Some(&r)) => MismatchKind::OnlyRight(r),
                (None, None) => return None,
            };
            Some(Mismatch {
                position: i + 1,
                kind,
            })
        })
        .collect();

    CharDiff {
        left,
        right,
        mismatches,
    }
}

impl CharDiff {
    pub fn is_identical(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Left text split into plain and mismatched runs
    pub fn left_segments(&self) -> Vec<Segment> {
        self.segments(&self.left)
    }

    /// Right text split into plain and mismatched runs
    pub fn right_segments(&self) -> Vec<Segment> {
        self.segments(&self.right)
    }

    fn segments(&self, chars: &[char]) -> Vec<Segment> {
        let mut flagged = vec![false; chars.len()];
        for mismatch in &self.mismatches {
            if let Some(flag) = flagged.get_mut(mismatch.position - 1) {
                *flag = true;
            }
        }

        let mut segments: Vec<Segment> = Vec::new();
        for (c, is_mismatch) in chars.iter().zip(flagged) {
            let depth = usize::from(is_mismatch);
            match segments.last_mut() {
                Some(last) if last.depth == depth => last.text.push(*c),
                _ => segments.push(Segment {
                    text: c.to_string(),
                    depth,
                }),
            }
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical_texts_have_no_mismatches() {
        for text in ["", "a", "Hello World", "가나다 라마", "1 2 3\n4\t5"] {
            assert!(char_diff(text, text).is_identical(), "{:?}", text);
        }
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert!(char_diff("Hello World", "Hello\n  World ").is_identical());
    }

    #[test]
    fn test_single_change_is_reported_once() {
        let original = "abcdefgh";
        for i in 0..original.len() {
            let mut changed: Vec<char> = original.chars().collect();
            changed[i] = 'X';
            let changed: String = changed.into_iter().collect();

            let diff = char_diff(original, &changed);
            assert_eq!(
                diff.mismatches,
                vec![Mismatch {
                    position: i + 1,
                    kind: MismatchKind::Changed {
                        left: original.as_bytes()[i] as char,
                        right: 'X'
                    },
                }]
            );
        }
    }

    #[test]
    fn test_prefix_tail_is_only_in_longer_side() {
        let diff = char_diff("abc", "abcdef");
        assert_eq!(diff.mismatches.len(), 3);
        for (offset, mismatch) in diff.mismatches.iter().enumerate() {
            assert_eq!(mismatch.position, 4 + offset);
            assert!(matches!(mismatch.kind, MismatchKind::OnlyRight(_)));
        }

        let diff = char_diff("abcdef", "abc");
        assert!(diff
            .mismatches
            .iter()
            .all(|m| matches!(m.kind, MismatchKind::OnlyLeft(_))));
    }

    #[test]
    fn test_abc_vs_abd() {
        let diff = char_diff("ABC", "ABD");
        assert_eq!(diff.mismatches.len(), 1);
        assert_eq!(diff.mismatches[0].describe("PDF", "Excel"), "position 3: 'C' → 'D'");
    }

    #[test]
    fn test_describe_tail() {
        let diff = char_diff("ab", "abz");
        assert_eq!(
            diff.mismatches[0].describe("PDF", "Excel"),
            "position 3: 'z' only in Excel"
        );
        assert_eq!(diff.mismatches[0].to_string(), "position 3: 'z' only in text2");
    }

    #[test]
    fn test_multibyte_positions_count_characters() {
        let diff = char_diff("가나다", "가나라");
        assert_eq!(diff.mismatches[0].position, 3);
    }

    #[test]
    fn test_segments_group_runs() {
        let diff = char_diff("abXYe", "abcde");
        assert_eq!(
            diff.left_segments(),
            vec![
                Segment::plain("ab"),
                Segment::highlighted("XY"),
                Segment::plain("e"),
            ]
        );
        assert_eq!(
            diff.right_segments(),
            vec![
                Segment::plain("ab"),
                Segment::highlighted("cd"),
                Segment::plain("e"),
            ]
        );
    }

    #[test]
    fn test_segments_of_longer_side_mark_tail() {
        let diff = char_diff("ab", "abcd");
        assert_eq!(diff.left_segments(), vec![Segment::plain("ab")]);
        assert_eq!(
            diff.right_segments(),
            vec![Segment::plain("ab"), Segment::highlighted("cd")]
        );
    }
}
