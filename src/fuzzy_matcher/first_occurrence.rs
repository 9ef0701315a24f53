//! First-occurrence fuzzy scan.
//!
//! Finds the first "fuzzy" occurrence of the pattern in O(n): a forward scan
//! locates where the last pattern character is first completed, then a
//! backward scan from there finds the shortest window ending at that
//! position.
//!
//! ```text
//!     a_____b___abc__  To find "abc"
//!     *-----*-----*>   1. Forward scan
//!              <***    2. Backward scan
//! ```
//!
//! Only the first occurrence is considered, so a better one further right is
//! never found. The window is scored with the same weights as local
//! alignment: every pattern char earns `match_score` and every skipped
//! choice char inside the window costs `gap_penalty`. Negative totals are
//! clamped to 0, as is a pattern that is not a subsequence of the choice.
//!
//! # Example:
//! ```
//! use websee::fuzzy_matcher::FuzzyMatcher;
//! use websee::fuzzy_matcher::first_occurrence::FirstOccurrenceMatcher;
//!
//! let matcher = FirstOccurrenceMatcher::default();
//! assert_eq!(matcher.fuzzy_match("funder-sfinder", "furf"), 3);
//! assert_eq!(matcher.fuzzy_match("sinderfinder", "furf"), 0);
//! ```

use std::cell::RefCell;

use thread_local::ThreadLocal;

use crate::fuzzy_matcher::util::fill_chars;
use crate::fuzzy_matcher::{FuzzyMatcher, IndexType, MatchIndices, ScoreType, Weights};

/// Positions of the pattern chars in the first, shortest occurrence.
pub fn first_occurrence<T: PartialEq>(choice: &[T], pattern: &[T]) -> Option<MatchIndices> {
    let (first, rest) = pattern.split_first()?;

    // forward: where does the pattern first complete?
    let mut remaining = std::iter::once(first).chain(rest).peekable();
    let mut end = None;
    for (idx, ch) in choice.iter().enumerate() {
        if remaining.next_if(|p| *p == ch).is_some() && remaining.peek().is_none() {
            end = Some(idx);
            break;
        }
    }
    let end = end?;

    // backward: latest start of an occurrence ending at `end`
    let mut indices = MatchIndices::with_capacity(pattern.len());
    let mut remaining = pattern.iter().rev().peekable();
    for idx in (0..=end).rev() {
        if remaining.next_if(|p| **p == choice[idx]).is_some() {
            indices.push(idx as IndexType);
            if remaining.peek().is_none() {
                break;
            }
        }
    }
    indices.reverse();
    Some(indices)
}

/// Score of an occurrence given its matched indices.
fn window_score(indices: &[IndexType], weights: &Weights) -> ScoreType {
    let (Some(&start), Some(&end)) = (indices.first(), indices.last()) else {
        return 0;
    };
    let matched = indices.len() as ScoreType;
    let skipped = (end - start + 1 - indices.len()) as ScoreType;
    matched
        .saturating_mul(weights.match_score)
        .saturating_add(skipped.saturating_mul(weights.gap_penalty))
        .max(0)
}

/// Fuzzy matcher reporting the first occurrence of the pattern.
#[derive(Debug, Default)]
pub struct FirstOccurrenceMatcher {
    weights: Weights,
    char_buf: ThreadLocal<RefCell<(Vec<char>, Vec<char>)>>,
}

impl FirstOccurrenceMatcher {
    /// Creates a matcher with the given weights. The mismatch weight is unused.
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            char_buf: ThreadLocal::new(),
        }
    }
}

impl FuzzyMatcher for FirstOccurrenceMatcher {
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> (ScoreType, MatchIndices) {
        let mut bufs = self.char_buf.get_or(|| RefCell::new((Vec::new(), Vec::new()))).borrow_mut();
        let (choice_chars, pattern_chars) = &mut *bufs;
        fill_chars(choice_chars, choice);
        fill_chars(pattern_chars, pattern);

        match first_occurrence(&choice_chars[..], &pattern_chars[..]) {
            Some(indices) => {
                let score = window_score(&indices, &self.weights);
                if score > 0 { (score, indices) } else { (0, MatchIndices::new()) }
            }
            None => (0, MatchIndices::new()),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;
    use crate::fuzzy_matcher::util::{assert_order, wrap_matches};

    fn wrap_first(choice: &str, pattern: &str) -> Option<String> {
        let choice_chars: Vec<char> = choice.chars().collect();
        let pattern_chars: Vec<char> = pattern.chars().collect();
        let indices = first_occurrence(&choice_chars, &pattern_chars)?;
        Some(wrap_matches(choice, &indices))
    }

    #[test]
    fn test_no_occurrence() {
        assert_eq!(None, wrap_first("abc", "abx"));
        assert_eq!(None, wrap_first("abc", ""));
        assert_eq!(None, wrap_first("", "a"));
        assert_eq!(None, wrap_first("cba", "abc"));
    }

    #[test]
    fn test_backward_scan_shrinks_window() {
        assert_eq!(
            Some("a_____b___[a][b][c]__".to_string()),
            wrap_first("a_____b___abc__", "abc")
        );
        assert_eq!(Some("[a]x[b]y[c]z".to_string()), wrap_first("axbycz", "abc"));
    }

    #[test]
    fn test_only_first_occurrence() {
        // the tighter "abc" at the end is never reached
        assert_eq!(Some("[a]x[b]x[c]abc".to_string()), wrap_first("axbxcabc", "abc"));
    }

    #[test]
    fn test_scores() {
        let matcher = FirstOccurrenceMatcher::default();
        assert_eq!(matcher.fuzzy_match("foobar", "fo"), 4);
        assert_eq!(matcher.fuzzy_match("axbycz", "abc"), 4);
        assert_eq!(matcher.fuzzy_match("a_____b___abc__", "abc"), 6);
        assert_eq!(matcher.fuzzy_match("out-of-bound", "oob"), 1);
        assert_eq!(matcher.fuzzy_match("foobar", ""), 0);
        assert_eq!(matcher.fuzzy_match("", "foo"), 0);
    }

    #[test]
    fn test_wide_window_clamps_to_zero() {
        let matcher = FirstOccurrenceMatcher::default();
        let (score, indices) = matcher.fuzzy_indices("fuzzy-finder", "ff");
        assert_eq!(score, 0);
        assert!(indices.is_empty());
    }

    #[test]
    fn test_indices() {
        let matcher = FirstOccurrenceMatcher::default();
        let (score, indices) = matcher.fuzzy_indices("funder-sfinder", "furf");
        assert_eq!(score, 3);
        assert_eq!(indices, vec![0, 1, 5, 8]);
    }

    #[test]
    fn test_custom_weights() {
        let matcher = FirstOccurrenceMatcher::new(Weights::new(10, 0, -1));
        assert_eq!(matcher.fuzzy_match("fuzzy-finder", "ff"), 15);
    }

    #[test]
    fn test_huge_weights_saturate() {
        let matcher = FirstOccurrenceMatcher::new(Weights::new(i64::MAX / 2 + 1, -1, -1));
        assert_eq!(matcher.fuzzy_match("aa", "aa"), i64::MAX);

        let matcher = FirstOccurrenceMatcher::new(Weights::new(2, -1, i64::MIN));
        assert_eq!(matcher.fuzzy_match("axb", "ab"), 0);
        assert_eq!(matcher.fuzzy_match("ab", "ab"), 4);
    }

    #[test]
    fn test_match_quality_ordering() {
        let matcher = FirstOccurrenceMatcher::default();
        assert_order(&matcher, "ab", &["ab", "axb", "axxxb"]);
        assert_order(&matcher, "furf", &["funder-sfinder", "sinderfinder"]);
    }
}
