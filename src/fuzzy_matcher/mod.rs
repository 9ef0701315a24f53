//! Fuzzy scoring algorithms.
//!
//! Every algorithm implements [`FuzzyMatcher`], so the batch matcher can be
//! driven by any of them. Scores are non-negative; `0` means the pattern does
//! not occur in the choice in any positively scoring way.

/// First-occurrence scan (forward scan, then backward shrink)
pub mod first_occurrence;
/// Local alignment (Smith-Waterman with linear gaps)
pub mod smith_waterman;
mod util;

pub(crate) type IndexType = usize;
/// Score produced by every matcher
pub type ScoreType = i64;

/// Char indices of the choice that took part in the match
pub type MatchIndices = Vec<IndexType>;

/// Default reward for aligning two equal characters
pub const DEFAULT_MATCH_SCORE: ScoreType = 2;
/// Default penalty for aligning two different characters
pub const DEFAULT_MISMATCH_SCORE: ScoreType = -1;
/// Default penalty for consuming a character from only one side
pub const DEFAULT_GAP_PENALTY: ScoreType = -1;

/// The three weights driving the scoring recurrences.
///
/// Any signed values are accepted; penalties are expected to be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Reward for aligning two equal characters
    pub match_score: ScoreType,
    /// Added when two different characters are aligned
    pub mismatch_score: ScoreType,
    /// Added for every insertion or deletion
    pub gap_penalty: ScoreType,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH_SCORE,
            mismatch_score: DEFAULT_MISMATCH_SCORE,
            gap_penalty: DEFAULT_GAP_PENALTY,
        }
    }
}

impl Weights {
    /// Creates weights from explicit values
    pub fn new(match_score: ScoreType, mismatch_score: ScoreType, gap_penalty: ScoreType) -> Self {
        Self {
            match_score,
            mismatch_score,
            gap_penalty,
        }
    }

    #[inline(always)]
    pub(crate) fn substitution<T: PartialEq>(&self, a: &T, b: &T) -> ScoreType {
        if a == b { self.match_score } else { self.mismatch_score }
    }
}

/// Trait for fuzzy scoring a pattern against choices.
///
/// Characters are compared exactly: case folding is the caller's job.
pub trait FuzzyMatcher: Send + Sync {
    /// Score `pattern` against `choice`, returning the score & matched indices of characters
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> (ScoreType, MatchIndices);

    /// Score `pattern` against `choice`
    fn fuzzy_match(&self, choice: &str, pattern: &str) -> ScoreType {
        self.fuzzy_indices(choice, pattern).0
    }
}
