//! Configuration options for websee.
//!
//! [`MatchOptions`] selects the scoring algorithm and its weights, how case is
//! handled, and how a batch is run. Options can be built in code through
//! [`MatchOptionsBuilder`] or read from a RON document:
//!
//! ```
//! use websee::prelude::*;
//!
//! let options = MatchOptions::from_ron("(algorithm: v1, weights: (gap_penalty: -2))").unwrap();
//! assert_eq!(options.algorithm, FuzzyAlgorithm::V1);
//! assert_eq!(options.weights, Weights::new(2, -1, -2));
//! ```

use std::path::Path;
use std::time::Duration;

use derive_builder::Builder;
use serde::Deserialize;

use crate::error::MatchError;
use crate::fuzzy_matcher::Weights;
use crate::CaseMatching;

//------------------------------------------------------------------------------
/// Fuzzy scoring algorithm to use
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "cli", clap(rename_all = "lowercase"))]
pub enum FuzzyAlgorithm {
    /// First occurrence of the pattern, O(n) per choice
    V1,
    /// Best local alignment (Smith-Waterman), O(n·m) per choice
    #[default]
    V2,
}

/// Options controlling a scoring batch.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct MatchOptions {
    /// Scoring algorithm
    pub algorithm: FuzzyAlgorithm,
    /// Match, mismatch and gap weights
    pub weights: Weights,
    /// Case sensitivity; the default lowercases choices and pattern
    pub case: CaseMatching,
    /// Score candidates on the rayon thread pool
    pub parallel: bool,
    /// Abort the batch when it runs longer than this many milliseconds
    pub timeout: Option<u64>,
}

impl MatchOptions {
    /// Parses options from a RON document. Missing fields keep their default.
    pub fn from_ron(text: &str) -> Result<Self, MatchError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads options from a RON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MatchError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// The timeout as a duration
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_reference_behaviour() {
        let options = MatchOptions::default();
        assert_eq!(options.algorithm, FuzzyAlgorithm::V2);
        assert_eq!(options.weights, Weights::new(2, -1, -1));
        assert_eq!(options.case, CaseMatching::Ignore);
        assert!(!options.parallel);
        assert_eq!(options.timeout_duration(), None);
    }

    #[test]
    fn builder_overrides_fields() {
        let options = MatchOptionsBuilder::default()
            .algorithm(FuzzyAlgorithm::V1)
            .parallel(true)
            .timeout(Some(250))
            .build()
            .unwrap();
        assert_eq!(options.algorithm, FuzzyAlgorithm::V1);
        assert!(options.parallel);
        assert_eq!(options.weights, Weights::default());
        assert_eq!(options.timeout_duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn ron_partial_document() {
        let options =
            MatchOptions::from_ron("(case: respect, weights: (match_score: 3, mismatch_score: -2))").unwrap();
        assert_eq!(options.case, CaseMatching::Respect);
        assert_eq!(options.weights, Weights::new(3, -2, -1));
        assert_eq!(options.algorithm, FuzzyAlgorithm::V2);
    }

    #[test]
    fn ron_single_field_document() {
        assert_eq!(MatchOptions::from_ron("(parallel: false)").unwrap(), MatchOptions::default());
    }

    #[test]
    fn ron_unknown_algorithm() {
        let err = MatchOptions::from_ron("(algorithm: v3)").unwrap_err();
        assert!(matches!(err, MatchError::Config(_)), "{err}");
    }

    #[test]
    fn from_missing_file() {
        let err = MatchOptions::from_file("/nonexistent/websee.ron").unwrap_err();
        assert!(matches!(err, MatchError::Io(_)), "{err}");
    }
}
