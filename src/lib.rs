//! Websee scores how well a short pattern fuzzily occurs in each of a list of
//! candidate strings.
//!
//! Every candidate gets a non-negative score usable for ranking, for example
//! in an autocomplete box. The default algorithm is a local sequence
//! alignment (Smith-Waterman) of the lowercased pattern against the
//! lowercased candidate; a cheaper first-occurrence scan is available too.
//! Results come back in input order and are never sorted or filtered.
//!
//! # Examples
//!
//! ```
//! use websee::prelude::*;
//!
//! let candidates = ["foobar", "test", "Fuzzy Finder", ""];
//! let results = websee::match_all(&candidates, "fo");
//!
//! let scores: Vec<_> = results.iter().map(|r| r.score).collect();
//! assert_eq!(scores, [4, 0, 2, 0]);
//! assert_eq!(results[2].text, "Fuzzy Finder");
//!
//! let options = MatchOptionsBuilder::default()
//!     .algorithm(FuzzyAlgorithm::V1)
//!     .build()
//!     .unwrap();
//! let matcher = Matcher::from_options(&options);
//! assert_eq!(matcher.match_all(&candidates, "fo")[0].score, 4);
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

use serde::Deserialize;

pub use crate::error::MatchError;
pub use crate::matcher::{MatchResult, Matcher, MatcherControl};
pub use crate::options::{FuzzyAlgorithm, MatchOptions};

pub mod error;
pub mod fuzzy_matcher;
pub mod matcher;
pub mod options;
pub mod prelude;
pub mod reader;

//==============================================================================
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "cli", clap(rename_all = "lowercase"))]
/// Case sensitivity mode for matching
pub enum CaseMatching {
    /// Case-sensitive matching
    Respect,
    /// Case-insensitive matching: candidates and pattern are lowercased
    #[default]
    Ignore,
    /// Smart case: case-insensitive unless the pattern contains uppercase
    Smart,
}

/// Scores every candidate against `pattern` with the default options:
/// local alignment, weights (2, -1, -1), lowercased input.
pub fn match_all<S>(candidates: &[S], pattern: &str) -> Vec<MatchResult>
where
    S: AsRef<str> + Sync,
{
    Matcher::from_options(&MatchOptions::default()).match_all(candidates, pattern)
}
