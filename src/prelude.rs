//! Convenience re-exports of commonly used types.
//!
//! This module provides a convenient way to import all the commonly used
//! websee types and traits with a single `use websee::prelude::*;` statement.

pub use crate::fuzzy_matcher::first_occurrence::FirstOccurrenceMatcher;
pub use crate::fuzzy_matcher::smith_waterman::{Alignment, EditOp, SmithWatermanMatcher};
pub use crate::fuzzy_matcher::{FuzzyMatcher, ScoreType, Weights};
pub use crate::options::{MatchOptions, MatchOptionsBuilder};
pub use crate::reader::{CandidateReaderOption, read_candidates};
pub use crate::*;
