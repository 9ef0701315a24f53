//! This module contains the batch matcher
use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::error::MatchError;
use crate::fuzzy_matcher::first_occurrence::FirstOccurrenceMatcher;
use crate::fuzzy_matcher::smith_waterman::SmithWatermanMatcher;
use crate::fuzzy_matcher::{FuzzyMatcher, ScoreType, Weights};
use crate::options::{FuzzyAlgorithm, MatchOptions};
use crate::CaseMatching;

/// Score of one candidate, paired with the candidate as it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// The original, unmodified candidate
    pub text: String,
    /// Its score against the pattern, never negative
    pub score: ScoreType,
}

//==============================================================================
/// Control handle for an interruptible batch.
///
/// Clones share the same state, so one clone can stop a batch running on
/// another thread. The interrupt flag and deadline are checked between
/// candidates.
#[derive(Clone, Default)]
pub struct MatcherControl {
    interrupt: Arc<AtomicBool>,
    processed: Arc<AtomicUsize>,
    deadline: Option<Instant>,
}

impl MatcherControl {
    /// Stops the batch once `deadline` has passed
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stops the batch once `timeout` has elapsed from now
    pub fn timeout(self, timeout: Duration) -> Self {
        self.deadline(Instant::now() + timeout)
    }

    /// Returns the number of candidates the current (or last) batch has
    /// scored so far.
    pub fn get_num_processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }

    /// Signals the batch to stop processing.
    pub fn kill(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Returns true once `kill` has been called on any clone.
    pub fn killed(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<(), MatchError> {
        let processed = self.get_num_processed();
        if self.killed() {
            return Err(MatchError::Interrupted { processed });
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(MatchError::DeadlineExceeded { processed }),
            _ => Ok(()),
        }
    }
}

//==============================================================================
/// Scores every candidate of a batch against one pattern.
///
/// Results keep the order and the length of the candidate list; nothing is
/// sorted or filtered out.
pub struct Matcher {
    fuzzy_matcher: Box<dyn FuzzyMatcher>,
    case_matching: CaseMatching,
    parallel: bool,
}

impl Matcher {
    /// Creates a new Matcher builder around the given algorithm.
    pub fn builder(fuzzy_matcher: Box<dyn FuzzyMatcher>) -> Self {
        Self {
            fuzzy_matcher,
            case_matching: CaseMatching::default(),
            parallel: false,
        }
    }

    /// Sets the case matching mode (smart, ignore, or respect).
    pub fn case(mut self, case_matching: CaseMatching) -> Self {
        self.case_matching = case_matching;
        self
    }

    /// Scores candidates on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Finalizes the builder and returns the configured Matcher.
    pub fn build(self) -> Self {
        self
    }

    /// Creates the scoring algorithm selected by `algorithm`.
    pub fn create_fuzzy_matcher(algorithm: FuzzyAlgorithm, weights: Weights) -> Box<dyn FuzzyMatcher> {
        match algorithm {
            FuzzyAlgorithm::V1 => {
                debug!("Initialized first occurrence algorithm with {weights:?}");
                Box::new(FirstOccurrenceMatcher::new(weights))
            }
            FuzzyAlgorithm::V2 => {
                debug!("Initialized local alignment algorithm with {weights:?}");
                Box::new(SmithWatermanMatcher::new(weights))
            }
        }
    }

    /// Creates a Matcher configured from the given options.
    ///
    /// The timeout is not part of the matcher; pass it through a
    /// [`MatcherControl`] to [`Matcher::run`].
    pub fn from_options(options: &MatchOptions) -> Self {
        let fuzzy_matcher = Self::create_fuzzy_matcher(options.algorithm, options.weights);
        Matcher::builder(fuzzy_matcher)
            .case(options.case)
            .parallel(options.parallel)
            .build()
    }

    fn respect_case(&self, pattern: &str) -> bool {
        match self.case_matching {
            CaseMatching::Respect => true,
            CaseMatching::Ignore => false,
            CaseMatching::Smart => pattern.chars().any(char::is_uppercase),
        }
    }

    fn fold<'a>(text: &'a str, respect_case: bool) -> Cow<'a, str> {
        if respect_case {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.to_lowercase())
        }
    }

    fn score_one(&self, candidate: &str, pattern: &str, respect_case: bool) -> MatchResult {
        let choice = Self::fold(candidate, respect_case);
        MatchResult {
            text: candidate.to_string(),
            score: self.fuzzy_matcher.fuzzy_match(&choice, pattern),
        }
    }

    /// Scores every candidate against `pattern`, in input order.
    pub fn match_all<S>(&self, candidates: &[S], pattern: &str) -> Vec<MatchResult>
    where
        S: AsRef<str> + Sync,
    {
        let respect_case = self.respect_case(pattern);
        let pattern = Self::fold(pattern, respect_case);
        trace!("matcher start, total: {}", candidates.len());

        let score_one = |candidate: &S| self.score_one(candidate.as_ref(), &pattern, respect_case);
        let results: Vec<MatchResult> = if self.parallel {
            candidates.par_iter().map(score_one).collect()
        } else {
            candidates.iter().map(score_one).collect()
        };

        trace!("matcher stop, total: {}", results.len());
        results
    }

    /// Like [`Matcher::match_all`], but gives up as soon as `control` is
    /// killed or its deadline passes. No partial result is returned.
    ///
    /// The processed counter of `control` restarts from 0 on every call.
    pub fn run<S>(&self, candidates: &[S], pattern: &str, control: &MatcherControl) -> Result<Vec<MatchResult>, MatchError>
    where
        S: AsRef<str> + Sync,
    {
        let respect_case = self.respect_case(pattern);
        let pattern = Self::fold(pattern, respect_case);
        control.processed.store(0, Ordering::Relaxed);
        trace!("matcher start, total: {}", candidates.len());

        let score_one = |candidate: &S| -> Result<MatchResult, MatchError> {
            control.check()?;
            let result = self.score_one(candidate.as_ref(), &pattern, respect_case);
            control.processed.fetch_add(1, Ordering::Relaxed);
            Ok(result)
        };
        let results: Result<Vec<MatchResult>, MatchError> = if self.parallel {
            candidates.par_iter().map(score_one).collect()
        } else {
            candidates.iter().map(score_one).collect()
        };

        match &results {
            Ok(results) => trace!("matcher stop, total: {}", results.len()),
            Err(err) => debug!("matcher stopped early: {err}"),
        }
        results
    }
}
