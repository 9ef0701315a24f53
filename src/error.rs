//! Errors surfaced by the batch matcher and its input boundary.

use thiserror::Error;

/// Everything that can go wrong around a scoring batch.
///
/// The scoring kernels themselves are infallible; these errors come from
/// validating input before it reaches them, or from stopping a batch early.
#[derive(Error, Debug)]
pub enum MatchError {
    /// A candidate record is not a valid character sequence
    #[error("candidate #{index} is not valid UTF-8: {source}")]
    InvalidInput {
        /// Zero-based position of the record in the input
        index: usize,
        /// The decoding failure
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// The batch was stopped through its `MatcherControl`
    #[error("matcher killed after {processed} candidates")]
    Interrupted {
        /// Candidates scored before the interruption was noticed
        processed: usize,
    },
    /// The batch did not finish before its deadline
    #[error("deadline exceeded after {processed} candidates")]
    DeadlineExceeded {
        /// Candidates scored before the deadline was noticed
        processed: usize,
    },
    /// A configuration file could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] ron::error::SpannedError),
    /// Reading input failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
