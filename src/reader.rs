//! Reads candidate lists from byte streams.
//!
//! This is the validation boundary: records that are not valid UTF-8 are
//! rejected here with [`MatchError::InvalidInput`] and never reach a matcher.

use std::io::BufRead;

use crate::error::MatchError;

/// Options for splitting an input stream into candidates
#[derive(Debug, Clone, Copy)]
pub struct CandidateReaderOption {
    line_ending: u8,
}

impl Default for CandidateReaderOption {
    fn default() -> Self {
        Self { line_ending: b'\n' }
    }
}

impl CandidateReaderOption {
    /// Splits on NUL instead of newline
    pub fn read0(mut self, enable: bool) -> Self {
        self.line_ending = if enable { b'\0' } else { b'\n' };
        self
    }

    /// The record separator
    pub fn line_ending(&self) -> u8 {
        self.line_ending
    }
}

/// Reads every record of `source` as a candidate.
///
/// Empty records in the middle of the stream are kept as empty candidates; a
/// trailing separator does not produce one. With newline separators a
/// trailing `\r` is dropped from each record.
pub fn read_candidates<R: BufRead>(source: R, option: CandidateReaderOption) -> Result<Vec<String>, MatchError> {
    let mut candidates = Vec::new();
    for (index, record) in source.split(option.line_ending).enumerate() {
        let mut record = record?;
        if option.line_ending == b'\n' && record.last() == Some(&b'\r') {
            record.pop();
        }
        let candidate = String::from_utf8(record).map_err(|source| MatchError::InvalidInput { index, source })?;
        candidates.push(candidate);
    }
    debug!("read {} candidates", candidates.len());
    Ok(candidates)
}
