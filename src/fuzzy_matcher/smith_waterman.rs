//! Local alignment scoring (Smith-Waterman with a linear gap penalty).
//!
//! For a subject of length `m` and a query of length `n` the kernel fills an
//! `(m+1) × (n+1)` matrix where `H[i][j]` is the best score of any local
//! alignment ending at `subject[i-1]` and `query[j-1]`:
//!
//! ```text
//! H[i][j] = max(H[i-1][j-1] + s(subject[i-1], query[j-1]),
//!               H[i-1][j]   + gap,      // deletion: subject char only
//!               H[i][j-1]   + gap,      // insertion: query char only
//!               0)
//! ```
//!
//! Row 0 and column 0 are zero. The reported score is the largest cell; when
//! several cells share it, the first one met in row-major order (subject
//! outer, query inner) wins, which also fixes the alignment the traceback
//! reconstructs.
//!
//! Unlike fzf-style matchers there are no positional bonuses: mismatches and
//! omitted pattern characters are allowed and only cost their penalty.
//!
//! # Example:
//! ```
//! use websee::fuzzy_matcher::FuzzyMatcher;
//! use websee::fuzzy_matcher::smith_waterman::{SmithWatermanMatcher, align};
//! use websee::fuzzy_matcher::Weights;
//!
//! let matcher = SmithWatermanMatcher::default();
//! assert_eq!(matcher.fuzzy_match("foobar", "fo"), 4);
//! assert_eq!(matcher.fuzzy_match("test", "furf"), 0);
//!
//! let subject: Vec<char> = "axbycz".chars().collect();
//! let query: Vec<char> = "abc".chars().collect();
//! let alignment = align(&subject, &query, &Weights::default());
//! assert_eq!(alignment.aligned_subject, "axbyc");
//! assert_eq!(alignment.aligned_query, "a-b-c");
//! ```

use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::ops::Range;

use thread_local::ThreadLocal;

use crate::fuzzy_matcher::util::fill_chars;
use crate::fuzzy_matcher::{FuzzyMatcher, IndexType, MatchIndices, ScoreType, Weights};

/// Placeholder emitted in an aligned row where that side has no character.
pub const GAP: char = '-';

// ---------------------------------------------------------------------------
// Matrix & best cell
// ---------------------------------------------------------------------------

/// Dense `(m+1) × (n+1)` score matrix stored as a flat row-major buffer.
///
/// A matrix can be reused across calls: [`ScoreMatrix::reset`] resizes it and
/// zeroes every cell.
#[derive(Debug, Default, Clone)]
pub struct ScoreMatrix {
    cells: Vec<ScoreType>,
    cols: usize,
}

impl ScoreMatrix {
    /// Reshapes the matrix, setting every cell to 0
    pub fn reset(&mut self, rows: usize, cols: usize) {
        self.cells.clear();
        self.cells.resize(rows * cols, 0);
        self.cols = cols;
    }

    /// Number of rows (subject length + 1)
    pub fn rows(&self) -> usize {
        if self.cols == 0 { 0 } else { self.cells.len() / self.cols }
    }

    /// Number of columns (query length + 1)
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// Value of cell `(i, j)`
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> ScoreType {
        self.cells[self.idx(i, j)]
    }

    #[inline(always)]
    fn set(&mut self, i: usize, j: usize, value: ScoreType) {
        let idx = self.idx(i, j);
        self.cells[idx] = value;
    }
}

/// Coordinates and value of the maximum cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BestCell {
    /// Subject prefix length at the maximum
    pub row: usize,
    /// Query prefix length at the maximum
    pub col: usize,
    /// The maximum itself
    pub score: ScoreType,
}

impl BestCell {
    /// Only a strictly greater score replaces the current best.
    #[inline(always)]
    fn offer(&mut self, row: usize, col: usize, score: ScoreType) {
        if score > self.score {
            self.row = row;
            self.col = col;
            self.score = score;
        }
    }
}

#[inline(always)]
fn cell_value(diag: ScoreType, up: ScoreType, left: ScoreType) -> ScoreType {
    diag.max(up).max(left).max(0)
}

// ---------------------------------------------------------------------------
// Forward pass
// ---------------------------------------------------------------------------

/// Fills `matrix` for `subject` × `query` and returns the best cell.
pub fn fill_matrix<T: PartialEq>(
    matrix: &mut ScoreMatrix,
    subject: &[T],
    query: &[T],
    weights: &Weights,
) -> BestCell {
    matrix.reset(subject.len() + 1, query.len() + 1);
    let mut best = BestCell::default();

    for i in 1..=subject.len() {
        for j in 1..=query.len() {
            let diag = matrix.get(i - 1, j - 1).saturating_add(weights.substitution(&subject[i - 1], &query[j - 1]));
            let up = matrix.get(i - 1, j).saturating_add(weights.gap_penalty);
            let left = matrix.get(i, j - 1).saturating_add(weights.gap_penalty);
            let value = cell_value(diag, up, left);
            matrix.set(i, j, value);
            best.offer(i, j, value);
        }
    }

    best
}

/// Score-only pass keeping two rows of the matrix in `rows`.
fn best_cell_rolling<T: PartialEq>(
    rows: &mut Vec<ScoreType>,
    subject: &[T],
    query: &[T],
    weights: &Weights,
) -> BestCell {
    let cols = query.len() + 1;
    rows.clear();
    rows.resize(2 * cols, 0);
    let (mut prev, mut cur) = rows.split_at_mut(cols);
    let mut best = BestCell::default();

    for i in 1..=subject.len() {
        for j in 1..cols {
            let diag = prev[j - 1].saturating_add(weights.substitution(&subject[i - 1], &query[j - 1]));
            let up = prev[j].saturating_add(weights.gap_penalty);
            let left = cur[j - 1].saturating_add(weights.gap_penalty);
            let value = cell_value(diag, up, left);
            cur[j] = value;
            best.offer(i, j, value);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}

/// Best local alignment score of `query` inside `subject`.
///
/// Returns 0 when either side is empty or nothing aligns positively.
pub fn score<T: PartialEq>(subject: &[T], query: &[T], weights: &Weights) -> ScoreType {
    let mut rows = Vec::new();
    best_cell_rolling(&mut rows, subject, query, weights).score
}

// ---------------------------------------------------------------------------
// Traceback
// ---------------------------------------------------------------------------

/// One step of an alignment, read from its start to its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// Equal characters aligned
    Match,
    /// Different characters aligned
    Mismatch,
    /// Subject character against a gap
    Deletion,
    /// Query character against a gap
    Insertion,
}

/// Walks back from `best` while cells stay positive.
///
/// Predecessors are tried in the order diagonal, up, left. Returns the
/// operations in forward order and the cell where the walk stopped.
fn traceback<T: PartialEq>(
    matrix: &ScoreMatrix,
    subject: &[T],
    query: &[T],
    weights: &Weights,
    best: BestCell,
) -> (Vec<EditOp>, usize, usize) {
    let mut ops = Vec::with_capacity(best.row.max(best.col));
    let (mut i, mut j) = (best.row, best.col);

    while i > 0 && j > 0 && matrix.get(i, j) > 0 {
        let value = matrix.get(i, j);
        let (a, b) = (&subject[i - 1], &query[j - 1]);
        if value == matrix.get(i - 1, j - 1).saturating_add(weights.substitution(a, b)) {
            ops.push(if a == b { EditOp::Match } else { EditOp::Mismatch });
            i -= 1;
            j -= 1;
        } else if value == matrix.get(i - 1, j).saturating_add(weights.gap_penalty) {
            ops.push(EditOp::Deletion);
            i -= 1;
        } else {
            ops.push(EditOp::Insertion);
            j -= 1;
        }
    }

    ops.reverse();
    (ops, i, j)
}

/// The best local alignment of a query against a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Alignment score, same value as [`score`]
    pub score: ScoreType,
    /// Subject side, [`GAP`] where the query has an extra character
    pub aligned_subject: String,
    /// Query side, [`GAP`] where the subject has an extra character
    pub aligned_query: String,
    /// Operations from the start of the alignment to its end
    pub ops: Vec<EditOp>,
    /// Char range of the subject covered by the alignment
    pub subject_range: Range<usize>,
    /// Char range of the query covered by the alignment
    pub query_range: Range<usize>,
}

impl Alignment {
    /// Subject char indices aligned to an equal query char
    pub fn matched_indices(&self) -> MatchIndices {
        matched_indices(&self.ops, self.subject_range.start)
    }
}

impl Display for Alignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.aligned_subject, self.aligned_query)
    }
}

fn matched_indices(ops: &[EditOp], start: usize) -> MatchIndices {
    let mut indices = MatchIndices::new();
    let mut i: IndexType = start;
    for op in ops {
        match op {
            EditOp::Match => {
                indices.push(i);
                i += 1;
            }
            EditOp::Mismatch | EditOp::Deletion => i += 1,
            EditOp::Insertion => {}
        }
    }
    indices
}

/// Computes the best local alignment of `query` inside `subject`, with traceback.
pub fn align(subject: &[char], query: &[char], weights: &Weights) -> Alignment {
    let mut matrix = ScoreMatrix::default();
    let best = fill_matrix(&mut matrix, subject, query, weights);
    let (ops, start_i, start_j) = traceback(&matrix, subject, query, weights, best);

    let mut aligned_subject = String::with_capacity(ops.len());
    let mut aligned_query = String::with_capacity(ops.len());
    let (mut i, mut j) = (start_i, start_j);
    for op in &ops {
        match op {
            EditOp::Match | EditOp::Mismatch => {
                aligned_subject.push(subject[i]);
                aligned_query.push(query[j]);
                i += 1;
                j += 1;
            }
            EditOp::Deletion => {
                aligned_subject.push(subject[i]);
                aligned_query.push(GAP);
                i += 1;
            }
            EditOp::Insertion => {
                aligned_subject.push(GAP);
                aligned_query.push(query[j]);
                j += 1;
            }
        }
    }

    Alignment {
        score: best.score,
        aligned_subject,
        aligned_query,
        ops,
        subject_range: start_i..best.row,
        query_range: start_j..best.col,
    }
}

// ---------------------------------------------------------------------------
// Public matcher struct
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Buffers {
    choice: Vec<char>,
    pattern: Vec<char>,
    matrix: ScoreMatrix,
    rows: Vec<ScoreType>,
}

/// Fuzzy matcher scoring with local alignment.
///
/// Working buffers are kept per thread and reset before every call, so a
/// single matcher can be shared by a parallel batch.
#[derive(Debug, Default)]
pub struct SmithWatermanMatcher {
    weights: Weights,
    buffers: ThreadLocal<RefCell<Buffers>>,
}

impl SmithWatermanMatcher {
    /// Creates a matcher with the given weights
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            buffers: ThreadLocal::new(),
        }
    }

    /// The weights used by this matcher
    pub fn weights(&self) -> Weights {
        self.weights
    }
}

impl FuzzyMatcher for SmithWatermanMatcher {
    fn fuzzy_indices(&self, choice: &str, pattern: &str) -> (ScoreType, MatchIndices) {
        let mut buffers = self.buffers.get_or(|| RefCell::new(Buffers::default())).borrow_mut();
        let Buffers {
            choice: choice_chars,
            pattern: pattern_chars,
            matrix,
            ..
        } = &mut *buffers;
        fill_chars(choice_chars, choice);
        fill_chars(pattern_chars, pattern);

        let (choice_chars, pattern_chars) = (&choice_chars[..], &pattern_chars[..]);
        let best = fill_matrix(matrix, choice_chars, pattern_chars, &self.weights);
        let (ops, start, _) = traceback(matrix, choice_chars, pattern_chars, &self.weights, best);
        (best.score, matched_indices(&ops, start))
    }

    fn fuzzy_match(&self, choice: &str, pattern: &str) -> ScoreType {
        let mut buffers = self.buffers.get_or(|| RefCell::new(Buffers::default())).borrow_mut();
        let Buffers {
            choice: choice_chars,
            pattern: pattern_chars,
            rows,
            ..
        } = &mut *buffers;
        fill_chars(choice_chars, choice);
        fill_chars(pattern_chars, pattern);

        best_cell_rolling(rows, &choice_chars[..], &pattern_chars[..], &self.weights).score
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
