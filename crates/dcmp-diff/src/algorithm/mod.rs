//! Line-diff engine: LCS table, pair backtracking and hunk classification.
//!
//! The engine works on any slice of `PartialEq` items. Callers decide what
//! equality means by choosing the item type; [`crate::normalize::Line`]
//! compares by its normalized key.

pub mod classify;
pub mod lcs;

use std::fmt;

pub use classify::classify;
pub use lcs::{lcs_pairs, LcsTable};

/// A pair of 1-indexed positions, one per side, holding equal lines that
/// belong to the chosen longest common subsequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchedPair {
    /// Position in the before sequence (1-based).
    pub before: usize,
    /// Position in the after sequence (1-based).
    pub after: usize,
}

impl MatchedPair {
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }
}

/// An inclusive, 1-indexed line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of lines covered.
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Kind of a reported difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkKind {
    Change,
    Add,
    Delete,
}

impl HunkKind {
    /// Single-character command letter used in hunk headers.
    pub fn as_char(&self) -> char {
        match self {
            Self::Change => 'c',
            Self::Add => 'a',
            Self::Delete => 'd',
        }
    }
}

/// One side of a hunk: the range it covers and the lines in that range,
/// borrowed from the compared sequence.
#[derive(Debug, PartialEq, Eq)]
pub struct Side<'a, T> {
    pub range: LineRange,
    pub lines: &'a [T],
}

impl<T> Clone for Side<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Side<'_, T> {}

impl<'a, T> Side<'a, T> {
    /// Take the lines `start..=end` (1-indexed) of `seq`.
    pub(crate) fn of(seq: &'a [T], start: usize, end: usize) -> Self {
        Self {
            range: LineRange::new(start, end),
            lines: &seq[start - 1..end],
        }
    }
}

/// A single reported unit of difference.
#[derive(Debug, PartialEq, Eq)]
pub enum Hunk<'a, T> {
    /// Lines on both sides were replaced.
    Change { before: Side<'a, T>, after: Side<'a, T> },
    /// Lines exist only in the after sequence.
    Add { after: Side<'a, T> },
    /// Lines exist only in the before sequence.
    Delete { before: Side<'a, T> },
}

impl<T> Clone for Hunk<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Hunk<'_, T> {}

impl<'a, T> Hunk<'a, T> {
    pub fn kind(&self) -> HunkKind {
        match self {
            Self::Change { .. } => HunkKind::Change,
            Self::Add { .. } => HunkKind::Add,
            Self::Delete { .. } => HunkKind::Delete,
        }
    }

    /// The before side, absent for additions.
    pub fn before(&self) -> Option<&Side<'a, T>> {
        match self {
            Self::Change { before, .. } | Self::Delete { before } => Some(before),
            Self::Add { .. } => None,
        }
    }

    /// The after side, absent for deletions.
    pub fn after(&self) -> Option<&Side<'a, T>> {
        match self {
            Self::Change { after, .. } | Self::Add { after } => Some(after),
            Self::Delete { .. } => None,
        }
    }
}

/// True when every line on both sides took part in the match, i.e. the
/// sequences are element-wise equal.
pub fn is_identical(pairs: usize, before_len: usize, after_len: usize) -> bool {
    pairs == before_len && pairs == after_len
}

/// Result of comparing two sequences.
#[derive(Debug, Clone)]
pub struct Comparison<'a, T> {
    /// Whether both sequences are equal element-wise.
    pub identical: bool,
    /// Matched pairs of the chosen LCS, in ascending order.
    pub pairs: Vec<MatchedPair>,
    /// Hunks in document order (empty when identical).
    pub hunks: Vec<Hunk<'a, T>>,
}

impl<T> Comparison<'_, T> {
    /// Number of lines present only on the after side.
    pub fn insertions(&self) -> usize {
        self.hunks
            .iter()
            .filter_map(|h| h.after())
            .map(|s| s.range.len())
            .sum()
    }

    /// Number of lines present only on the before side.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .filter_map(|h| h.before())
            .map(|s| s.range.len())
            .sum()
    }
}

/// Compare two sequences: build the LCS, decide identity, and classify the
/// gaps into hunks. Classification is skipped for identical inputs.
pub fn compare<'a, T: PartialEq>(before: &'a [T], after: &'a [T]) -> Comparison<'a, T> {
    let pairs = lcs_pairs(before, after);
    let identical = is_identical(pairs.len(), before.len(), after.len());
    let hunks = if identical {
        Vec::new()
    } else {
        classify(before, after, &pairs)
    };
    log::debug!(
        "compared {} vs {} lines: {} matched, {} hunks",
        before.len(),
        after.len(),
        pairs.len(),
        hunks.len()
    );
    Comparison {
        identical,
        pairs,
        hunks,
    }
}
