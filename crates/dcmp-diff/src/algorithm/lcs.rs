//! Longest-common-subsequence table and pair backtracking.
//!
//! The table is the classic dense `(m+1) x (n+1)` dynamic-programming
//! matrix: Θ(m·n) time and memory. Inputs are expected to be bounded by the
//! caller (see [`crate::check_table_size`]).

use super::MatchedPair;

/// Dense LCS length table.
///
/// `get(i, j)` is the LCS length of `before[..i]` and `after[..j]`. Row 0 and
/// column 0 are all zero. Cells are `u32`: a table whose LCS length could
/// overflow one would not fit in memory anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsTable {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    /// Fill the table for `before` (rows) against `after` (columns).
    pub fn build<T: PartialEq>(before: &[T], after: &[T]) -> Self {
        let rows = before.len() + 1;
        let cols = after.len() + 1;
        let mut cells = vec![0u32; rows * cols];

        for i in 1..rows {
            for j in 1..cols {
                cells[i * cols + j] = if before[i - 1] == after[j - 1] {
                    cells[(i - 1) * cols + (j - 1)] + 1
                } else {
                    cells[(i - 1) * cols + j].max(cells[i * cols + (j - 1)])
                };
            }
        }

        Self { rows, cols, cells }
    }

    /// Number of rows (`before.len() + 1`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`after.len() + 1`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j] as usize
    }

    /// Length of the longest common subsequence of the full inputs.
    pub fn lcs_len(&self) -> usize {
        self.get(self.rows - 1, self.cols - 1)
    }

    /// Walk back from the bottom-right corner and recover one LCS as
    /// ascending matched pairs.
    ///
    /// Equal lines are always taken diagonally. Otherwise the walk moves up
    /// (leaving the before line unmatched) when `T[i-1][j] >= T[i][j-1]`,
    /// and left only when the left cell is strictly larger. This tie-break
    /// fixes which of several equally long subsequences is reported.
    pub fn backtrack<T: PartialEq>(&self, before: &[T], after: &[T]) -> Vec<MatchedPair> {
        debug_assert_eq!(self.rows, before.len() + 1);
        debug_assert_eq!(self.cols, after.len() + 1);

        let mut pairs = Vec::with_capacity(self.lcs_len());
        let (mut i, mut j) = (before.len(), after.len());

        while i > 0 && j > 0 {
            if before[i - 1] == after[j - 1] {
                pairs.push(MatchedPair::new(i, j));
                i -= 1;
                j -= 1;
            } else if self.get(i - 1, j) >= self.get(i, j - 1) {
                i -= 1;
            } else {
                j -= 1;
            }
        }

        // Collected from the end of both sequences.
        pairs.reverse();
        pairs
    }
}

/// Compute the matched pairs of one LCS of `before` and `after`.
///
/// The table only lives for the duration of this call.
pub fn lcs_pairs<T: PartialEq>(before: &[T], after: &[T]) -> Vec<MatchedPair> {
    let table = LcsTable::build(before, after);
    log::debug!(
        "lcs table {}x{}, lcs length {}",
        table.rows(),
        table.cols(),
        table.lcs_len()
    );
    table.backtrack(before, after)
}
