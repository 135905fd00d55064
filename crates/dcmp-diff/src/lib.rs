//! Diff engine: LCS table, pair backtracking, hunk classification, line
//! normalization and normal-format output.
//!
//! The engine in [`algorithm`] is a pure function of two in-memory
//! sequences and never fails. Everything that can fail (reading files,
//! compiling `-I` patterns, bounding the table size) happens in this crate's
//! collaborators before the engine runs.

pub mod algorithm;
pub mod color;
pub mod format;
pub mod normalize;

use std::path::{Path, PathBuf};

use dcmp_utils::color::ColorConfig;

/// Default ceiling on LCS table cells, about 400 MB of table.
pub const DEFAULT_MAX_TABLE_CELLS: u64 = 100_000_000;

pub use algorithm::{compare, Comparison, Hunk, HunkKind, LineRange, MatchedPair, Side};
pub use normalize::{Line, NormalizeOptions, Normalizer};

/// Options controlling a file comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// How raw lines become comparison keys.
    pub normalize: NormalizeOptions,
    /// Only report whether the files differ (`-q`).
    pub brief: bool,
    /// Report when the files are identical (`-s`).
    pub report_identical: bool,
    /// Enable color output.
    pub color: bool,
    /// Refuse comparisons whose LCS table would exceed this many cells.
    /// `None` disables the check.
    pub max_table_cells: Option<u64>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            brief: false,
            report_identical: false,
            color: false,
            max_table_cells: Some(DEFAULT_MAX_TABLE_CELLS),
        }
    }
}

/// What a comparison of two files found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The files are equal under the active normalization.
    Identical,
    /// The files differ; brief mode suppressed the hunks.
    Differ,
    /// The files differ; `output` holds the rendered hunks.
    Changed { output: String },
}

impl Outcome {
    /// Text to write to stdout for this outcome.
    pub fn message(&self, options: &DiffOptions) -> String {
        match self {
            Self::Identical if options.report_identical => format::identical(),
            Self::Identical => String::new(),
            Self::Differ => format::brief(),
            Self::Changed { output, .. } => output.clone(),
        }
    }

    /// Process exit status: brief mode signals a difference with 1.
    ///
    /// This is a control-flow signal, not a failure; genuine errors are
    /// reported through [`DiffError`].
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Differ => 1,
            Self::Identical | Self::Changed { .. } => 0,
        }
    }
}

/// Error types for diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("{}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("input too large: comparison needs {cells} table cells, limit is {limit}")]
    TableTooLarge { cells: u128, limit: u64 },
}

/// Refuse inputs whose `(m+1) x (n+1)` table would exceed `limit` cells.
///
/// The engine performs no guarding of its own.
pub fn check_table_size(before_len: usize, after_len: usize, limit: Option<u64>) -> Result<(), DiffError> {
    let Some(limit) = limit else {
        return Ok(());
    };
    let cells = (before_len as u128 + 1) * (after_len as u128 + 1);
    if cells > u128::from(limit) {
        return Err(DiffError::TableTooLarge { cells, limit });
    }
    Ok(())
}

/// Compare two files.
///
/// Both files are read and normalized before the engine runs, so a missing
/// second file or a bad pattern produces no partial output. Brief mode skips
/// rendering.
pub fn diff_files(
    before_path: &Path,
    after_path: &Path,
    options: &DiffOptions,
    colors: &ColorConfig,
) -> Result<Outcome, DiffError> {
    let normalizer = Normalizer::new(&options.normalize)?;
    let before = normalize::read_lines(before_path, &normalizer)?;
    let after = normalize::read_lines(after_path, &normalizer)?;

    check_table_size(before.len(), after.len(), options.max_table_cells)?;

    let comparison = compare(&before, &after);
    if comparison.identical {
        log::debug!("{} and {} are identical", before_path.display(), after_path.display());
        return Ok(Outcome::Identical);
    }
    log::debug!(
        "{} hunks, {} insertions, {} deletions",
        comparison.hunks.len(),
        comparison.insertions(),
        comparison.deletions()
    );
    if options.brief {
        return Ok(Outcome::Differ);
    }

    Ok(Outcome::Changed {
        output: format::normal::format_hunks(&comparison.hunks, colors, options.color),
    })
}
