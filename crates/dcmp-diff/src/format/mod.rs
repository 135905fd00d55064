//! Diff output formatters.

pub mod normal;

/// Message printed in brief mode when the inputs differ.
pub const BRIEF_MESSAGE: &str = "Files differ";

/// Message printed when identical files are reported.
pub const IDENTICAL_MESSAGE: &str = "Files are identical";

/// The brief-mode report line.
pub fn brief() -> String {
    format!("{}\n", BRIEF_MESSAGE)
}

/// The identical-files report line.
pub fn identical() -> String {
    format!("{}\n", IDENTICAL_MESSAGE)
}
