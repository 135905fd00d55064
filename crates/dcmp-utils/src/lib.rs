//! Foundation utilities shared by the dcmp crates.
//!
//! Holds the common error type, the ANSI color model used by the renderer,
//! and clap value types reused by the command-line front end.

pub mod cli;
pub mod color;
pub mod error;

pub use error::UtilError;

pub type Result<T> = std::result::Result<T, UtilError>;
