//! Normal diff format output.
//!
//! Each hunk is a `<range>c<range>`, `0a<range>` or `<range>d0` header,
//! followed by `<`-prefixed before lines, a `------------` separator for
//! changes, `>`-prefixed after lines, and an empty line.

use bstr::ByteSlice;
use dcmp_utils::color::ColorConfig;

use crate::algorithm::{Hunk, Side};
use crate::color::{colorize_after, colorize_before, colorize_header};

/// Separator between the before and after blocks of a change.
pub const SEPARATOR: &str = "------------";

/// Format hunks in document order.
pub fn format_hunks<T: AsRef<[u8]>>(hunks: &[Hunk<'_, T>], config: &ColorConfig, color: bool) -> String {
    let mut out = String::new();
    for hunk in hunks {
        format_hunk(&mut out, hunk, config, color);
    }
    out
}

/// Header text of a hunk, without styling.
///
/// A missing side is written as `0`.
pub fn header<T>(hunk: &Hunk<'_, T>) -> String {
    let before = hunk.before().map_or_else(|| "0".to_string(), |s| s.range.to_string());
    let after = hunk.after().map_or_else(|| "0".to_string(), |s| s.range.to_string());
    format!("{}{}{}", before, hunk.kind().as_char(), after)
}

/// Format a hunk header and body.
fn format_hunk<T: AsRef<[u8]>>(out: &mut String, hunk: &Hunk<'_, T>, config: &ColorConfig, color: bool) {
    out.push_str(&colorize_header(&header(hunk), config, color));
    out.push('\n');

    if let Some(before) = hunk.before() {
        out.push_str(&colorize_before(&body(before, '<'), config, color));
        out.push('\n');
    }
    if let Hunk::Change { .. } = hunk {
        out.push_str(SEPARATOR);
        out.push('\n');
    }
    if let Some(after) = hunk.after() {
        out.push_str(&colorize_after(&body(after, '>'), config, color));
        out.push('\n');
    }

    out.push('\n');
}

/// Prefix every line of `side` with `marker` and join them with newlines.
fn body<T: AsRef<[u8]>>(side: &Side<'_, T>, marker: char) -> String {
    side.lines
        .iter()
        .map(|line| format!("{}{}", marker, line.as_ref().to_str_lossy()))
        .collect::<Vec<_>>()
        .join("\n")
}
