//! Colored diff output formatting.
//!
//! Wraps hunk headers and bodies in ANSI escape sequences using ColorConfig
//! from dcmp-utils. Styling is always passed in explicitly.

use dcmp_utils::color::{ColorConfig, ColorSlot};

/// Format a hunk header (`2-3c2-4`) with color.
pub fn colorize_header(header: &str, config: &ColorConfig, enabled: bool) -> String {
    config.paint(ColorSlot::Header, header, enabled)
}

/// Format a block of before lines (`<...`) with color.
pub fn colorize_before(body: &str, config: &ColorConfig, enabled: bool) -> String {
    config.paint(ColorSlot::Before, body, enabled)
}

/// Format a block of after lines (`>...`) with color.
pub fn colorize_after(body: &str, config: &ColorConfig, enabled: bool) -> String {
    config.paint(ColorSlot::After, body, enabled)
}
