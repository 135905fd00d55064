//! Turn raw file lines into comparison keys.
//!
//! Every option is independent. Lines dropped by regex exclusion or blank
//! filtering disappear from the sequence entirely, so later lines are
//! renumbered.

use std::path::Path;

use bstr::{BString, ByteSlice};
use regex::bytes::Regex;

use crate::DiffError;

/// Default number of spaces a tab expands to.
pub const DEFAULT_TAB_SIZE: usize = 8;

/// Options controlling how a raw line becomes a comparison key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Drop empty lines (`-B`).
    pub ignore_blank_lines: bool,
    /// Compare case-insensitively (`-i`).
    pub ignore_case: bool,
    /// Trim and collapse whitespace runs to one space (`-b`).
    pub ignore_space_change: bool,
    /// Remove all whitespace (`-w`).
    pub ignore_all_space: bool,
    /// Strip trailing carriage returns (`--strip-trailing-cr`).
    pub strip_trailing_cr: bool,
    /// Replace each tab with `tab_size` spaces (`-t`).
    pub expand_tabs: bool,
    pub tab_size: usize,
    /// Drop lines matching any of these patterns (`-I`).
    pub ignore_matching_lines: Vec<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            ignore_blank_lines: false,
            ignore_case: false,
            ignore_space_change: false,
            ignore_all_space: false,
            strip_trailing_cr: false,
            expand_tabs: false,
            tab_size: DEFAULT_TAB_SIZE,
            ignore_matching_lines: Vec::new(),
        }
    }
}

/// A line as fed to the diff engine.
///
/// Equality compares `key` only, so two lines that differ solely in what the
/// active normalization removes are considered equal.
#[derive(Debug, Clone, Eq)]
pub struct Line {
    /// The line as read, without its `\n` terminator.
    pub raw: BString,
    /// The normalized comparison key.
    pub key: BString,
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

/// Compiled form of [`NormalizeOptions`].
#[derive(Debug, Clone)]
pub struct Normalizer {
    options: NormalizeOptions,
    patterns: Vec<Regex>,
    tab: BString,
}

impl Normalizer {
    /// Compile the exclusion patterns. An invalid pattern is reported here,
    /// before any input is read.
    pub fn new(options: &NormalizeOptions) -> Result<Self, DiffError> {
        let patterns = options
            .ignore_matching_lines
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| DiffError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            options: options.clone(),
            patterns,
            tab: BString::from(vec![b' '; options.tab_size]),
        })
    }

    /// Normalize one raw line. `None` means the line is dropped.
    pub fn normalize(&self, raw: &[u8]) -> Option<BString> {
        if self.patterns.iter().any(|re| re.is_match(raw)) {
            return None;
        }
        if self.options.ignore_blank_lines && is_blank(raw) {
            return None;
        }

        let mut key = BString::from(raw);
        if self.options.ignore_case {
            key = BString::from(key.to_uppercase());
        }
        if self.options.ignore_space_change {
            key = join_fields(key.trim(), b" ");
        }
        if self.options.ignore_all_space {
            key = join_fields(&key, b"");
        }
        if self.options.strip_trailing_cr {
            while key.last() == Some(&b'\r') {
                key.pop();
            }
        }
        if self.options.expand_tabs {
            key = BString::from(key.replace(b"\t", &self.tab));
        }
        Some(key)
    }

    /// Split `data` into lines and normalize each, dropping skipped lines.
    pub fn lines(&self, data: &[u8]) -> Vec<Line> {
        split_lines(data)
            .into_iter()
            .filter_map(|raw| {
                self.normalize(raw).map(|key| Line {
                    raw: BString::from(raw),
                    key,
                })
            })
            .collect()
    }
}

/// An empty line, or one holding only the `\r` of a CRLF terminator.
fn is_blank(raw: &[u8]) -> bool {
    raw.strip_suffix(b"\r").unwrap_or(raw).is_empty()
}

/// Join the runs of `line` separated by ASCII whitespace with `sep`.
///
/// Only `\t`, `\n`, `\x0c`, `\r` and space separate runs; other Unicode
/// spaces such as U+00A0 are kept as content.
fn join_fields(line: &[u8], sep: &[u8]) -> BString {
    let runs: Vec<&[u8]> = line
        .split(|b| b.is_ascii_whitespace())
        .filter(|run| !run.is_empty())
        .collect();
    BString::from(runs.join(sep))
}

/// Split a byte slice into lines, dropping the `\n` terminators.
///
/// A final line without a terminator is kept; a trailing `\n` does not
/// produce an extra empty line.
pub fn split_lines(data: &[u8]) -> Vec<&[u8]> {
    if data.is_empty() {
        return Vec::new();
    }
    let body = data.strip_suffix(b"\n").unwrap_or(data);
    body.split(|&b| b == b'\n').collect()
}

/// Read `path` and normalize its lines.
pub fn read_lines(path: &Path, normalizer: &Normalizer) -> Result<Vec<Line>, DiffError> {
    let data = std::fs::read(path).map_err(|source| DiffError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = normalizer.lines(&data);
    log::debug!("{}: {} lines after normalization", path.display(), lines.len());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(f: impl FnOnce(&mut NormalizeOptions)) -> Normalizer {
        let mut opts = NormalizeOptions::default();
        f(&mut opts);
        Normalizer::new(&opts).unwrap()
    }

    fn key(n: &Normalizer, raw: &str) -> Option<String> {
        n.normalize(raw.as_bytes()).map(|k| k.to_string())
    }

    #[test]
    fn split_lines_empty() {
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn split_lines_terminated() {
        assert_eq!(split_lines(b"a\nb\n"), vec![b"a".as_slice(), b"b"]);
    }

    #[test]
    fn split_lines_unterminated() {
        assert_eq!(split_lines(b"a\nb"), vec![b"a".as_slice(), b"b"]);
    }

    #[test]
    fn split_lines_keeps_blank_lines() {
        assert_eq!(split_lines(b"\n\nx\n"), vec![b"".as_slice(), b"", b"x"]);
        assert_eq!(split_lines(b"\n"), vec![b"".as_slice()]);
    }

    #[test]
    fn split_lines_keeps_cr() {
        assert_eq!(split_lines(b"a\r\nb\r\n"), vec![b"a\r".as_slice(), b"b\r"]);
    }

    #[test]
    fn default_is_identity() {
        let n = normalizer(|_| {});
        assert_eq!(key(&n, "  Mixed\tCase \r").as_deref(), Some("  Mixed\tCase \r"));
        assert_eq!(key(&n, "").as_deref(), Some(""));
    }

    #[test]
    fn ignore_case_uppercases() {
        let n = normalizer(|o| o.ignore_case = true);
        assert_eq!(key(&n, "Foo"), key(&n, "foo"));
        assert_eq!(key(&n, "foo").as_deref(), Some("FOO"));
    }

    #[test]
    fn ignore_space_change_collapses() {
        let n = normalizer(|o| o.ignore_space_change = true);
        assert_eq!(key(&n, "  a \t b  c ").as_deref(), Some("a b c"));
    }

    #[test]
    fn ignore_all_space_removes() {
        let n = normalizer(|o| o.ignore_all_space = true);
        assert_eq!(key(&n, " a b\tc ").as_deref(), Some("abc"));
    }

    #[test]
    fn whitespace_options_split_on_ascii_only() {
        let n = normalizer(|o| o.ignore_all_space = true);
        assert_eq!(key(&n, "a\u{a0}b c").as_deref(), Some("a\u{a0}bc"));
        assert_eq!(key(&n, "a\x0bb").as_deref(), Some("a\x0bb"));

        let n = normalizer(|o| o.ignore_space_change = true);
        assert_eq!(key(&n, "a\u{a0}\u{a0}b  c").as_deref(), Some("a\u{a0}\u{a0}b c"));
        // Leading and trailing Unicode spaces are trimmed.
        assert_eq!(key(&n, "\u{a0} a b \u{a0}").as_deref(), Some("a b"));
    }

    #[test]
    fn strip_trailing_cr_only_at_end() {
        let n = normalizer(|o| o.strip_trailing_cr = true);
        assert_eq!(key(&n, "a\rb\r\r").as_deref(), Some("a\rb"));
    }

    #[test]
    fn expand_tabs_uses_tab_size() {
        let n = normalizer(|o| o.expand_tabs = true);
        assert_eq!(key(&n, "\tx").as_deref(), Some("        x"));

        let n = normalizer(|o| {
            o.expand_tabs = true;
            o.tab_size = 2;
        });
        assert_eq!(key(&n, "a\tb\t").as_deref(), Some("a  b  "));
    }

    #[test]
    fn blank_lines_dropped() {
        let n = normalizer(|o| o.ignore_blank_lines = true);
        assert_eq!(key(&n, ""), None);
        assert_eq!(key(&n, " ").as_deref(), Some(" "));
    }

    #[test]
    fn crlf_blank_lines_dropped() {
        let n = normalizer(|o| o.ignore_blank_lines = true);
        assert_eq!(key(&n, "\r"), None);
        assert_eq!(key(&n, "\r\r").as_deref(), Some("\r\r"));

        let n = normalizer(|o| {
            o.ignore_blank_lines = true;
            o.strip_trailing_cr = true;
        });
        let crlf = n.lines(b"x\r\n\r\ny\r\n");
        let lf = n.lines(b"x\ny\n");
        assert_eq!(crlf.len(), 2);
        assert_eq!(crlf, lf);
    }

    #[test]
    fn matching_lines_checked_on_raw_line() {
        let n = normalizer(|o| {
            o.ignore_matching_lines = vec!["^#".to_string(), "TODO".to_string()];
            o.ignore_case = true;
        });
        assert_eq!(key(&n, "# comment"), None);
        assert_eq!(key(&n, "x // TODO"), None);
        // Case folding happens after the exclusion check.
        assert_eq!(key(&n, "todo").as_deref(), Some("TODO"));
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        let opts = NormalizeOptions {
            ignore_matching_lines: vec!["(unclosed".to_string()],
            ..NormalizeOptions::default()
        };
        let err = Normalizer::new(&opts).unwrap_err();
        assert!(matches!(err, DiffError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn dropped_lines_shift_numbering() {
        let n = normalizer(|o| o.ignore_matching_lines = vec!["^#".to_string()]);
        let lines = n.lines(b"# header\na\n# mid\nb\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].raw, "a");
        assert_eq!(lines[1].raw, "b");
    }

    #[test]
    fn line_equality_uses_key() {
        let n = normalizer(|o| o.ignore_case = true);
        let a = n.lines(b"Foo\n");
        let b = n.lines(b"foo\n");
        assert_eq!(a, b);
        assert_ne!(a[0].raw, b[0].raw);
    }

    #[test]
    fn read_lines_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let err = read_lines(&missing, &normalizer(|_| {})).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn read_lines_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "one\n\ntwo").unwrap();
        let lines = read_lines(&path, &normalizer(|o| o.ignore_blank_lines = true)).unwrap();
        let raws: Vec<_> = lines.iter().map(|l| l.raw.to_string()).collect();
        assert_eq!(raws, vec!["one", "two"]);
    }
}
