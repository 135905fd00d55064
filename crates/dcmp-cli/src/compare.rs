use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use dcmp_diff::{diff_files, DiffOptions, NormalizeOptions};
use dcmp_utils::cli::ColorWhen;
use dcmp_utils::color::{use_color_stdout, ColorConfig};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Output only whether the files differ
    #[arg(short = 'q', long)]
    brief: bool,

    /// Report when the two files are the same
    #[arg(short = 's', long = "report-identical-files")]
    report_identical_files: bool,

    /// Drop empty lines before comparing
    #[arg(short = 'B', long)]
    ignore_blank_lines: bool,

    /// Ignore case differences in file contents
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Ignore changes in the amount of white space
    #[arg(short = 'b', long)]
    ignore_space_change: bool,

    /// Ignore all white space
    #[arg(short = 'w', long)]
    ignore_all_space: bool,

    /// Strip trailing carriage return on input
    #[arg(long)]
    strip_trailing_cr: bool,

    /// Ignore lines that match the regular expression (repeatable)
    #[arg(short = 'I', long = "ignore-matching-lines", value_name = "RE")]
    ignore_matching_lines: Vec<String>,

    /// Expand tabs to spaces before comparing
    #[arg(short = 't', long)]
    expand_tabs: bool,

    /// Number of spaces a tab expands to
    #[arg(
        long,
        value_name = "NUM",
        default_value_t = dcmp_diff::normalize::DEFAULT_TAB_SIZE,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    tabsize: usize,

    /// When to show colored output (auto, always, never)
    #[arg(long, value_name = "when")]
    color: Option<ColorWhen>,

    /// Refuse inputs whose comparison table would exceed this many cells
    #[arg(long, value_name = "CELLS", default_value_t = dcmp_diff::DEFAULT_MAX_TABLE_CELLS)]
    max_table_cells: u64,

    /// File to compare from
    #[arg(value_name = "BEFORE")]
    before: PathBuf,

    /// File to compare to
    #[arg(value_name = "AFTER")]
    after: PathBuf,
}

impl CompareArgs {
    fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            ignore_blank_lines: self.ignore_blank_lines,
            ignore_case: self.ignore_case,
            ignore_space_change: self.ignore_space_change,
            ignore_all_space: self.ignore_all_space,
            strip_trailing_cr: self.strip_trailing_cr,
            expand_tabs: self.expand_tabs,
            tab_size: self.tabsize,
            ignore_matching_lines: self.ignore_matching_lines.clone(),
        }
    }
}

pub fn run(args: &CompareArgs) -> Result<i32> {
    // Configuration errors surface before any file is touched.
    let color_config = ColorConfig::from_env(|key| std::env::var(key).ok())?;
    let mode = color_config.effective_mode(args.color.map(Into::into));

    let options = DiffOptions {
        normalize: args.normalize_options(),
        brief: args.brief,
        report_identical: args.report_identical_files,
        color: use_color_stdout(mode),
        max_table_cells: Some(args.max_table_cells),
    };
    log::debug!("comparing {} with {}", args.before.display(), args.after.display());

    let outcome = diff_files(&args.before, &args.after, &options, &color_config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(outcome.message(&options).as_bytes())?;
    out.flush()?;

    Ok(outcome.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cli;
    use clap::Parser;

    fn parse(argv: &[&str]) -> CompareArgs {
        Cli::try_parse_from(argv.iter().copied()).unwrap().args
    }

    #[test]
    fn requires_two_paths() {
        assert!(Cli::try_parse_from(["dcmp"]).is_err());
        assert!(Cli::try_parse_from(["dcmp", "a"]).is_err());
        assert!(Cli::try_parse_from(["dcmp", "a", "b", "c"]).is_err());
    }

    #[test]
    fn defaults() {
        let args = parse(&["dcmp", "a.txt", "b.txt"]);
        assert_eq!(args.before, PathBuf::from("a.txt"));
        assert_eq!(args.after, PathBuf::from("b.txt"));
        assert!(!args.brief);
        assert_eq!(args.color, None);
        assert_eq!(args.max_table_cells, dcmp_diff::DEFAULT_MAX_TABLE_CELLS);
        assert_eq!(args.normalize_options(), NormalizeOptions::default());
    }

    #[test]
    fn short_flags_map_to_options() {
        let args = parse(&["dcmp", "-q", "-s", "-B", "-i", "-b", "-w", "-t", "a", "b"]);
        assert!(args.brief);
        assert!(args.report_identical_files);
        let opts = args.normalize_options();
        assert!(opts.ignore_blank_lines);
        assert!(opts.ignore_case);
        assert!(opts.ignore_space_change);
        assert!(opts.ignore_all_space);
        assert!(opts.expand_tabs);
        assert!(!opts.strip_trailing_cr);
    }

    #[test]
    fn repeatable_patterns() {
        let args = parse(&["dcmp", "-I", "^#", "--ignore-matching-lines", "TODO", "a", "b"]);
        assert_eq!(args.ignore_matching_lines, vec!["^#", "TODO"]);
    }

    #[test]
    fn color_and_tabsize() {
        let args = parse(&["dcmp", "--color=always", "--tabsize", "4", "a", "b"]);
        assert_eq!(args.color, Some(ColorWhen::Always));
        assert_eq!(args.normalize_options().tab_size, 4);
    }

    #[test]
    fn rejects_bad_color_and_zero_tabsize() {
        assert!(Cli::try_parse_from(["dcmp", "--color", "sometimes", "a", "b"]).is_err());
        assert!(Cli::try_parse_from(["dcmp", "--tabsize", "0", "a", "b"]).is_err());
    }
}
