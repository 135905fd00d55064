use std::collections::HashMap;
use std::io::IsTerminal;
use std::str::FromStr;

use crate::UtilError;

/// Environment variable holding the default color mode (`auto`, `always`, `never`).
pub const COLOR_ENV: &str = "DCMP_COLOR";

/// Environment variable holding per-slot color overrides,
/// e.g. `header=bold;before=red;after=green`.
pub const COLORS_ENV: &str = "DCMP_COLORS";

/// Color configuration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect based on terminal and NO_COLOR env var.
    #[default]
    Auto,
    /// Always emit ANSI color codes.
    Always,
    /// Never emit ANSI color codes.
    Never,
}

impl FromStr for ColorMode {
    type Err = UtilError;

    /// Parse a color mode. Only the three canonical spellings are accepted;
    /// anything else is a configuration error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(UtilError::InvalidColorMode(s.to_string())),
        }
    }
}

/// Check if color should be used for the given mode and stream.
///
/// Respects:
/// - The `NO_COLOR` environment variable (<https://no-color.org/>)
/// - The `DCMP_NO_COLOR` environment variable
/// - Whether the stream is a terminal (for Auto mode)
pub fn use_color(mode: ColorMode, is_terminal: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("DCMP_NO_COLOR").is_some() {
                return false;
            }
            is_terminal
        }
    }
}

/// Check if stdout should use color.
pub fn use_color_stdout(mode: ColorMode) -> bool {
    use_color(mode, std::io::stdout().is_terminal())
}

/// Semantic coloring points in dcmp output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    /// Hunk header such as `2-3c2-4`.
    Header,
    /// Lines taken from the before file (`<`).
    Before,
    /// Lines taken from the after file (`>`).
    After,
    Reset,
}

impl ColorSlot {
    /// Return the default ANSI escape code for this slot.
    pub fn default_ansi(&self) -> &'static str {
        match self {
            ColorSlot::Header => "\x1b[30;1m",
            ColorSlot::Before => "\x1b[31m",
            ColorSlot::After => "\x1b[32m",
            ColorSlot::Reset => "\x1b[0m",
        }
    }

    /// Look up a slot by the name used in `DCMP_COLORS`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "header" => Some(ColorSlot::Header),
            "before" | "old" => Some(ColorSlot::Before),
            "after" | "new" => Some(ColorSlot::After),
            _ => None,
        }
    }
}

/// Aggregated color configuration.
///
/// Holds the default mode taken from the environment and per-slot custom
/// ANSI codes. The renderer receives this explicitly; there is no global
/// color state.
#[derive(Debug, Clone, Default)]
pub struct ColorConfig {
    /// Mode from `DCMP_COLOR`, used when no CLI flag is given.
    pub mode: Option<ColorMode>,
    /// Per-slot custom ANSI escape codes.
    pub slots: HashMap<ColorSlot, String>,
}

impl ColorConfig {
    /// Create a new `ColorConfig` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a `ColorConfig` by reading values through a lookup function.
    ///
    /// The `get_var` closure should return the value of an environment
    /// variable if set. Passing a closure rather than reading the process
    /// environment directly keeps this testable.
    ///
    /// # Example
    ///
    /// ```
    /// use dcmp_utils::color::{ColorConfig, ColorSlot};
    ///
    /// let cc = ColorConfig::from_env(|key| match key {
    ///     "DCMP_COLORS" => Some("header=bold blue".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(cc.get_color(ColorSlot::Header), "\x1b[1;34m");
    /// ```
    pub fn from_env<F>(get_var: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cc = Self::new();

        if let Some(val) = get_var(COLOR_ENV) {
            cc.mode = Some(val.parse()?);
        }

        if let Some(val) = get_var(COLORS_ENV) {
            for entry in val.split(';').map(str::trim).filter(|e| !e.is_empty()) {
                let (name, value) = entry.split_once('=').unwrap_or((entry, ""));
                let slot = ColorSlot::from_name(name.trim())
                    .ok_or_else(|| UtilError::InvalidColorSlot(name.trim().to_string()))?;
                let ansi = parse_color_value(value).ok_or_else(|| UtilError::InvalidColorValue {
                    slot: name.trim().to_string(),
                    value: value.to_string(),
                })?;
                cc.slots.insert(slot, ansi);
            }
        }

        Ok(cc)
    }

    /// Determine the effective color mode.
    ///
    /// Priority order: CLI flag > `DCMP_COLOR` > default Auto.
    pub fn effective_mode(&self, cli_flag: Option<ColorMode>) -> ColorMode {
        cli_flag.or(self.mode).unwrap_or_default()
    }

    /// Get the ANSI escape code for a color slot.
    ///
    /// Returns the custom override if one has been configured, otherwise
    /// falls back to the slot's built-in default.
    pub fn get_color(&self, slot: ColorSlot) -> &str {
        if let Some(custom) = self.slots.get(&slot) {
            return custom;
        }
        slot.default_ansi()
    }

    /// Wrap `text` in the slot's color when `enabled`.
    pub fn paint(&self, slot: ColorSlot, text: &str, enabled: bool) -> String {
        let code = self.get_color(slot);
        if !enabled || code.is_empty() {
            return text.to_string();
        }
        format!("{}{}{}", code, text, self.get_color(ColorSlot::Reset))
    }
}

/// Parse a color value string into an ANSI escape sequence.
///
/// Supports:
/// - Named colors: `normal`, `black`, `red`, `green`, `yellow`, `blue`,
///   `magenta`, `cyan`, `white`
/// - Attributes: `bold`, `dim`, `ul` (underline), `blink`, `reverse`, `strike`
/// - 24-bit color: `#RRGGBB`
/// - Combinations: `"bold red"`, `"ul green"`, etc.
///
/// Returns an empty string for `"normal"` or an empty input, and `None` when
/// a word is not recognized.
pub fn parse_color_value(s: &str) -> Option<String> {
    let mut codes: Vec<String> = Vec::new();
    for word in s.split_whitespace() {
        let code = match word {
            "normal" => continue,
            "black" => "30",
            "red" => "31",
            "green" => "32",
            "yellow" => "33",
            "blue" => "34",
            "magenta" => "35",
            "cyan" => "36",
            "white" => "37",
            "bold" => "1",
            "dim" => "2",
            "ul" => "4",
            "blink" => "5",
            "reverse" => "7",
            "strike" => "9",
            _ if word.starts_with('#') && word.len() == 7 => {
                let r = u8::from_str_radix(word.get(1..3)?, 16).ok()?;
                let g = u8::from_str_radix(word.get(3..5)?, 16).ok()?;
                let b = u8::from_str_radix(word.get(5..7)?, 16).ok()?;
                codes.push(format!("38;2;{};{};{}", r, g, b));
                continue;
            }
            _ => return None,
        };
        codes.push(code.to_string());
    }
    if codes.is_empty() {
        Some(String::new())
    } else {
        Some(format!("\x1b[{}m", codes.join(";")))
    }
}
