use std::str::FromStr;

use owo_colors::{AnsiColors, DynColors, OwoColorize, XtermColors};

use crate::error::{Error, Result, invalid};

const NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// A foreground or background color for a bar region.
///
/// Named colors cover the 8 basic ANSI names plus their `bright_` forms;
/// ordinals address the xterm 256-color palette.
///
/// ```rust,ignore
/// let cyan: Color = "cyan".parse()?;
/// let bright: Color = "bright_red".parse()?;
/// let orange: Color = "208".parse()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    Named(String),
    Ordinal(u8),
}

impl Color {
    /// Validates `name` against the known ANSI color names.
    pub fn named(name: &str) -> Result<Self> {
        let name = name.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let base = name.strip_prefix("bright_").unwrap_or(&name);
        if !NAMES.contains(&base) {
            return Err(invalid(format!("unknown color name `{name}`")));
        }
        Ok(Self::Named(name))
    }

    pub fn ordinal(n: u8) -> Self {
        Self::Ordinal(n)
    }

    /// Number of colors a terminal must report before this color is usable.
    pub fn required_colors(&self) -> u16 {
        match self {
            Self::Named(name) if name.contains("bright") => 16,
            Self::Named(_) => 8,
            Self::Ordinal(n) => u16::from(*n),
        }
    }

    /// Returns `true` if a terminal reporting `available` colors can show this color.
    pub fn supported_by(&self, available: u16) -> bool {
        available >= self.required_colors()
    }

    fn dyn_color(&self) -> DynColors {
        match self {
            Self::Named(name) => DynColors::Ansi(ansi(name)),
            Self::Ordinal(n) => DynColors::Xterm(XtermColors::from(*n)),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Ordinal(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<u8>() {
            Ok(n) => Ok(Self::Ordinal(n)),
            Err(_) => Self::named(s),
        }
    }
}

impl From<u8> for Color {
    fn from(n: u8) -> Self {
        Self::Ordinal(n)
    }
}

fn ansi(name: &str) -> AnsiColors {
    match name {
        "black" => AnsiColors::Black,
        "red" => AnsiColors::Red,
        "green" => AnsiColors::Green,
        "yellow" => AnsiColors::Yellow,
        "blue" => AnsiColors::Blue,
        "magenta" => AnsiColors::Magenta,
        "cyan" => AnsiColors::Cyan,
        "white" => AnsiColors::White,
        "bright_black" => AnsiColors::BrightBlack,
        "bright_red" => AnsiColors::BrightRed,
        "bright_green" => AnsiColors::BrightGreen,
        "bright_yellow" => AnsiColors::BrightYellow,
        "bright_blue" => AnsiColors::BrightBlue,
        "bright_magenta" => AnsiColors::BrightMagenta,
        "bright_cyan" => AnsiColors::BrightCyan,
        "bright_white" => AnsiColors::BrightWhite,
        // `Color::named` rejects anything else
        _ => AnsiColors::Default,
    }
}

/// Wraps `text` in the escape sequences for `color` on an optional `background`.
pub fn paint(text: &str, color: &Color, background: Option<&Color>) -> String {
    match background {
        Some(back) => text
            .color(color.dyn_color())
            .on_color(back.dyn_color())
            .to_string(),
        None => text.color(color.dyn_color()).to_string(),
    }
}

/// Finds the first color in `colors` that a terminal with `available` colors cannot show.
pub(crate) fn first_unsupported<'a>(
    colors: impl IntoIterator<Item = &'a Color>, available: u16,
) -> Option<&'a Color> {
    colors.into_iter().find(|c| !c.supported_by(available))
}
