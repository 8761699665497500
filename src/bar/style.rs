use std::str::FromStr;

use crate::color::Color;
use crate::error::{Error, Result, invalid};

/// Where a bar's title sits relative to the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitlePosition {
    Left,
    Right,
    Above,
    Below,
}

impl TitlePosition {
    /// Returns `true` if title and bar share one line.
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Terminal rows a bar with this placement occupies.
    pub fn lines(self) -> usize {
        if self.is_inline() { 1 } else { 2 }
    }
}

impl FromStr for TitlePosition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "above" => Ok(Self::Above),
            "below" => Ok(Self::Below),
            other => Err(invalid(format!(
                "title position must be one of left, right, above, below; got `{other}`"
            ))),
        }
    }
}

/// How completion is annotated after the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumberRepresentation {
    /// `value/max`
    #[default]
    Fraction,
    /// ` 42%`
    Percentage,
}

impl FromStr for NumberRepresentation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fraction" => Ok(Self::Fraction),
            "percentage" => Ok(Self::Percentage),
            other => Err(invalid(format!(
                "number representation must be either fraction or percentage; got `{other}`"
            ))),
        }
    }
}

/// Requested bar width: `<n>c` for columns or `<n>%` of the terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidthSpec {
    Columns(usize),
    Percent(u32),
}

impl WidthSpec {
    /// Resolves the fill-region width against a terminal `columns` wide.
    pub fn resolve(self, columns: usize) -> Result<usize> {
        match self {
            Self::Columns(n) if n > columns => Err(invalid(format!(
                "bar width {n}c exceeds terminal width of {columns} columns"
            ))),
            Self::Columns(n) => Ok(n),
            Self::Percent(pct) if pct == 0 || pct > 100 => Err(invalid(format!(
                "bar width percentage must be in (0, 100]; got {pct}%"
            ))),
            Self::Percent(pct) => Ok(pct as usize * columns / 100),
        }
    }
}

impl Default for WidthSpec {
    fn default() -> Self {
        Self::Percent(25)
    }
}

impl FromStr for WidthSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let Some(unit) = s.chars().last() else {
            return Err(invalid("bar width is empty"));
        };
        let num = &s[..s.len() - unit.len_utf8()];
        let bad_number = || invalid(format!("bar width `{s}` does not start with an integer"));
        // Digits only: `parse` would also take a leading sign.
        let digits = !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit());
        match unit {
            'c' | '%' if !digits => Err(bad_number()),
            'c' => num.parse().map(Self::Columns).map_err(|_| bad_number()),
            '%' => num.parse().map(Self::Percent).map_err(|_| bad_number()),
            other => Err(invalid(format!(
                "bar width unit must be `c` or `%`; got `{other}`"
            ))),
        }
    }
}

impl std::fmt::Display for WidthSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Columns(n) => write!(f, "{n}c"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Configuration for a [`crate::Bar`].
///
/// Built with chained setters; every option has a default, so
/// `BarStyle::new()` is a complete 25%-wide green-on-white bar.
///
/// ```rust,ignore
/// let style = BarStyle::new()
///     .max_value(10)
///     .width("10c".parse()?)
///     .title("Tank 1")
///     .number_representation(NumberRepresentation::Percentage);
/// ```
///
/// `title` and `title_position` are optional: a standalone bar falls back
/// to `"Progress"` on the left, while the tree engine uses the node's key
/// placed above the bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarStyle {
    pub(crate) max_value: u64,
    pub(crate) width: WidthSpec,
    pub(crate) title: Option<String>,
    pub(crate) title_position: Option<TitlePosition>,
    pub(crate) number_representation: NumberRepresentation,
    pub(crate) indent: usize,
    pub(crate) filled_color: Color,
    pub(crate) empty_color: Color,
    pub(crate) back_color: Option<Color>,
    pub(crate) filled_char: char,
    pub(crate) empty_char: char,
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) fallback: bool,
    pub(crate) fallback_filled_char: char,
    pub(crate) fallback_empty_char: char,
    pub(crate) force_color: Option<bool>,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            max_value: 100,
            width: WidthSpec::default(),
            title: None,
            title_position: None,
            number_representation: NumberRepresentation::Fraction,
            indent: 0,
            filled_color: Color::Named("green".into()),
            empty_color: Color::Named("white".into()),
            back_color: None,
            filled_char: '█',
            empty_char: '█',
            start: String::new(),
            end: String::new(),
            fallback: true,
            fallback_filled_char: '◉',
            fallback_empty_char: '◯',
            force_color: None,
        }
    }
}

impl BarStyle {
    pub const DEFAULT_TITLE: &'static str = "Progress";

    pub fn new() -> Self {
        Self::default()
    }

    /// Capacity of the bar; must be positive.
    pub fn max_value(mut self, max: u64) -> Self {
        self.max_value = max;
        self
    }

    pub fn width(mut self, width: WidthSpec) -> Self {
        self.width = width;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title_position(mut self, position: TitlePosition) -> Self {
        self.title_position = Some(position);
        self
    }

    pub fn number_representation(mut self, repr: NumberRepresentation) -> Self {
        self.number_representation = repr;
        self
    }

    /// Columns of padding before the line; must be less than the terminal width.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn filled_color(mut self, color: Color) -> Self {
        self.filled_color = color;
        self
    }

    pub fn empty_color(mut self, color: Color) -> Self {
        self.empty_color = color;
        self
    }

    /// Background shared by the filled and empty regions.
    pub fn back_color(mut self, color: Color) -> Self {
        self.back_color = Some(color);
        self
    }

    pub fn chars(mut self, filled: char, empty: char) -> Self {
        self.filled_char = filled;
        self.empty_char = empty;
        self
    }

    /// Decoration around the fill region, e.g. `[` and `]`.
    pub fn decorations(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = start.into();
        self.end = end.into();
        self
    }

    /// Whether to degrade to plain glyphs when the terminal lacks the colors.
    pub fn fallback(mut self, enabled: bool) -> Self {
        self.fallback = enabled;
        self
    }

    pub fn fallback_chars(mut self, filled: char, empty: char) -> Self {
        self.fallback_filled_char = filled;
        self.fallback_empty_char = empty;
        self
    }

    /// `Some(true)` always colors, `Some(false)` always uses the fallback
    /// glyphs, `None` decides from the terminal's color depth.
    pub fn force_color(mut self, force: Option<bool>) -> Self {
        self.force_color = force;
        self
    }

    pub fn get_max_value(&self) -> u64 {
        self.max_value
    }

    pub fn get_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn get_title_position(&self) -> Option<TitlePosition> {
        self.title_position
    }
}
