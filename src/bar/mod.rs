//! Single progress bars.
//!
//! A [`Bar`] is validated once against a terminal and can then be drawn
//! any number of times with new values:
//!
//! ```rust,ignore
//! let mut term = AnsiTerminal::stdout();
//! let bar = Bar::new(&BarStyle::new().max_value(10).width("10c".parse()?), &term)?;
//! bar.draw(&mut term, 4, true)?;
//! // => Progress ██████████ 4/10  (first 4 cells green, rest white)
//! ```

mod style;

pub use style::*;

use crate::blocks::{Fill, Fraction, Indent, Percentage, Title, display_width};
use crate::color::{self, Color};
use crate::error::{Error, Result, invalid};
use crate::terminal::Terminal;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Palette {
    filled: Color,
    empty: Color,
    back: Option<Color>,
}

/// A progress bar validated against a terminal's geometry and colors.
#[derive(Debug, Clone)]
pub struct Bar {
    max_value: u64,
    width: usize,
    title: Title,
    title_position: TitlePosition,
    number_representation: NumberRepresentation,
    indent: Indent,
    start: String,
    end: String,
    filled_char: char,
    empty_char: char,
    // `None` renders both regions uncolored.
    palette: Option<Palette>,
}

impl Bar {
    /// Checks `style` against `term` and resolves its width and colors.
    ///
    /// Fails with [`Error::InvalidConfiguration`] for a zero `max_value`,
    /// an indent not smaller than the terminal width or an unusable width
    /// spec; with [`Error::ColorUnsupported`] when a color is out of reach
    /// and neither fallback nor force-color applies; and with
    /// [`Error::WidthOverflow`] when the composed line does not fit.
    pub fn new(style: &BarStyle, term: &dyn Terminal) -> Result<Self> {
        let columns = term.width();
        if style.max_value == 0 {
            return Err(invalid("max value must be positive"));
        }
        if style.indent >= columns {
            return Err(invalid(format!(
                "indent of {} must be less than terminal width of {columns}",
                style.indent
            )));
        }
        let width = style.width.resolve(columns)?;

        let available = term.number_of_colors();
        let use_color = match style.force_color {
            Some(force) => force,
            None => {
                let requested = [&style.filled_color, &style.empty_color];
                match color::first_unsupported(requested, available) {
                    None => true,
                    Some(color) if style.fallback => {
                        tracing::debug!(%color, available, "color unsupported; using fallback glyphs");
                        false
                    }
                    Some(color) => {
                        return Err(Error::ColorUnsupported {
                            color: color.to_string(),
                            available,
                        });
                    }
                }
            }
        };

        let (filled_char, empty_char, palette) = match use_color {
            true => (
                style.filled_char,
                style.empty_char,
                Some(Palette {
                    filled: style.filled_color.clone(),
                    empty: style.empty_color.clone(),
                    back: style.back_color.clone(),
                }),
            ),
            false => (style.fallback_filled_char, style.fallback_empty_char, None),
        };

        let bar = Self {
            max_value: style.max_value,
            width,
            title: Title::new(style.title.as_deref().unwrap_or(BarStyle::DEFAULT_TITLE)),
            title_position: style.title_position.unwrap_or(TitlePosition::Left),
            number_representation: style.number_representation,
            indent: Indent::new(style.indent),
            start: style.start.clone(),
            end: style.end.clone(),
            filled_char,
            empty_char,
            palette,
        };

        let required = bar.full_line_width();
        if required > columns {
            return Err(Error::WidthOverflow {
                required,
                available: columns,
            });
        }
        Ok(bar)
    }

    /// Columns of the fill region.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    pub fn title_position(&self) -> TitlePosition {
        self.title_position
    }

    /// Returns `true` unless the bar degraded to fallback glyphs.
    pub fn colored(&self) -> bool {
        self.palette.is_some()
    }

    /// Rows one draw occupies.
    pub fn lines_required(&self) -> usize {
        self.title_position.lines()
    }

    /// Widest line this bar can produce for values up to `max_value`.
    pub fn full_line_width(&self) -> usize {
        let annotation = match self.number_representation {
            NumberRepresentation::Fraction => Fraction::new(self.max_value, self.max_value).width(),
            NumberRepresentation::Percentage => Percentage::new(self.max_value, self.max_value).width(),
        };
        let body = display_width(&self.start) + self.width + display_width(&self.end) + 1 + annotation;
        let title = self.title.width();
        let line = match self.title_position {
            TitlePosition::Left | TitlePosition::Right if title > 0 => title + 1 + body,
            TitlePosition::Left | TitlePosition::Right => body,
            TitlePosition::Above | TitlePosition::Below => title.max(body),
        };
        self.indent.width() + line
    }

    pub fn fill(&self, value: u64) -> Fill {
        Fill::new(value, self.max_value, self.width)
    }

    /// The text lines a draw of `value` writes, top to bottom.
    pub fn lines(&self, term: &dyn Terminal, value: u64) -> Vec<String> {
        let segment = self.fill(value).render(
            self.filled_char,
            self.empty_char,
            |s| match &self.palette {
                Some(p) => term.colorize(s, &p.filled, p.back.as_ref()),
                None => s.to_string(),
            },
            |s| match &self.palette {
                Some(p) => term.colorize(s, &p.empty, p.back.as_ref()),
                None => s.to_string(),
            },
        );
        let annotation = match self.number_representation {
            NumberRepresentation::Fraction => Fraction::new(value, self.max_value).to_string(),
            NumberRepresentation::Percentage => Percentage::new(value, self.max_value).to_string(),
        };
        let bar = format!("{}{}{} {}", self.start, segment, self.end, annotation);
        let indent = &self.indent;
        let title = &self.title;

        match self.title_position {
            TitlePosition::Left if title.width() > 0 => vec![format!("{indent}{title} {bar}")],
            TitlePosition::Right if title.width() > 0 => vec![format!("{indent}{bar} {title}")],
            TitlePosition::Left | TitlePosition::Right => vec![format!("{indent}{bar}")],
            TitlePosition::Above => vec![format!("{indent}{title}"), format!("{indent}{bar}")],
            TitlePosition::Below => vec![format!("{indent}{bar}"), format!("{indent}{title}")],
        }
    }

    /// Writes the bar for `value`.
    ///
    /// The cursor is left at the end of the last line: advancing to the next
    /// row is up to the caller, so bars compose into larger layouts.
    pub fn draw(&self, term: &mut dyn Terminal, value: u64, flush: bool) -> Result<()> {
        let lines = self.lines(term, value);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                term.move_down(1)?;
                term.clear_to_beginning_of_line()?;
            }
            term.write(line)?;
        }
        if flush {
            term.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::VirtualTerm;

    fn plain(style: BarStyle) -> BarStyle {
        style.force_color(Some(false)).fallback_chars('#', '.')
    }

    #[test]
    fn full_and_empty_bars() {
        let term = VirtualTerm::new(80, 24);
        let style = plain(BarStyle::new().max_value(10).width(WidthSpec::Columns(10)));
        let bar = Bar::new(&style, &term).unwrap();
        assert_eq!(bar.lines(&term, 10), vec!["Progress ########## 10/10"]);
        assert_eq!(bar.lines(&term, 0), vec!["Progress .......... 0/10"]);
        assert_eq!(bar.fill(10).filled(), 10);
        assert_eq!(bar.fill(0).empty(), 10);
    }

    #[test]
    fn title_placements() {
        let term = VirtualTerm::new(80, 24);
        let base = plain(BarStyle::new().max_value(4).width(WidthSpec::Columns(4)).title("T"));

        let right = Bar::new(&base.clone().title_position(TitlePosition::Right), &term).unwrap();
        assert_eq!(right.lines(&term, 2), vec!["##.. 2/4 T"]);

        let above = Bar::new(
            &base.clone().title_position(TitlePosition::Above).indent(2),
            &term,
        )
        .unwrap();
        assert_eq!(above.lines(&term, 1), vec!["  T", "  #... 1/4"]);
        assert_eq!(above.lines_required(), 2);

        let below = Bar::new(&base.title_position(TitlePosition::Below), &term).unwrap();
        assert_eq!(below.lines(&term, 4), vec!["#### 4/4", "T"]);
    }

    #[test]
    fn percentage_and_decorations() {
        let term = VirtualTerm::new(80, 24);
        let style = plain(
            BarStyle::new()
                .width(WidthSpec::Columns(8))
                .title("")
                .decorations("[", "]")
                .number_representation(NumberRepresentation::Percentage),
        );
        let bar = Bar::new(&style, &term).unwrap();
        assert_eq!(bar.lines(&term, 50), vec!["[####....]  50%"]);
    }

    #[test]
    fn indent_must_be_less_than_terminal_width() {
        let term = VirtualTerm::new(40, 24);
        let err = Bar::new(&BarStyle::new().indent(40), &term).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn zero_max_value_is_rejected() {
        let term = VirtualTerm::new(80, 24);
        let err = Bar::new(&BarStyle::new().max_value(0), &term).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn width_spec_errors_surface() {
        let term = VirtualTerm::new(80, 24);
        for width in [WidthSpec::Columns(81), WidthSpec::Percent(0), WidthSpec::Percent(150)] {
            let err = Bar::new(&BarStyle::new().width(width), &term).unwrap_err();
            assert!(matches!(err, Error::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn overflowing_line_is_rejected() {
        let term = VirtualTerm::new(30, 24);
        let style = BarStyle::new().width(WidthSpec::Columns(25)).title("Long title");
        let err = Bar::new(&style, &term).unwrap_err();
        match err {
            Error::WidthOverflow { required, available } => {
                // "Long title" + ' ' + 25 + ' ' + "100/100"
                assert_eq!(required, 10 + 1 + 25 + 1 + 7);
                assert_eq!(available, 30);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unsupported_color_falls_back() {
        let term = VirtualTerm::new(80, 24).with_colors(8);
        let style = BarStyle::new()
            .width(WidthSpec::Columns(4))
            .filled_color(Color::ordinal(255));
        let bar = Bar::new(&style, &term).unwrap();
        assert!(!bar.colored());
        assert_eq!(bar.lines(&term, 50), vec!["Progress ◉◉◯◯ 50/100"]);
    }

    #[test]
    fn unsupported_color_without_fallback_errors() {
        let term = VirtualTerm::new(80, 24).with_colors(8);
        let style = BarStyle::new().filled_color(Color::ordinal(255)).fallback(false);
        let err = Bar::new(&style, &term).unwrap_err();
        assert!(matches!(
            err,
            Error::ColorUnsupported { ref color, available: 8 } if color == "255"
        ));
    }

    #[test]
    fn force_color_overrides_capability() {
        let term = VirtualTerm::new(80, 24).with_colors(0);
        let style = BarStyle::new()
            .filled_color(Color::ordinal(255))
            .fallback(false)
            .force_color(Some(true));
        let bar = Bar::new(&style, &term).unwrap();
        assert!(bar.colored());
        assert!(bar.lines(&term, 50)[0].contains('\x1b'));

        let rich = VirtualTerm::new(80, 24).with_colors(256);
        let forced_plain = Bar::new(&BarStyle::new().force_color(Some(false)), &rich).unwrap();
        assert!(!forced_plain.colored());
    }

    #[test]
    fn draw_writes_without_trailing_newline() {
        let mut term = VirtualTerm::new(80, 24);
        let style = plain(
            BarStyle::new()
                .width(WidthSpec::Columns(4))
                .max_value(4)
                .title("Job")
                .title_position(TitlePosition::Above),
        );
        let bar = Bar::new(&style, &term).unwrap();
        bar.draw(&mut term, 3, true).unwrap();
        assert_eq!(term.screen(), "Job\n###. 3/4");
        assert_eq!(term.cursor(), (1, 8));
        assert_eq!(term.flushes(), 1);
    }
}
