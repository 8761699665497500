/// The split of a bar's width into filled and empty columns.
///
/// Values above `max` are not clamped: the filled run grows past `width`
/// and the empty run drops to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    filled: usize,
    empty: usize,
}

impl Fill {
    /// `filled = floor(value / max * width)`, computed without float rounding.
    pub fn new(value: u64, max: u64, width: usize) -> Self {
        let filled = match max {
            0 => 0,
            max => (u128::from(value) * width as u128 / u128::from(max)) as usize,
        };
        Self {
            filled,
            empty: width.saturating_sub(filled),
        }
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn empty(&self) -> usize {
        self.empty
    }

    /// Renders both runs with the given glyphs and region formatters.
    pub fn render(
        &self, filled_char: char, empty_char: char, paint_filled: impl Fn(&str) -> String,
        paint_empty: impl Fn(&str) -> String,
    ) -> String {
        let filled: String = std::iter::repeat_n(filled_char, self.filled).collect();
        let empty: String = std::iter::repeat_n(empty_char, self.empty).collect();
        let mut out = String::new();
        if !filled.is_empty() {
            out.push_str(&paint_filled(&filled));
        }
        if !empty.is_empty() {
            out.push_str(&paint_empty(&empty));
        }
        out
    }
}
