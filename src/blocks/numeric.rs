use super::display_width;

/// `value/max` annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fraction(String);

impl Fraction {
    pub fn new(value: u64, max: u64) -> Self {
        Self(format!("{value}/{max}"))
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn width(&self) -> usize {
        display_width(&self.0)
    }
}

/// Whole-percent annotation, right-aligned to three digits (` 50%`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Percentage(String);

impl Percentage {
    /// Renders `floor(value / max * 100)`; a zero `max` reads as 0%.
    pub fn new(value: u64, max: u64) -> Self {
        let pct = match max {
            0 => 0,
            max => u128::from(value) * 100 / u128::from(max),
        };
        Self(format!("{pct:>3}%"))
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn width(&self) -> usize {
        display_width(&self.0)
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction() {
        let block = Fraction::new(1, 2);
        assert_eq!(block.text(), "1/2");
        assert_eq!(block.width(), 3);
    }

    #[test]
    fn percentage() {
        let block = Percentage::new(1, 2);
        assert_eq!(block.text(), " 50%");
        assert_eq!(block.width(), 4);
        assert_eq!(Percentage::new(10, 10).text(), "100%");
        assert_eq!(Percentage::new(2, 3).text(), " 66%");
        assert_eq!(Percentage::new(0, 0).text(), "  0%");
        let full = Percentage::new(7, 7);
        assert_eq!(full.width(), display_width(full.text()));
    }
}
