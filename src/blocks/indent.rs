/// Leading padding for one nesting level or an explicit offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indent(String);

impl Indent {
    pub fn new(width: usize) -> Self {
        Self::with_char(width, ' ')
    }

    pub fn with_char(width: usize, c: char) -> Self {
        Self(std::iter::repeat_n(c, width).collect())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn width(&self) -> usize {
        super::display_width(&self.0)
    }
}

impl std::fmt::Display for Indent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
