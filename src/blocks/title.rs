/// A title, optionally reporting a custom display width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    text: String,
    width: usize,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let width = super::display_width(&text);
        Self { text, width }
    }

    /// Uses `width` instead of the measured width, for titles carrying
    /// formatting that does not occupy columns.
    pub fn with_width(text: impl Into<String>, width: usize) -> Self {
        Self {
            text: text.into(),
            width,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
