//! Fixed-width text fragments a bar line is assembled from.
//!
//! Every block is pure: it holds its rendered text and the number of
//! terminal columns that text occupies, which may differ from its byte
//! length once escape sequences or wide glyphs are involved.
//!
//! # Title and indent
//!
//! ```rust,ignore
//! let line = format!("{}{}", Indent::new(4), Title::new("Tank 1"));
//! // => "    Tank 1"
//! ```
//!
//! # Numeric annotations
//!
//! ```rust,ignore
//! Fraction::new(3, 10).text();   // => "3/10"
//! Percentage::new(1, 2).text();  // => " 50%"
//! ```
//!
//! # Fill
//!
//! [`Fill`] splits a bar width into filled and empty columns:
//!
//! ```rust,ignore
//! let fill = Fill::new(45, 100, 20);
//! assert_eq!((fill.filled(), fill.empty()), (9, 11));
//! ```

mod fill;
mod indent;
mod numeric;
mod title;

pub use fill::*;
pub use indent::*;
pub use numeric::*;
pub use title::*;

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(text)
}
