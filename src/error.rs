use thiserror::Error;

/// Errors raised while configuring or drawing bars.
///
/// None of these are transient: each one reports a mismatch between the
/// requested layout and the terminal it is drawn on, so nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// A style option was outside its allowed set (unknown title placement,
    /// malformed width, indent wider than the terminal, empty group, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A requested color needs more colors than the terminal reports and
    /// neither fallback nor a force-color override applies.
    #[error("color `{color}` is unsupported by a terminal with {available} colors")]
    ColorUnsupported { color: String, available: u16 },

    /// The fully composed bar line is wider than the terminal.
    #[error("bar needs {required} columns; terminal has only {available}")]
    WidthOverflow { required: usize, available: usize },

    /// The tree needs more rows than the terminal has.
    #[error("tree needs {required} lines; terminal has only {available}")]
    LengthOverflow { required: usize, available: usize },

    /// The underlying output stream failed.
    #[error("I/O error")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfiguration(msg.into())
}
