use std::io::Write;

use crate::color::{self, Color};

/// Rows assumed when the terminal does not report a size.
pub const DEFAULT_HEIGHT: usize = 24;
/// Columns assumed when the terminal does not report a size.
pub const DEFAULT_WIDTH: usize = 80;

/// Terminal capabilities the bars and the tree engine draw through.
///
/// Implementations report dimensions and color depth, and turn cursor
/// operations into output. Bars only ever call [`Terminal::write`]; cursor
/// movement belongs to the caller that composes lines into a layout.
pub trait Terminal {
    /// Rows available for drawing.
    fn height(&self) -> usize;

    /// Columns available for drawing.
    fn width(&self) -> usize;

    /// Size of the color palette (0 for no color support).
    fn number_of_colors(&self) -> u16;

    /// Re-reads dimensions from the device. Called before every frame so that
    /// a resize between frames is picked up without signal handlers.
    fn measure(&mut self) {}

    fn save_cursor(&mut self) -> std::io::Result<()>;
    fn restore_cursor(&mut self) -> std::io::Result<()>;
    fn move_down(&mut self, n: usize) -> std::io::Result<()>;
    fn move_up(&mut self, n: usize) -> std::io::Result<()>;
    fn clear_to_beginning_of_line(&mut self) -> std::io::Result<()>;
    fn write(&mut self, text: &str) -> std::io::Result<()>;
    fn flush(&mut self) -> std::io::Result<()>;

    /// Formats `text` in `color`, optionally on `background`.
    fn colorize(&self, text: &str, color: &Color, background: Option<&Color>) -> String {
        color::paint(text, color, background)
    }
}

/// A [`Terminal`] emitting ANSI/VT100 control sequences to any [`Write`] target.
///
/// ```rust,ignore
/// let mut term = AnsiTerminal::stdout();
/// let bar = Bar::new(&BarStyle::new(), &term)?;
/// bar.draw(&mut term, 42, true)?;
/// ```
pub struct AnsiTerminal<W: Write> {
    target: W,
    height: usize,
    width: usize,
    colors: u16,
    pinned_size: bool,
}

impl AnsiTerminal<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> AnsiTerminal<W> {
    /// Wraps `target`, detecting size and color depth from the environment.
    pub fn new(target: W) -> Self {
        let (width, height) = detect_size();
        Self {
            target,
            height,
            width,
            colors: detect_colors(),
            pinned_size: false,
        }
    }

    /// Fixes the dimensions; [`Terminal::measure`] will no longer change them.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self.pinned_size = true;
        self
    }

    /// Overrides the detected color depth.
    pub fn with_colors(mut self, colors: u16) -> Self {
        self.colors = colors;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.target
    }

    pub fn into_inner(self) -> W {
        self.target
    }
}

impl<W: Write> Terminal for AnsiTerminal<W> {
    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn number_of_colors(&self) -> u16 {
        self.colors
    }

    fn measure(&mut self) {
        if !self.pinned_size {
            (self.width, self.height) = detect_size();
        }
    }

    fn save_cursor(&mut self) -> std::io::Result<()> {
        self.target.write_all(b"\x1b7")
    }

    fn restore_cursor(&mut self) -> std::io::Result<()> {
        self.target.write_all(b"\x1b8")
    }

    // A line feed rather than CUD: at the bottom margin it scrolls, which is
    // what reserving space relies on.
    fn move_down(&mut self, n: usize) -> std::io::Result<()> {
        for _ in 0..n {
            self.target.write_all(b"\n")?;
        }
        Ok(())
    }

    fn move_up(&mut self, n: usize) -> std::io::Result<()> {
        if n > 0 {
            write!(self.target, "\x1b[{n}A")?;
        }
        Ok(())
    }

    fn clear_to_beginning_of_line(&mut self) -> std::io::Result<()> {
        self.target.write_all(b"\x1b[1K")
    }

    fn write(&mut self, text: &str) -> std::io::Result<()> {
        self.target.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.target.flush()
    }
}

/// Returns `(columns, rows)`.
fn detect_size() -> (usize, usize) {
    #[cfg(unix)]
    {
        if let Some((cols, rows)) = read_winsize(libc::STDOUT_FILENO) {
            return (usize::from(cols), usize::from(rows));
        }
    }
    let env = |key: &str| {
        std::env::var(key)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|v| *v > 0)
    };
    (
        env("COLUMNS").unwrap_or(DEFAULT_WIDTH),
        env("LINES").unwrap_or(DEFAULT_HEIGHT),
    )
}

#[cfg(unix)]
fn read_winsize(fd: libc::c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

fn detect_colors() -> u16 {
    let var = |key: &str| std::env::var(key).ok();
    colors_from(
        var("NO_COLOR").as_deref(),
        var("COLORTERM").as_deref(),
        var("TERM").as_deref(),
    )
}

fn colors_from(no_color: Option<&str>, colorterm: Option<&str>, term: Option<&str>) -> u16 {
    if no_color.is_some_and(|v| !v.is_empty()) {
        return 0;
    }
    if matches!(colorterm, Some("truecolor" | "24bit")) {
        return 256;
    }
    match term {
        None | Some("dumb") | Some("") => 0,
        Some(t) if t.contains("256color") => 256,
        Some(t) if t.contains("16color") => 16,
        Some(_) => 8,
    }
}
