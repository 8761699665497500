use crate::terminal::Terminal;

/// Cursor bookkeeping for redrawing in place.
///
/// Starts unsaved; the first [`Cursor::save`] moves it to saved for good.
/// [`Cursor::restore`] is a no-op until then, so a redraw never jumps to a
/// position nobody recorded.
///
/// ```rust,ignore
/// let mut cursor = Cursor::new();
/// cursor.clear_lines(&mut term, bar.lines_required())?;
/// cursor.save(&mut term)?;
/// for i in 0..=100 {
///     cursor.restore(&mut term)?;
///     bar.draw(&mut term, i, true)?;
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    saved: bool,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once a position has been saved.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Saves the current position, replacing any earlier save.
    pub fn save(&mut self, term: &mut dyn Terminal) -> std::io::Result<()> {
        term.save_cursor()?;
        self.saved = true;
        tracing::trace!("cursor saved");
        Ok(())
    }

    /// Returns to the saved position, if any.
    pub fn restore(&self, term: &mut dyn Terminal) -> std::io::Result<()> {
        if self.saved {
            term.restore_cursor()?;
            tracing::trace!("cursor restored");
        }
        Ok(())
    }

    /// Moves to the start of the next row and clears what a previous frame left there.
    pub fn newline(&self, term: &mut dyn Terminal) -> std::io::Result<()> {
        term.move_down(1)?;
        term.clear_to_beginning_of_line()
    }

    /// Scrolls `lines` blank rows into view below the cursor and returns to
    /// the starting row.
    pub fn clear_lines(&self, term: &mut dyn Terminal, lines: usize) -> std::io::Result<()> {
        term.move_down(lines)?;
        term.move_up(lines)?;
        tracing::trace!(lines, "reserved rows");
        Ok(())
    }

    pub fn flush(&self, term: &mut dyn Terminal) -> std::io::Result<()> {
        term.flush()
    }
}
