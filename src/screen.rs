//! Screen surface: cursor positioning and clipped writes for windows.
//!
//! Drawing collaborators never see absolute terminal coordinates: they
//! address a window by handle and write relative to its computed geometry.
//! Everything here reads the tree; nothing mutates it. Output is queued on
//! the underlying writer and emitted on [`Screen::flush`].

use std::io::{self, Write};

use crossterm::{cursor, queue, style, terminal};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::layout::{NodeId, WindowTree};

/// Calculate the wrap column for a given width.
///
/// A negative `wrap` keeps a right margin of `|wrap|` columns when the
/// width allows it; a positive `wrap` caps the width; zero leaves the
/// width unchanged.
pub fn wrap_columns(width: u16, wrap: i16) -> u16 {
    if wrap < 0 {
        let margin = wrap.unsigned_abs();
        if width > margin {
            width - margin
        } else {
            width
        }
    } else if wrap > 0 {
        u16::try_from(wrap).map_or(width, |w| w.min(width))
    } else {
        width
    }
}

/// Writes to a terminal using window-relative coordinates.
///
/// Generic over the writer so tests can capture output in a `Vec<u8>`.
#[derive(Debug)]
pub struct Screen<W: Write> {
    out: W,
}

impl<W: Write> Screen<W> {
    /// Wrap a writer.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Give the writer back.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Move the cursor to `(row, col)` inside `win`.
    ///
    /// Silent no-op if the window is stale or hidden, or the point lies
    /// outside its bounds.
    pub fn move_to(
        &mut self,
        tree: &WindowTree,
        win: NodeId,
        row: u16,
        col: u16,
    ) -> io::Result<()> {
        let Some(state) = tree.state(win) else {
            return Ok(());
        };
        let bounds = state.rect();
        let abs_row = bounds.row.saturating_add(row);
        let abs_col = bounds.col.saturating_add(col);
        if !state.visible || !bounds.contains(abs_row, abs_col) {
            return Ok(());
        }
        queue!(self.out, cursor::MoveTo(abs_col, abs_row))
    }

    /// Move to `(row, col)` inside `win` and write `text`, clipped to the
    /// window's right edge by display columns.
    ///
    /// A wide grapheme that would straddle the edge is dropped entirely
    /// rather than split.
    pub fn print(
        &mut self,
        tree: &WindowTree,
        win: NodeId,
        row: u16,
        col: u16,
        text: &str,
    ) -> io::Result<()> {
        let Some(state) = tree.state(win) else {
            return Ok(());
        };
        let bounds = state.rect();
        let abs_col = bounds.col.saturating_add(col);
        if !state.visible || !bounds.contains(bounds.row.saturating_add(row), abs_col) {
            return Ok(());
        }
        self.move_to(tree, win, row, col)?;

        let avail = bounds.right() - abs_col;
        let mut used: u16 = 0;
        for grapheme in text.graphemes(true) {
            let width = u16::try_from(grapheme.width()).unwrap_or(u16::MAX);
            if used.saturating_add(width) > avail {
                break;
            }
            queue!(self.out, style::Print(grapheme))?;
            used += width;
        }
        Ok(())
    }

    /// Blank one row of `win`.
    pub fn clear_line(&mut self, tree: &WindowTree, win: NodeId, row: u16) -> io::Result<()> {
        self.clear_to_eol(tree, win, row, 0)
    }

    /// Blank from `(row, col)` to the window's right edge.
    pub fn clear_to_eol(
        &mut self,
        tree: &WindowTree,
        win: NodeId,
        row: u16,
        col: u16,
    ) -> io::Result<()> {
        let Some(state) = tree.state(win) else {
            return Ok(());
        };
        let bounds = state.rect();
        let abs_col = bounds.col.saturating_add(col);
        if !state.visible || !bounds.contains(bounds.row.saturating_add(row), abs_col) {
            return Ok(());
        }
        self.move_to(tree, win, row, col)?;
        let blank = " ".repeat(usize::from(bounds.right() - abs_col));
        queue!(self.out, style::Print(blank))
    }

    /// Clear the whole terminal.
    pub fn clear_all(&mut self) -> io::Result<()> {
        queue!(self.out, terminal::Clear(terminal::ClearType::All))
    }

    /// Emit everything queued so far.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
