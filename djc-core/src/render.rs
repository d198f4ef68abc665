//! Fixed-capacity text screen.
//!
//! Behaviors and pages render into a [`LineBuffer`]: a stack of text rows,
//! each at most `COLS` bytes. Text past the row width is truncated and rows
//! past `ROWS` are dropped. A [`DisplaySink`](crate::output::DisplaySink)
//! turns the finished buffer into pixels.

use core::fmt::{self, Write};
use heapless::{String, Vec};

/// Text rows on the reference 128x64 panel with a 6x10 font.
pub const SCREEN_ROWS: usize = 6;

/// Glyphs per row on the reference panel.
pub const SCREEN_COLS: usize = 21;

/// The screen every behavior renders into.
pub type Screen = LineBuffer<SCREEN_ROWS, SCREEN_COLS>;

/// Up to `ROWS` rows of up to `COLS` bytes each.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer<const ROWS: usize, const COLS: usize> {
    rows: Vec<String<COLS>, ROWS>,
}

impl<const ROWS: usize, const COLS: usize> LineBuffer<ROWS, COLS> {
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Row capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        ROWS
    }

    /// Row width in bytes.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        COLS
    }

    /// Rows still available.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        ROWS - self.rows.len()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Start a new row and return a writer for it.
    ///
    /// Returns `None` once all rows are used; the caller's text is dropped.
    pub fn row(&mut self) -> Option<Row<'_, COLS>> {
        self.rows.push(String::new()).ok()?;
        self.rows.last_mut().map(|text| Row { text })
    }

    /// Append one formatted row, truncated to the row width.
    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Some(mut row) = self.row() {
            let _ = row.write_fmt(args);
        }
    }

    /// Append one plain row, truncated to the row width.
    pub fn push_str(&mut self, text: &str) {
        if let Some(mut row) = self.row() {
            let _ = row.write_str(text);
        }
    }

    /// Append `text` split at newlines and wrapped at the row width.
    ///
    /// Used for free-form text such as peer messages, where dropping the
    /// tail of a long line would hide most of it.
    pub fn push_wrapped(&mut self, text: &str) {
        for line in text.split('\n') {
            let mut rest = line;
            loop {
                let cut = split_index(rest, COLS);
                self.push_str(&rest[..cut]);
                rest = &rest[cut..];
                if rest.is_empty() || self.remaining() == 0 {
                    break;
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(String::as_str)
    }
}

/// Largest char boundary in `text` not past `max` bytes.
fn split_index(text: &str, max: usize) -> usize {
    if text.len() <= max {
        return text.len();
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    cut
}

/// Writer for a single row. Output past the row width is discarded.
pub struct Row<'a, const COLS: usize> {
    text: &'a mut String<COLS>,
}

impl<const COLS: usize> Write for Row<'_, COLS> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = COLS - self.text.len();
        let cut = split_index(s, room);
        // Cannot fail: `cut` fits the remaining capacity.
        let _ = self.text.push_str(&s[..cut]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    #[test]
    fn test_rows_truncate() {
        let mut screen: LineBuffer<2, 5> = LineBuffer::new();
        screen.push_str("abcdefgh");
        screen.line(format_args!("{}:{}", 12, 345));
        let lines: Vec<&str> = screen.lines().collect();
        assert_eq!(lines, ["abcde", "12:34"]);
    }

    #[test]
    fn test_extra_rows_dropped() {
        let mut screen: LineBuffer<2, 8> = LineBuffer::new();
        screen.push_str("one");
        screen.push_str("two");
        screen.push_str("three");
        assert_eq!(screen.len(), 2);
        assert_eq!(screen.remaining(), 0);
        assert!(screen.row().is_none());
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let mut screen: LineBuffer<1, 4> = LineBuffer::new();
        screen.push_str("ab\u{b0}c");
        assert_eq!(screen.lines().next(), Some("ab\u{b0}"));

        let mut narrow: LineBuffer<1, 3> = LineBuffer::new();
        narrow.push_str("ab\u{b0}");
        assert_eq!(narrow.lines().next(), Some("ab"));
    }

    #[test]
    fn test_push_wrapped() {
        let mut screen: LineBuffer<4, 4> = LineBuffer::new();
        screen.push_wrapped("abcdefg\nxy");
        let lines: Vec<&str> = screen.lines().collect();
        assert_eq!(lines, ["abcd", "efg", "xy"]);
    }

    #[test]
    fn test_clear() {
        let mut screen: Screen = LineBuffer::new();
        screen.push_str("x");
        screen.clear();
        assert!(screen.is_empty());
        assert_eq!(screen.capacity(), SCREEN_ROWS);
        assert_eq!(screen.width(), SCREEN_COLS);
    }
}
