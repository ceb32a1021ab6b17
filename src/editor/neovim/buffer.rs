//! Buffer and window lookups for Neovim instances.

use anyhow::{Context, Result};
use neovim_lib::neovim_api::{Buffer, Window};
use neovim_lib::{Neovim, NeovimApi, Value};

use crate::editor::{Point, Range};

/// Buffer handle from a buffer number received in a notification
pub fn from_number(number: i64) -> Buffer {
    Buffer::new(Value::from(number))
}

/// Whether a buffer holds regular file contents (`buftype` is empty)
pub fn is_file_buffer(nvim: &mut Neovim, buffer: &Buffer) -> Result<bool> {
    let buftype = buffer
        .get_option(nvim, "buftype")
        .context("Failed to get buftype")?;
    Ok(buftype.as_str().is_some_and(str::is_empty))
}

/// Window showing the buffer, preferring the current window
pub fn find_window(nvim: &mut Neovim, number: i64) -> Result<Option<Window>> {
    let current = nvim.get_current_win().context("Failed to get current window")?;
    if current.get_buf(nvim)?.get_number(nvim)? == number {
        return Ok(Some(current));
    }

    for window in nvim.list_wins().context("Failed to list windows")? {
        if window.get_buf(nvim)?.get_number(nvim)? == number {
            return Ok(Some(window));
        }
    }

    Ok(None)
}

/// A single line of the buffer (0-based)
pub fn line(nvim: &mut Neovim, buffer: &Buffer, row: i64) -> Result<String> {
    let mut lines = buffer
        .get_lines(nvim, row, row + 1, false)
        .context("Failed to get buffer line")?;
    Ok(lines.pop().unwrap_or_default())
}

/// Byte index just past the character starting at (or containing) `column`
pub fn end_of_char(line: &str, column: usize) -> usize {
    if column >= line.len() {
        return line.len();
    }
    let mut end = column + 1;
    while !line.is_char_boundary(end) {
        end += 1;
    }
    end
}

/// Range covered by inclusive 1-based `(row, column)` marks.
///
/// Linewise marks report a huge end column. A selection running past the end
/// of a line that is not the last one takes the newline with it; on the last
/// line the newline is implied by the buffer and never part of the range.
pub fn selection_range(
    start: (i64, i64),
    end: (i64, i64),
    start_line: &str,
    end_line: &str,
    line_count: i64,
) -> Option<Range> {
    let ((start_row, start_col), (end_row, end_col)) = (start, end);
    if start_row < 1 || end_row < start_row || end_row > line_count {
        return None;
    }

    let start = Point::new(
        (start_row - 1) as usize,
        (start_col.max(0) as usize).min(start_line.len()),
    );
    let end_col = end_col.max(0) as usize;
    let end = if end_col >= end_line.len() && end_row < line_count {
        Point::new(end_row as usize, 0)
    } else {
        Point::new((end_row - 1) as usize, end_of_char(end_line, end_col))
    };

    let range = Range::new(start, end);
    (!range.is_empty()).then_some(range)
}

/// Whether `range` ends at the end of the buffer's last line
pub fn reaches_end(range: Range, line_count: i64, last_line: &str) -> bool {
    range.end.row as i64 + 1 >= line_count && range.end.column >= last_line.len()
}

/// Replacement for text that sits before the buffer's implied final newline.
///
/// A fixer adds a trailing newline to such a fragment; written back verbatim
/// it would leave an empty line at the end of the buffer.
pub fn fit_replacement<'t>(replacement: &'t str, source: &str, at_end: bool) -> &'t str {
    if at_end && !source.ends_with('\n') {
        replacement.strip_suffix('\n').unwrap_or(replacement)
    } else {
        replacement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAXCOL: i64 = 2147483647;

    #[test]
    fn test_linewise_selection_in_the_middle_takes_newline() {
        let range = selection_range((1, 0), (2, MAXCOL), "a;", "b;", 3);
        assert_eq!(range, Some(Range::new(Point::new(0, 0), Point::new(2, 0))));
    }

    #[test]
    fn test_linewise_selection_on_last_line_stops_at_line_end() {
        let range = selection_range((1, 0), (2, MAXCOL), "a;", "b;", 2);
        assert_eq!(range, Some(Range::new(Point::new(0, 0), Point::new(1, 2))));
    }

    #[test]
    fn test_charwise_selection_includes_last_char() {
        let range = selection_range((1, 2), (1, 4), "let x = 1", "let x = 1", 1);
        assert_eq!(range, Some(Range::new(Point::new(0, 2), Point::new(0, 5))));
    }

    #[test]
    fn test_selection_outside_buffer_is_rejected() {
        assert_eq!(selection_range((0, 0), (1, 0), "", "a", 1), None);
        assert_eq!(selection_range((2, 0), (1, 0), "a", "a", 2), None);
        assert_eq!(selection_range((1, 0), (3, 0), "a", "a", 2), None);
    }

    #[test]
    fn test_last_line_selection_drops_added_newline() {
        let range = selection_range((1, 0), (2, MAXCOL), "a;", "b;", 2).expect("range");
        let at_end = reaches_end(range, 2, "b;");
        assert!(at_end);
        assert_eq!(fit_replacement("a\nb\n", "a;\nb;", at_end), "a\nb");
    }

    #[test]
    fn test_mid_buffer_replacement_is_kept() {
        let range = selection_range((1, 0), (2, MAXCOL), "a;", "b;", 3).expect("range");
        let at_end = reaches_end(range, 3, "c;");
        assert!(!at_end);
        assert_eq!(fit_replacement("a\nb\n", "a;\nb;\n", at_end), "a\nb\n");
    }

    #[test]
    fn test_source_with_newline_keeps_replacement() {
        assert_eq!(fit_replacement("a\n", "a\n", true), "a\n");
    }

    #[test]
    fn test_end_of_char_ascii() {
        assert_eq!(end_of_char("abc", 1), 2);
    }

    #[test]
    fn test_end_of_char_multibyte() {
        // "é" is two bytes
        assert_eq!(end_of_char("aé", 1), 3);
    }

    #[test]
    fn test_end_of_char_clamps_maxcol() {
        assert_eq!(end_of_char("abc", 2147483647), 3);
    }
}
