//! Neovim integration implementing [`Editor`] over msgpack-RPC.
//!
//! A `NeovimEditor` wraps one buffer (and the window displaying it, if any)
//! of a connected Neovim instance. Neovim addresses cursors with 1-based rows
//! and byte columns; [`Point`] uses 0-based rows, so conversions happen here.

pub mod buffer;
pub mod connection;
pub mod lua;

use std::path::PathBuf;

use crate::editor::{Editor, Point, Range};
use anyhow::{Context, Result};
use neovim_lib::neovim_api::{Buffer, Window};
use neovim_lib::{Neovim, NeovimApi, Value};

/// Editor view of a single Neovim buffer
pub struct NeovimEditor<'a> {
    nvim: &'a mut Neovim,
    buffer: Buffer,
    number: i64,
    window: Option<Window>,
    path: Option<PathBuf>,
    command_range: Option<(i64, i64)>,
}

impl<'a> NeovimEditor<'a> {
    /// The buffer in the current window, if it is a regular file buffer.
    ///
    /// `command_range` is the 1-based line range a ranged `:StandardFormat`
    /// was invoked with. It becomes the selection: the exact visual selection
    /// when the `'<`/`'>` marks cover those lines, whole lines otherwise.
    pub fn active(nvim: &'a mut Neovim, command_range: Option<(i64, i64)>) -> Result<Option<Self>> {
        let buffer = nvim.get_current_buf().context("Failed to get current buffer")?;
        let number = buffer.get_number(nvim)?;
        Self::open(nvim, buffer, number, command_range)
    }

    /// A buffer by number, e.g. the one a save hook fired for
    pub fn for_buffer(nvim: &'a mut Neovim, number: i64) -> Result<Option<Self>> {
        Self::open(nvim, buffer::from_number(number), number, None)
    }

    fn open(
        nvim: &'a mut Neovim,
        buffer: Buffer,
        number: i64,
        command_range: Option<(i64, i64)>,
    ) -> Result<Option<Self>> {
        if !buffer.is_valid(nvim)? || !buffer::is_file_buffer(nvim, &buffer)? {
            return Ok(None);
        }

        let name = buffer.get_name(nvim).context("Failed to get buffer name")?;
        let path = (!name.is_empty()).then(|| PathBuf::from(name));
        let window = buffer::find_window(nvim, number)?;

        Ok(Some(Self {
            nvim,
            buffer,
            number,
            window,
            path,
            command_range,
        }))
    }

    fn lines(&mut self) -> Result<Vec<String>> {
        self.buffer
            .get_lines(self.nvim, 0, -1, false)
            .context("Failed to get buffer lines")
    }

    fn range_args(&self, range: Range) -> Vec<Value> {
        vec![
            Value::from(self.number),
            Value::from(range.start.row as i64),
            Value::from(range.start.column as i64),
            Value::from(range.end.row as i64),
            Value::from(range.end.column as i64),
        ]
    }
}

impl Editor for NeovimEditor<'_> {
    fn path(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn is_modified(&mut self) -> Result<bool> {
        let modified = self
            .buffer
            .get_option(self.nvim, "modified")
            .context("Failed to get modified option")?;
        Ok(modified.as_bool().unwrap_or(false))
    }

    fn scope(&mut self) -> Result<Option<String>> {
        let filetype = self
            .buffer
            .get_option(self.nvim, "filetype")
            .context("Failed to get filetype")?;
        Ok(filetype
            .as_str()
            .filter(|ft| !ft.is_empty())
            .map(str::to_string))
    }

    fn text(&mut self) -> Result<String> {
        // Buffers are line based; the final newline is implied
        let lines = self.lines()?;
        Ok(format!("{}\n", lines.join("\n")))
    }

    fn selection(&mut self) -> Result<Option<Range>> {
        let Some((first, last)) = self.command_range else {
            return Ok(None);
        };

        let (mut start_row, mut start_col) = self.buffer.get_mark(self.nvim, "<")?;
        let (mut end_row, mut end_col) = self.buffer.get_mark(self.nvim, ">")?;
        if (start_row, end_row) != (first, last) {
            (start_row, start_col) = (first, 0);
            (end_row, end_col) = (last, i64::MAX);
        }
        if start_row < 1 || end_row < start_row {
            return Ok(None);
        }

        let start_line = buffer::line(self.nvim, &self.buffer, start_row - 1)?;
        let end_line = buffer::line(self.nvim, &self.buffer, end_row - 1)?;
        let line_count = self.buffer.line_count(self.nvim)?;

        Ok(buffer::selection_range(
            (start_row, start_col),
            (end_row, end_col),
            &start_line,
            &end_line,
            line_count,
        ))
    }

    fn text_in_range(&mut self, range: Range) -> Result<String> {
        let args = self.range_args(range);
        let text = self
            .nvim
            .execute_lua(lua::GET_TEXT_LUA, args)
            .context("Failed to get text in range")?;
        Ok(text.as_str().unwrap_or_default().to_string())
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = body.split('\n').map(str::to_string).collect();
        self.buffer
            .set_lines(self.nvim, 0, -1, false, lines)
            .context("Failed to set buffer lines")
    }

    fn set_text_in_range(&mut self, range: Range, text: &str) -> Result<()> {
        let line_count = self.buffer.line_count(self.nvim)?;
        let last_line = buffer::line(self.nvim, &self.buffer, line_count - 1)?;
        let at_end = buffer::reaches_end(range, line_count, &last_line);
        let source = if at_end {
            self.text_in_range(range)?
        } else {
            String::new()
        };
        let text = buffer::fit_replacement(text, &source, at_end);

        let mut args = self.range_args(range);
        args.push(Value::from(text));
        self.nvim
            .execute_lua(lua::SET_TEXT_LUA, args)
            .map(|_| ())
            .context("Failed to set text in range")
    }

    fn cursor(&mut self) -> Result<Point> {
        let Some(window) = &self.window else {
            return Ok(Point::default());
        };
        let (row, column) = window.get_cursor(self.nvim)?;
        Ok(Point::new((row - 1).max(0) as usize, column.max(0) as usize))
    }

    fn set_cursor(&mut self, point: Point) -> Result<()> {
        let Some(window) = &self.window else {
            return Ok(());
        };
        let line_count = self.buffer.line_count(self.nvim)?;
        let row = (point.row as i64 + 1).clamp(1, line_count.max(1));
        // Columns past the end of the line are clamped by Neovim
        window
            .set_cursor(self.nvim, (row, point.column as i64))
            .context("Failed to restore cursor")
    }
}
