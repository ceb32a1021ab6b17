//! In-memory editor backed by a `String`, optionally tied to a file on disk.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{Editor, Point, Range};

/// A buffer living entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    path: Option<PathBuf>,
    scope: Option<String>,
    text: String,
    saved_text: String,
    cursor: Point,
    selection: Option<Range>,
}

impl MemoryBuffer {
    /// Unnamed, unmodified buffer
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            saved_text: text.clone(),
            text,
            ..Self::default()
        }
    }

    /// Load a file; the scope is derived from its extension
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Ok(Self::new(text)
            .with_path(path)
            .with_scope(scope_for_path(path)))
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_scope(mut self, scope: Option<impl Into<String>>) -> Self {
        self.scope = scope.map(Into::into);
        self
    }

    pub fn with_cursor(mut self, cursor: Point) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_selection(mut self, selection: Range) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Simulate unsaved edits by replacing the text without touching disk state
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn contents(&self) -> &str {
        &self.text
    }

    /// Write the buffer back to its file and mark it clean
    pub fn save(&mut self) -> anyhow::Result<()> {
        let path = self.path.as_ref().context("Buffer has no backing file")?;
        std::fs::write(path, &self.text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.saved_text = self.text.clone();
        Ok(())
    }

    fn line_bounds(&self) -> Vec<(usize, usize)> {
        let mut bounds = Vec::new();
        let mut start = 0;
        for (i, b) in self.text.bytes().enumerate() {
            if b == b'\n' {
                bounds.push((start, i));
                start = i + 1;
            }
        }
        bounds.push((start, self.text.len()));
        bounds
    }

    /// Byte offset of `point`, clamped into the text and onto a char boundary
    fn offset(&self, point: Point) -> usize {
        let bounds = self.line_bounds();
        let (start, end) = bounds[point.row.min(bounds.len() - 1)];
        let mut offset = (start + point.column).min(end);
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn clamp(&self, point: Point) -> Point {
        let bounds = self.line_bounds();
        let row = point.row.min(bounds.len() - 1);
        let offset = self.offset(Point::new(row, point.column));
        Point::new(row, offset - bounds[row].0)
    }
}

impl Editor for MemoryBuffer {
    fn path(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn is_modified(&mut self) -> anyhow::Result<bool> {
        Ok(self.text != self.saved_text)
    }

    fn scope(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self.scope.clone())
    }

    fn text(&mut self) -> anyhow::Result<String> {
        Ok(self.text.clone())
    }

    fn selection(&mut self) -> anyhow::Result<Option<Range>> {
        Ok(self.selection)
    }

    fn text_in_range(&mut self, range: Range) -> anyhow::Result<String> {
        let start = self.offset(range.start);
        let end = self.offset(range.end).max(start);
        Ok(self.text[start..end].to_string())
    }

    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.text = text.to_string();
        self.selection = None;
        Ok(())
    }

    fn set_text_in_range(&mut self, range: Range, text: &str) -> anyhow::Result<()> {
        let start = self.offset(range.start);
        let end = self.offset(range.end).max(start);
        self.text.replace_range(start..end, text);
        self.selection = None;
        Ok(())
    }

    fn cursor(&mut self) -> anyhow::Result<Point> {
        Ok(self.cursor)
    }

    fn set_cursor(&mut self, point: Point) -> anyhow::Result<()> {
        self.cursor = self.clamp(point);
        Ok(())
    }
}

/// Language scope for a path, named after the matching Neovim filetype
pub fn scope_for_path(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "js" | "mjs" | "cjs" => Some("javascript"),
        "jsx" => Some("javascriptreact"),
        _ => None,
    }
}
