pub mod memory;
pub mod neovim;

use std::path::PathBuf;

/// Position in a buffer: zero-based row and byte column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Half-open span of text, `start` inclusive and `end` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Point,
    pub end: Point,
}

impl Range {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Trait for a live text editing surface
pub trait Editor {
    /// Backing file path, `None` for unnamed buffers
    fn path(&self) -> Option<PathBuf>;

    /// Whether the buffer differs from what is on disk
    fn is_modified(&mut self) -> anyhow::Result<bool>;

    /// Language scope used for per-language settings
    fn scope(&mut self) -> anyhow::Result<Option<String>>;

    /// Whole buffer contents
    fn text(&mut self) -> anyhow::Result<String>;

    /// Current selection, if there is one
    fn selection(&mut self) -> anyhow::Result<Option<Range>>;

    /// Contents of `range`
    fn text_in_range(&mut self, range: Range) -> anyhow::Result<String>;

    /// Replace the whole buffer
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;

    /// Replace only `range`, leaving the rest of the buffer untouched
    fn set_text_in_range(&mut self, range: Range, text: &str) -> anyhow::Result<()>;

    /// Cursor position
    fn cursor(&mut self) -> anyhow::Result<Point>;

    /// Move the cursor, clamping it into the buffer when necessary
    fn set_cursor(&mut self, point: Point) -> anyhow::Result<()>;
}
