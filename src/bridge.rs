//! Formatting operations against a live editor.
//!
//! # Flow
//!
//! 1. Manual command: resolve the style, then format the selection (or the
//!    whole buffer when nothing is selected)
//!
//! 2. Pre-save hook: skip unnamed, unmodified or opted-out buffers, resolve
//!    the style, check eligibility of the project-relative path, then format
//!    the whole buffer before returning
//!
//! Failures never reach the user: a failed transform leaves the text as it
//! was, and the cursor is put back where it started in every case.
//!
//! # Example
//!
//! ```no_run
//! use standard_formatter::bridge::Bridge;
//! use standard_formatter::config::StaticConfig;
//! use standard_formatter::editor::memory::MemoryBuffer;
//! use standard_formatter::transform::{Pipeline, node::NodeAdapter};
//!
//! let bridge = Bridge::new(
//!     StaticConfig::default(),
//!     Pipeline::new(NodeAdapter::default(), NodeAdapter::default()),
//! );
//! let mut buffer = MemoryBuffer::new("var a = 1;\n");
//! bridge.run_command(Some(&mut buffer)).expect("Failed to format");
//! ```

use std::path::{Path, PathBuf};

use crate::config::{ConfigProvider, Configuration};
use crate::editor::{Editor, Point, Range};
use crate::eligibility;
use crate::project;
use crate::style::{self, Style};
use crate::transform::{Pipeline, Prettifier, StyleFixer};

/// Options for a single [`Bridge::format_operation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Format only the selection when there is one
    pub selection_only: bool,
}

/// Input captured from the editor before any mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRequest {
    pub source_text: String,
    pub selection: Option<Range>,
    pub cursor: Point,
}

/// Why a pre-save hook did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoPath,
    Unmodified,
    FormatOnSaveDisabled,
    NotSupported,
}

/// Result of a pre-save hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Formatted,
    Skipped(SkipReason),
}

/// Ties configuration, style resolution and the transform pipeline to editors
pub struct Bridge<C, P, F> {
    config: C,
    pipeline: Pipeline<P, F>,
}

impl<C, P, F> Bridge<C, P, F>
where
    C: ConfigProvider,
    P: Prettifier,
    F: StyleFixer,
{
    pub fn new(config: C, pipeline: Pipeline<P, F>) -> Self {
        Self { config, pipeline }
    }

    /// Fresh configuration snapshot
    pub fn config(&self) -> Configuration {
        self.config.snapshot()
    }

    /// Manual "format current document" command
    pub fn run_command<E: Editor + ?Sized>(&self, editor: Option<&mut E>) -> anyhow::Result<()> {
        let Some(editor) = editor else {
            return Ok(());
        };

        let config = self.config();
        let style = style::resolve_style(&config, &project_start(editor.path()));

        self.format_with(
            editor,
            &config,
            style,
            FormatOptions {
                selection_only: true,
            },
        )
    }

    /// Format the active editor's selection or buffer with `style`
    pub fn format_operation<E: Editor + ?Sized>(
        &self,
        editor: Option<&mut E>,
        style: Style,
        options: FormatOptions,
    ) -> anyhow::Result<()> {
        let Some(editor) = editor else {
            return Ok(());
        };

        let config = self.config();
        self.format_with(editor, &config, style, options)
    }

    /// Pre-save hook: format the buffer if it is eligible
    pub fn on_will_save<E: Editor + ?Sized>(&self, editor: &mut E) -> anyhow::Result<SaveOutcome> {
        let Some(path) = editor.path() else {
            return Ok(SaveOutcome::Skipped(SkipReason::NoPath));
        };

        if !editor.is_modified()? {
            return Ok(SaveOutcome::Skipped(SkipReason::Unmodified));
        }

        let config = self.config();
        let scope = editor.scope()?;
        if !config.format_on_save_for(scope.as_deref()) {
            return Ok(SaveOutcome::Skipped(SkipReason::FormatOnSaveDisabled));
        }

        let style = style::resolve_style(&config, &path);
        if !self.is_eligible(&path, &config, style) {
            return Ok(SaveOutcome::Skipped(SkipReason::NotSupported));
        }

        self.format_with(
            editor,
            &config,
            style,
            FormatOptions {
                selection_only: false,
            },
        )?;
        Ok(SaveOutcome::Formatted)
    }

    /// Eligibility of a file on disk, judged by its project-relative path
    pub fn is_eligible(&self, path: &Path, config: &Configuration, style: Style) -> bool {
        let relative = project::relative_path(path);
        let package_config = if config.honor_package_config {
            project::package_config(path, style.config_namespace())
        } else {
            None
        };

        eligibility::is_supported(&relative, config, package_config.as_ref())
    }

    fn format_with<E: Editor + ?Sized>(
        &self,
        editor: &mut E,
        config: &Configuration,
        style: Style,
        options: FormatOptions,
    ) -> anyhow::Result<()> {
        let request = capture(editor, options)?;
        let workdir = editor.path().and_then(|p| p.parent().map(Path::to_path_buf));

        let transformed = match self.pipeline.transform(
            &request.source_text,
            style,
            config.use_prettier,
            workdir.as_deref(),
        ) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, %style, "Error transforming text, keeping original");
                request.source_text.clone()
            }
        };

        let applied = apply(editor, &request, &transformed);

        // Restore the cursor whatever happened while applying
        if let Err(e) = editor.set_cursor(request.cursor) {
            tracing::warn!(error = %e, "Failed to restore cursor");
        }

        applied
    }
}

/// Read the text to format and the cursor, before anything is changed
fn capture<E: Editor + ?Sized>(editor: &mut E, options: FormatOptions) -> anyhow::Result<FormatRequest> {
    let cursor = editor.cursor()?;

    let selection = if options.selection_only {
        editor.selection()?.filter(|range| !range.is_empty())
    } else {
        None
    };

    let selected_text = match selection {
        Some(range) => Some(editor.text_in_range(range)?).filter(|text| !text.is_empty()),
        None => None,
    };

    Ok(match selected_text {
        Some(source_text) => FormatRequest {
            source_text,
            selection,
            cursor,
        },
        None => FormatRequest {
            source_text: editor.text()?,
            selection: None,
            cursor,
        },
    })
}

fn apply<E: Editor + ?Sized>(
    editor: &mut E,
    request: &FormatRequest,
    transformed: &str,
) -> anyhow::Result<()> {
    if transformed == request.source_text {
        return Ok(());
    }

    match request.selection {
        Some(range) => editor.set_text_in_range(range, transformed),
        None => editor.set_text(transformed),
    }
}

/// Where project lookups start: the document, else the working directory
fn project_start(path: Option<PathBuf>) -> PathBuf {
    path.or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
