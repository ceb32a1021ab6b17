//! Text transformation: optional prettier pass followed by the style fixer.
//!
//! The delegated libraries sit behind two narrow traits, [`Prettifier`] and
//! [`StyleFixer`]. The production implementation ([`node::NodeAdapter`]) runs
//! them in a child `node` process; tests plug in fakes.
//!
//! # Failure policy
//!
//! - A prettier failure is logged and the fixer runs on the untouched text.
//! - A fixer failure is returned to the caller, which must keep the original
//!   text. The pipeline never hands back partially transformed output.

pub mod node;

mod js;

use std::path::Path;

use crate::style::Style;

/// Errors raised by an adapter talking to a delegated library
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while talking to the formatter process: {0}")]
    Io(#[from] std::io::Error),

    #[error("Formatter process exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("Malformed reply from formatter process: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("{0}")]
    Library(String),
}

/// Errors returned by [`Pipeline::transform`]
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("{package} failed: {source}")]
    Fixer {
        package: &'static str,
        #[source]
        source: AdapterError,
    },
}

/// Options handed to the pre-formatter
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrettierOptions {
    pub parser: &'static str,
    pub semi: bool,
    pub single_quote: bool,
}

impl PrettierOptions {
    /// Options matching a style: modern JS/JSX parser, single quotes
    pub fn for_style(style: Style) -> Self {
        Self {
            parser: "babel",
            semi: style.semicolons(),
            single_quote: true,
        }
    }
}

/// One file's entry in a fixer report
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct LintResult {
    /// Fixed source; absent when nothing needed fixing
    #[serde(default)]
    pub output: Option<String>,
}

/// What a fixer returns on success
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct LintReport {
    #[serde(default)]
    pub results: Vec<LintResult>,
}

impl LintReport {
    /// Fixed output of the first result, if any
    pub fn fixed_output(&self) -> Option<&str> {
        self.results.first()?.output.as_deref()
    }
}

/// Pre-formatting library (prettier)
pub trait Prettifier {
    fn prettify(
        &self,
        text: &str,
        options: &PrettierOptions,
        workdir: Option<&Path>,
    ) -> Result<String, AdapterError>;
}

/// Style-fixing library (standard, semistandard)
pub trait StyleFixer {
    /// Lint `text` with `package` in fix mode
    fn lint_fix(
        &self,
        package: &str,
        text: &str,
        workdir: Option<&Path>,
    ) -> Result<LintReport, AdapterError>;
}

impl<T: Prettifier + ?Sized> Prettifier for &T {
    fn prettify(
        &self,
        text: &str,
        options: &PrettierOptions,
        workdir: Option<&Path>,
    ) -> Result<String, AdapterError> {
        (**self).prettify(text, options, workdir)
    }
}

impl<T: StyleFixer + ?Sized> StyleFixer for &T {
    fn lint_fix(
        &self,
        package: &str,
        text: &str,
        workdir: Option<&Path>,
    ) -> Result<LintReport, AdapterError> {
        (**self).lint_fix(package, text, workdir)
    }
}

/// Runs the pre-format and fix passes over a piece of text
pub struct Pipeline<P, F> {
    prettifier: P,
    fixer: F,
}

impl<P: Prettifier, F: StyleFixer> Pipeline<P, F> {
    pub fn new(prettifier: P, fixer: F) -> Self {
        Self { prettifier, fixer }
    }

    /// Transform `text` according to `style`.
    ///
    /// `workdir` is where the delegated libraries are resolved from, normally
    /// the directory of the document being formatted.
    pub fn transform(
        &self,
        text: &str,
        style: Style,
        use_prettier: bool,
        workdir: Option<&Path>,
    ) -> Result<String, TransformError> {
        let Some(package) = style.package_name() else {
            return Ok(text.to_string());
        };

        let prettified = if use_prettier {
            match self
                .prettifier
                .prettify(text, &PrettierOptions::for_style(style), workdir)
            {
                Ok(pretty) => Some(pretty),
                Err(e) => {
                    tracing::warn!(error = %e, "prettier failed, continuing without it");
                    None
                }
            }
        } else {
            None
        };
        let text = prettified.as_deref().unwrap_or(text);

        let report = self
            .fixer
            .lint_fix(package, text, workdir)
            .map_err(|source| TransformError::Fixer { package, source })?;

        Ok(report.fixed_output().unwrap_or(text).to_string())
    }
}
