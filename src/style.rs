//! Style selection: which fixer (if any) applies to a document.
//!
//! A style is either picked statically from the configuration or detected from
//! the `devDependencies` of the project that owns the document. Resolution runs
//! at the start of every operation; nothing is cached between calls so that
//! switching projects (or editing `package.json`) takes effect immediately.

use std::fmt;
use std::path::Path;

use crate::config::Configuration;
use crate::project;

/// Formatting convention enforced by the delegated fixer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// Formatting is skipped entirely
    None,
    /// `standard`: no semicolons
    #[default]
    Standard,
    /// `semistandard`: semicolons required
    SemiStandard,
}

impl Style {
    /// npm package implementing the fixer for this style
    pub fn package_name(self) -> Option<&'static str> {
        match self {
            Style::None => None,
            Style::Standard => Some("standard"),
            Style::SemiStandard => Some("semistandard"),
        }
    }

    /// `package.json` key holding per-project options such as `ignore`
    pub fn config_namespace(self) -> &'static str {
        match self {
            Style::SemiStandard => "semistandard",
            Style::None | Style::Standard => "standard",
        }
    }

    /// Whether statements are terminated with semicolons
    pub fn semicolons(self) -> bool {
        matches!(self, Style::SemiStandard)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Style::None => "none",
            Style::Standard => "standard",
            Style::SemiStandard => "semi-standard",
        })
    }
}

/// Resolve the style for a document located at (or under) `project_start`.
///
/// With `check_style_dev_dependencies` set, the nearest manifest decides:
/// `standard` wins over `semistandard`, and a project declaring neither (or no
/// manifest at all) resolves to [`Style::None`].
pub fn resolve_style(config: &Configuration, project_start: &Path) -> Style {
    if !config.check_style_dev_dependencies {
        return config.style;
    }

    let style = project::dev_dependencies(project_start)
        .map(|deps| style_from_dev_dependencies(&deps))
        .unwrap_or(Style::None);

    tracing::debug!(%style, start = %project_start.display(), "style detected from devDependencies");
    style
}

/// Pick a style from a `devDependencies` map, keyed by package name
pub fn style_from_dev_dependencies(deps: &serde_json::Map<String, serde_json::Value>) -> Style {
    if deps.contains_key("standard") {
        Style::Standard
    } else if deps.contains_key("semistandard") {
        Style::SemiStandard
    } else {
        Style::None
    }
}
