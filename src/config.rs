//! User configuration.
//!
//! Settings live in a JSON file with camelCase keys:
//!
//! ```json
//! {
//!   "formatOnSave": true,
//!   "style": "semi-standard",
//!   "checkStyleDevDependencies": false,
//!   "honorPackageConfig": true,
//!   "usePrettier": true,
//!   "scopes": { "javascriptreact": { "formatOnSave": false } }
//! }
//! ```
//!
//! The file is re-read before every operation through a [`ConfigProvider`], so
//! edits apply without restarting the host.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use crate::style::Style;

/// Effective settings for one operation
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub format_on_save: bool,
    pub style: Style,
    pub check_style_dev_dependencies: bool,
    pub honor_package_config: bool,
    pub use_prettier: bool,
    /// Executable used to run the delegated JavaScript libraries
    pub node_path: String,
    /// Per-language overrides, keyed by editor scope (Neovim filetype)
    pub scopes: HashMap<String, ScopeOverrides>,
}

/// Settings that may differ per language scope
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_on_save: Option<bool>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            format_on_save: false,
            style: Style::Standard,
            check_style_dev_dependencies: false,
            honor_package_config: true,
            use_prettier: true,
            node_path: "node".to_string(),
            scopes: HashMap::new(),
        }
    }
}

impl Configuration {
    /// `formatOnSave` as seen from a given scope, scope override first
    pub fn format_on_save_for(&self, scope: Option<&str>) -> bool {
        scope
            .and_then(|scope| self.scopes.get(scope))
            .and_then(|overrides| overrides.format_on_save)
            .unwrap_or(self.format_on_save)
    }

    /// Parse settings from JSON text; absent keys take their defaults
    pub fn from_json(input: &str) -> anyhow::Result<Self> {
        serde_json::from_str(input).context("Invalid JSON for Configuration")
    }
}

/// Source of configuration snapshots
pub trait ConfigProvider {
    /// Read the current settings
    fn load(&self) -> anyhow::Result<Configuration>;

    /// Read the current settings, degrading to defaults on failure
    fn snapshot(&self) -> Configuration {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load configuration, using defaults");
            Configuration::default()
        })
    }
}

/// Fixed settings, mostly useful for tests and one-shot CLI runs
#[derive(Debug, Clone, Default)]
pub struct StaticConfig(pub Configuration);

impl ConfigProvider for StaticConfig {
    fn load(&self) -> anyhow::Result<Configuration> {
        Ok(self.0.clone())
    }
}

/// Settings file on disk, read afresh on every [`ConfigProvider::load`]
#[derive(Debug, Clone)]
pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file from the environment override or the platform config dir
    pub fn discover() -> anyhow::Result<Self> {
        Ok(Self::new(default_config_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigProvider for FileConfig {
    fn load(&self) -> anyhow::Result<Configuration> {
        if !self.path.exists() {
            return Ok(Configuration::default());
        }

        let input = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        Configuration::from_json(&input)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

/// Compute the settings file path
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    let dir = dirs::config_dir().context("Failed to determine config directory")?;
    Ok(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
