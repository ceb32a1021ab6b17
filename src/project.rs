//! Project introspection through the nearest `package.json`.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::constants::{DEV_DEPENDENCIES, MANIFEST_FILE};

/// Per-style options read from the manifest (`"standard": { ... }`)
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct PackageConfig {
    /// Glob patterns, relative to the project root, that are never formatted
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Nearest ancestor of `path` (inclusive) containing a `package.json`
pub fn find_root(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .find(|dir| dir.join(MANIFEST_FILE).is_file())
        .map(Path::to_path_buf)
}

/// Read a top-level section of the nearest manifest.
///
/// Returns `None` when no manifest exists, when it cannot be parsed, or when
/// it lacks the section.
pub fn read_section(start: &Path, section: &str) -> Option<Value> {
    let root = find_root(start)?;
    let manifest = root.join(MANIFEST_FILE);

    let input = match std::fs::read_to_string(&manifest) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(path = %manifest.display(), error = %e, "Failed to read manifest");
            return None;
        }
    };

    let mut json: Value = match serde_json::from_str(&input) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(path = %manifest.display(), error = %e, "Failed to parse manifest");
            return None;
        }
    };

    json.get_mut(section).map(Value::take)
}

/// `devDependencies` of the nearest manifest
pub fn dev_dependencies(start: &Path) -> Option<Map<String, Value>> {
    match read_section(start, DEV_DEPENDENCIES)? {
        Value::Object(deps) => Some(deps),
        _ => None,
    }
}

/// Style options of the nearest manifest, under the given namespace
pub fn package_config(start: &Path, namespace: &str) -> Option<PackageConfig> {
    let section = read_section(start, namespace)?;
    match serde_json::from_value(section) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(namespace, error = %e, "Ignoring malformed package config");
            None
        }
    }
}

/// Path of `file` relative to its project root, `/`-separated.
///
/// Falls back to the path verbatim when no project root is discoverable.
pub fn relative_path(file: &Path) -> String {
    let relative = find_root(file).and_then(|root| {
        file.strip_prefix(&root).ok().map(|rest| {
            rest.components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
    });

    relative.unwrap_or_else(|| file.to_string_lossy().into_owned())
}
