//! Decide whether a file should be formatted.

use std::path::Path;

use glob::{MatchOptions, Pattern};

use crate::config::Configuration;
use crate::constants::SUPPORTED_EXTENSIONS;
use crate::project::PackageConfig;

/// `*` and `?` stop at `/`, dotfiles need an explicit dot
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Whether `relative_path` (relative to its project root) may be formatted.
///
/// An ignore match in the package config rejects the file before the
/// extension is even looked at.
pub fn is_supported(
    relative_path: &str,
    config: &Configuration,
    package_config: Option<&PackageConfig>,
) -> bool {
    if config.honor_package_config
        && let Some(package_config) = package_config
        && is_ignored(relative_path, &package_config.ignore)
    {
        tracing::debug!(path = relative_path, "file ignored by package config");
        return false;
    }

    has_supported_extension(relative_path)
}

/// Whether any pattern matches the path; unparsable patterns are skipped.
///
/// Patterns follow the `package.json` conventions: `{a,b}` alternatives are
/// expanded, a leading `!` inverts the match and a leading `#` is a comment.
pub fn is_ignored(relative_path: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|raw| pattern_matches(relative_path, raw))
}

fn pattern_matches(relative_path: &str, raw: &str) -> bool {
    if raw.starts_with('#') {
        return false;
    }

    let negations = raw.chars().take_while(|c| *c == '!').count();
    let body = &raw[negations..];

    let compiled: Result<Vec<Pattern>, _> = expand_braces(body)
        .iter()
        .map(|alternative| Pattern::new(alternative))
        .collect();
    let alternatives = match compiled {
        Ok(alternatives) => alternatives,
        Err(e) => {
            tracing::warn!(pattern = %raw, error = %e, "Skipping invalid ignore pattern");
            return false;
        }
    };

    let matched = alternatives
        .iter()
        .any(|pattern| pattern.matches_with(relative_path, GLOB_OPTIONS));
    matched != (negations % 2 == 1)
}

/// Expand `{a,b}` groups, nested ones included, into plain glob patterns.
///
/// A group without a top-level comma stays literal, as does a backslash
/// escaped brace.
fn expand_braces(pattern: &str) -> Vec<String> {
    let bytes = pattern.as_bytes();
    let mut depth = 0usize;
    let mut open = 0usize;
    let mut commas = Vec::new();

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'{' => {
                if depth == 0 {
                    open = i;
                    commas.clear();
                }
                depth += 1;
            }
            b',' if depth == 1 => commas.push(i),
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 && !commas.is_empty() {
                    let (prefix, suffix) = (&pattern[..open], &pattern[i + 1..]);
                    let mut bounds = vec![open];
                    bounds.extend(&commas);
                    bounds.push(i);
                    return bounds
                        .windows(2)
                        .flat_map(|w| {
                            expand_braces(&format!("{prefix}{}{suffix}", &pattern[w[0] + 1..w[1]]))
                        })
                        .collect();
                }
            }
            _ => {}
        }
        i += 1;
    }

    vec![pattern.to_string()]
}

fn has_supported_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}
