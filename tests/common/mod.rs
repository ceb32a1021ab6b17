//! Shared fakes and fixtures for integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use standard_formatter::config::Configuration;
use standard_formatter::transform::{
    AdapterError, LintReport, LintResult, PrettierOptions, Prettifier, StyleFixer,
};

type FixFn = Box<dyn Fn(&str) -> Result<Option<String>, String>>;
type PrettyFn = Box<dyn Fn(&str) -> Result<String, String>>;

/// Fixer recording every call as (package, text)
pub struct FakeFixer {
    fix: FixFn,
    pub calls: RefCell<Vec<(String, String)>>,
}

impl FakeFixer {
    pub fn new(fix: impl Fn(&str) -> Result<Option<String>, String> + 'static) -> Self {
        Self {
            fix: Box::new(fix),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Strips trailing semicolons; reports no output when nothing changed
    pub fn semicolon_stripper() -> Self {
        Self::new(|text| {
            let fixed = text.replace(";\n", "\n");
            Ok((fixed != text).then_some(fixed))
        })
    }

    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::new(move |_| Err(message.clone()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl StyleFixer for FakeFixer {
    fn lint_fix(
        &self,
        package: &str,
        text: &str,
        _workdir: Option<&Path>,
    ) -> Result<LintReport, AdapterError> {
        self.calls
            .borrow_mut()
            .push((package.to_string(), text.to_string()));

        (self.fix)(text)
            .map(|output| LintReport {
                results: vec![LintResult { output }],
            })
            .map_err(AdapterError::Library)
    }
}

/// Prettifier recording the options of every call
pub struct FakePrettifier {
    format: PrettyFn,
    pub calls: RefCell<Vec<PrettierOptions>>,
}

impl FakePrettifier {
    pub fn new(format: impl Fn(&str) -> Result<String, String> + 'static) -> Self {
        Self {
            format: Box::new(format),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Returns its input untouched
    pub fn identity() -> Self {
        Self::new(|text| Ok(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::new(|_| Err("SyntaxError: Unexpected token".to_string()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Prettifier for FakePrettifier {
    fn prettify(
        &self,
        text: &str,
        options: &PrettierOptions,
        _workdir: Option<&Path>,
    ) -> Result<String, AdapterError> {
        self.calls.borrow_mut().push(options.clone());
        (self.format)(text).map_err(AdapterError::Library)
    }
}

/// Configuration with format on save enabled and prettier off
pub fn save_config() -> Configuration {
    Configuration {
        format_on_save: true,
        use_prettier: false,
        ..Configuration::default()
    }
}

/// Write a `package.json` with the given contents into `dir`
pub fn write_manifest(dir: &Path, contents: &str) {
    std::fs::write(dir.join("package.json"), contents).expect("Failed to write package.json");
}

/// Create `relative` under `root` (with parent dirs) and return its path
pub fn touch(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(&path, contents).expect("Failed to write file");
    path
}
