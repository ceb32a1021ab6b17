//! Delegated libraries executed in a child `node` process.
//!
//! Running the libraries out of process keeps their dynamic code evaluation
//! away from the editor. One process is spawned per call; requests and replies
//! are single JSON documents.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::js;
use super::{AdapterError, LintReport, PrettierOptions, Prettifier, StyleFixer};

#[derive(Debug, Serialize)]
struct LintRequest<'a> {
    package: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct PrettierRequest<'a> {
    text: &'a str,
    options: &'a PrettierOptions,
}

#[derive(Debug, serde::Deserialize)]
struct Reply<T> {
    ok: Option<T>,
    error: Option<String>,
}

/// Adapter running `standard`/`semistandard`/`prettier` through `node`
#[derive(Debug, Clone)]
pub struct NodeAdapter {
    node: String,
}

impl NodeAdapter {
    pub fn new(node: impl Into<String>) -> Self {
        Self { node: node.into() }
    }

    fn run<R: Serialize, T: DeserializeOwned>(
        &self,
        script: &str,
        request: &R,
        workdir: Option<&Path>,
    ) -> Result<T, AdapterError> {
        let mut cmd = Command::new(&self.node);
        cmd.arg("-e")
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = workdir.filter(|dir| dir.is_dir()) {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| AdapterError::Spawn {
            program: self.node.clone(),
            source,
        })?;

        // The script reads all of stdin before replying, so write then wait
        let payload = serde_json::to_vec(request)?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&payload)?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(AdapterError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        decode_reply(&output.stdout)
    }
}

/// Payload of a reply; an `error` wins over an `ok`
fn decode_reply<T: DeserializeOwned>(stdout: &[u8]) -> Result<T, AdapterError> {
    let reply: Reply<T> = serde_json::from_slice(stdout)?;
    match (reply.ok, reply.error) {
        (_, Some(message)) => Err(AdapterError::Library(message)),
        (Some(ok), None) => Ok(ok),
        (None, None) => Err(AdapterError::Library("empty reply".to_string())),
    }
}

impl Default for NodeAdapter {
    fn default() -> Self {
        Self::new("node")
    }
}

impl Prettifier for NodeAdapter {
    fn prettify(
        &self,
        text: &str,
        options: &PrettierOptions,
        workdir: Option<&Path>,
    ) -> Result<String, AdapterError> {
        self.run(
            &js::prettier_script(),
            &PrettierRequest { text, options },
            workdir,
        )
    }
}

impl StyleFixer for NodeAdapter {
    fn lint_fix(
        &self,
        package: &str,
        text: &str,
        workdir: Option<&Path>,
    ) -> Result<LintReport, AdapterError> {
        tracing::debug!(package, "running fixer");
        self.run(&js::lint_fix_script(), &LintRequest { package, text }, workdir)
    }
}
