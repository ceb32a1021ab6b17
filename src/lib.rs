//! standard-formatter: format JavaScript buffers with `standard` or
//! `semistandard` from inside Neovim.
//!
//! This crate provides two main functionalities:
//!
//! 1. **Format on save**: a pre-save hook that formats eligible files before
//!    they are written, honoring per-project `ignore` globs
//! 2. **Manual formatting**: a `:StandardFormat` command that formats the
//!    current buffer or just the selected range
//!
//! The formatting itself is delegated to the `standard`/`semistandard` and
//! `prettier` npm packages, executed in a child `node` process.
//!
//! # Architecture
//!
//! - `bridge`: Formatting operations against an editor (command, save hook)
//! - `style`: Style selection, static or from `devDependencies`
//! - `eligibility`: Extension and ignore-glob filtering
//! - `transform`: Prettier + fixer pipeline and its `node` adapter
//! - `project`: `package.json` discovery and section lookup
//! - `config`: User settings, re-read before every operation
//! - `editor`: Editor abstraction (buffer text, selection, cursor)
//!   - `editor::neovim`: Neovim implementation over msgpack-rpc
//!   - `editor::memory`: In-memory implementation, backs `fix` and tests
//! - `host`: Neovim registrations and event loop
//! - `logging`: `tracing` subscriber setup
//! - `constants`: Shared constants (timeouts, names)
//!
//! # Example: Using as a Library
//!
//! ```no_run
//! use standard_formatter::bridge::Bridge;
//! use standard_formatter::config::{Configuration, StaticConfig};
//! use standard_formatter::editor::memory::MemoryBuffer;
//! use standard_formatter::transform::{Pipeline, node::NodeAdapter};
//! use std::path::Path;
//!
//! let config = Configuration {
//!     format_on_save: true,
//!     ..Configuration::default()
//! };
//! let bridge = Bridge::new(
//!     StaticConfig(config),
//!     Pipeline::new(NodeAdapter::default(), NodeAdapter::default()),
//! );
//!
//! let mut buffer = MemoryBuffer::open(Path::new("src/index.js")).unwrap();
//! buffer.edit("var a = \"x\";\n");
//! let outcome = bridge.on_will_save(&mut buffer).unwrap();
//! println!("{outcome:?}");
//! ```

pub mod bridge;
pub mod config;
pub mod constants;
pub mod editor;
pub mod eligibility;
pub mod host;
pub mod logging;
pub mod project;
pub mod style;
pub mod transform;
