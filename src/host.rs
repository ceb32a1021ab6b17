//! Neovim host: registrations and the event loop.
//!
//! # Hook Flow
//!
//! 1. `will_save`: a buffer is about to be written
//!    - Run the pre-save hook against that buffer
//!    - Always release the waiting `BufWritePre` callback afterwards
//!
//! 2. `format`: `:StandardFormat` was invoked
//!    - Format the current buffer, or the command's range when it has one
//!
//! 3. `detach`: Neovim is exiting
//!    - Release the save hooks and the user command, then stop
//!
//! Errors are logged per event; the loop only ends on `detach` or when the
//! connection closes.

use anyhow::Context;
use neovim_lib::{Neovim, NeovimApi, Value};

use crate::bridge::{Bridge, SaveOutcome};
use crate::config::ConfigProvider;
use crate::editor::neovim::connection::{self, Target};
use crate::editor::neovim::{NeovimEditor, lua};
use crate::transform::{Prettifier, StyleFixer};

/// Notification sent by the Lua side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Manual command, with its 1-based line range when invoked with one
    Format { range: Option<(i64, i64)> },
    /// A buffer is about to be written
    WillSave { buffer: i64 },
    /// Neovim is shutting down
    Detach,
}

impl Event {
    /// Decode a notification; `None` for unknown methods or bad arguments
    pub fn parse(method: &str, args: &[Value]) -> Option<Self> {
        match method {
            "format" => {
                let range = match (
                    args.first().and_then(Value::as_i64),
                    args.get(1).and_then(Value::as_i64),
                    args.get(2).and_then(Value::as_i64),
                ) {
                    (Some(count), Some(first), Some(last)) if count > 0 => Some((first, last)),
                    _ => None,
                };
                Some(Event::Format { range })
            }
            "will_save" => args
                .first()
                .and_then(Value::as_i64)
                .map(|buffer| Event::WillSave { buffer }),
            "detach" => Some(Event::Detach),
            _ => None,
        }
    }
}

/// Save hooks and user command registered in one Neovim instance
pub struct Registration {
    channel: i64,
}

impl Registration {
    /// Register the hooks and command for the given RPC channel
    pub fn register(nvim: &mut Neovim, channel: i64) -> anyhow::Result<Self> {
        nvim.execute_lua(&lua::setup_lua(), vec![Value::from(channel)])
            .context("Failed to register save hooks and command")?;
        Ok(Self { channel })
    }

    pub fn channel(&self) -> i64 {
        self.channel
    }

    /// Release the hooks and the command together.
    ///
    /// Returns whether anything was released; a newer host attached to the
    /// same Neovim keeps its registrations.
    pub fn release(self, nvim: &mut Neovim) -> bool {
        match nvim.execute_lua(&lua::teardown_lua(), vec![Value::from(self.channel)]) {
            Ok(released) => {
                let released = released.as_bool().unwrap_or(false);
                if !released {
                    tracing::debug!(channel = self.channel, "registrations owned by another host");
                }
                released
            }
            Err(e) => {
                tracing::debug!(channel = self.channel, error = %e, "Failed to release registrations");
                false
            }
        }
    }
}

/// Attach to Neovim and serve events until detached
pub fn run<C, P, F>(target: &Target, bridge: &Bridge<C, P, F>) -> anyhow::Result<()>
where
    C: ConfigProvider,
    P: Prettifier,
    F: StyleFixer,
{
    let (mut nvim, notifications) = connection::connect(target)?;
    let channel = connection::channel_id(&mut nvim)?;
    let registration = Registration::register(&mut nvim, channel)?;
    tracing::info!(channel = registration.channel(), ?target, "attached to Neovim");

    for (method, args) in notifications.iter() {
        let Some(event) = Event::parse(&method, &args) else {
            tracing::warn!(%method, "Ignoring unknown notification");
            continue;
        };

        if event == Event::Detach {
            break;
        }

        if let Err(e) = handle_event(&mut nvim, bridge, event) {
            tracing::warn!(?event, error = %e, "Failed to handle event");
        }
    }

    let channel = registration.channel();
    let released = registration.release(&mut nvim);
    tracing::info!(channel, released, "detached from Neovim");
    Ok(())
}

fn handle_event<C, P, F>(
    nvim: &mut Neovim,
    bridge: &Bridge<C, P, F>,
    event: Event,
) -> anyhow::Result<()>
where
    C: ConfigProvider,
    P: Prettifier,
    F: StyleFixer,
{
    match event {
        Event::Format { range } => {
            let mut editor = NeovimEditor::active(nvim, range)?;
            bridge.run_command(editor.as_mut())
        }
        Event::WillSave { buffer } => {
            let outcome = will_save(nvim, bridge, buffer);

            // The write is blocked until this runs, so do it even on failure
            nvim.execute_lua(&lua::release_save_lua(), vec![Value::from(buffer)])
                .context("Failed to release save hook")?;

            let outcome = outcome?;
            tracing::debug!(buffer, ?outcome, "pre-save hook done");
            Ok(())
        }
        Event::Detach => Ok(()),
    }
}

fn will_save<C, P, F>(
    nvim: &mut Neovim,
    bridge: &Bridge<C, P, F>,
    buffer: i64,
) -> anyhow::Result<Option<SaveOutcome>>
where
    C: ConfigProvider,
    P: Prettifier,
    F: StyleFixer,
{
    match NeovimEditor::for_buffer(nvim, buffer)? {
        Some(mut editor) => bridge.on_will_save(&mut editor).map(Some),
        None => Ok(None),
    }
}
