//! Neovim connection management.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use crate::constants::NEOVIM_RPC_TIMEOUT;
use anyhow::{Context, Result};
use neovim_lib::{Neovim, NeovimApi, Session, Value};

/// Where to reach the Neovim instance
#[derive(Debug, Clone)]
pub enum Target {
    /// Server address (`--listen` socket or `$NVIM`)
    Socket(PathBuf),
    /// Parent process stdio, when started through `jobstart(..., { rpc = true })`
    Parent,
}

/// Notifications sent by Neovim: method name and arguments
pub type Notifications = Receiver<(String, Vec<Value>)>;

/// Connect to Neovim and start receiving notifications on a channel
pub fn connect(target: &Target) -> Result<(Neovim, Notifications)> {
    let mut session = match target {
        Target::Socket(path) => {
            Session::new_unix_socket(path).context("Failed to connect to Neovim socket")?
        }
        Target::Parent => Session::new_parent().context("Failed to attach to parent Neovim")?,
    };
    session.set_timeout(NEOVIM_RPC_TIMEOUT);
    let notifications = session.start_event_loop_channel();
    Ok((Neovim::new(session), notifications))
}

/// RPC channel id Neovim assigned to this connection
pub fn channel_id(nvim: &mut Neovim) -> Result<i64> {
    let info = nvim.get_api_info().context("Failed to get API info")?;
    info.first()
        .and_then(Value::as_i64)
        .context("API info did not contain a channel id")
}
