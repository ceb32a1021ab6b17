//! Logging setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a `tracing` subscriber writing to stderr.
///
/// stdout may be the RPC channel to Neovim, so nothing is ever logged there.
/// The level comes from `RUST_LOG`, defaulting to `standard_formatter=info`.
pub fn init() -> anyhow::Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("standard_formatter=info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
