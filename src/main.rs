use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use standard_formatter::bridge::{Bridge, FormatOptions};
use standard_formatter::config::{ConfigProvider, FileConfig};
use standard_formatter::editor::Editor;
use standard_formatter::editor::memory::MemoryBuffer;
use standard_formatter::editor::neovim::connection::Target;
use standard_formatter::transform::{Pipeline, node::NodeAdapter};
use standard_formatter::{host, logging, style};

type NodeBridge = Bridge<FileConfig, NodeAdapter, NodeAdapter>;

#[derive(Parser)]
#[command(name = "standard-formatter")]
#[command(about = "Format JavaScript with standard/semistandard from Neovim", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Attach to a running Neovim and serve the save hooks and command
    Attach {
        /// Neovim server address; defaults to $NVIM, then the parent's stdio
        #[arg(long)]
        socket: Option<PathBuf>,
    },
    /// Format files on disk
    Fix {
        /// Files to format
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

/// Handle the 'attach' command
fn handle_attach(bridge: &NodeBridge, socket: Option<PathBuf>) -> anyhow::Result<()> {
    let target = socket
        .or_else(|| std::env::var_os("NVIM").map(PathBuf::from))
        .map(Target::Socket)
        .unwrap_or(Target::Parent);

    host::run(&target, bridge)
}

/// Handle the 'fix' command
fn handle_fix(bridge: &NodeBridge, paths: Vec<PathBuf>) -> anyhow::Result<()> {
    for path in paths {
        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?;

        let config = bridge.config();
        let style = style::resolve_style(&config, &path);
        if !bridge.is_eligible(&path, &config, style) {
            println!("skipped {}", path.display());
            continue;
        }

        let mut buffer = MemoryBuffer::open(&path)?;
        bridge.format_operation(
            Some(&mut buffer),
            style,
            FormatOptions {
                selection_only: false,
            },
        )?;

        if buffer.is_modified()? {
            buffer.save()?;
            println!("fixed {}", path.display());
        } else {
            println!("unchanged {}", path.display());
        }
    }

    Ok(())
}

/// Handle the 'config' command
fn handle_config(config: &FileConfig) -> anyhow::Result<()> {
    let effective = config.load()?;
    println!("# {}", config.path().display());
    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let config = FileConfig::discover()?;
    if let Commands::Config = cli.command {
        return handle_config(&config);
    }

    let node = NodeAdapter::new(config.snapshot().node_path);
    let bridge = Bridge::new(config, Pipeline::new(node.clone(), node));

    match cli.command {
        Commands::Attach { socket } => handle_attach(&bridge, socket)?,
        Commands::Fix { paths } => handle_fix(&bridge, paths)?,
        Commands::Config => {}
    }

    Ok(())
}
