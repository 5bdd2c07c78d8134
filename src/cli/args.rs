//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// wsforge - Remote development workspace provisioner
///
/// Provisions a container-backed development workspace from a repository,
/// reusing prebuilt images from a remote build cache when one is configured.
#[derive(Parser, Debug)]
#[command(name = "wsforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "WSFORGE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the workspace (provision container and volume)
    Up(UpArgs),

    /// Stop the workspace (destroy the container, keep the volume)
    Down(DownArgs),

    /// Show workspace state and last reported metadata
    Status(StatusArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the up command
#[derive(Parser, Debug)]
pub struct UpArgs {
    /// Repository catalog entry to provision from (overrides config)
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Custom repository URL (overrides config and --repo)
    #[arg(long, conflicts_with = "repo")]
    pub repo_url: Option<String>,
}

/// Arguments for the down command
#[derive(Parser, Debug)]
pub struct DownArgs {
    /// Force removal even if a graceful stop fails
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for status
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.registry)
        key: String,
        /// Value to set
        value: String,
    },
}
