//! wsforge - Remote Development Workspace Provisioner
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wsforge::cli::{Cli, Commands};
use wsforge::config::ConfigManager;
use wsforge::error::WsforgeResult;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> WsforgeResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn (spinners only), 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("wsforge=warn"),
        1 => EnvFilter::new("wsforge=info"),
        _ => EnvFilter::new("wsforge=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    let config = manager.load().await?;

    // Ensure state directories exist
    ConfigManager::ensure_state_dirs().await?;

    match cli.command {
        Commands::Up(args) => wsforge::cli::commands::up(args, &config).await,
        Commands::Down(args) => wsforge::cli::commands::down(args, &config).await,
        Commands::Status(args) => wsforge::cli::commands::status(args, &config).await,
        Commands::Config(args) => wsforge::cli::commands::config(args, &config, &manager).await,
    }
}
