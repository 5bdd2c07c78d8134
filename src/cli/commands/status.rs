//! Status command - show workspace state and last reported metadata

use crate::cli::args::{OutputFormat, StatusArgs};
use crate::config::Config;
use crate::error::WsforgeResult;
use crate::workspace::WorkspaceRecord;
use console::style;

/// Execute the status command
pub async fn execute(args: StatusArgs, config: &Config) -> WsforgeResult<()> {
    let record = WorkspaceRecord::load(&config.workspace.name).await?;

    match args.format {
        OutputFormat::Json => print_json(record.as_ref())?,
        OutputFormat::Text => print_text(record.as_ref()),
    }

    Ok(())
}

fn print_json(record: Option<&WorkspaceRecord>) -> WsforgeResult<()> {
    match record {
        Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
        None => println!("null"),
    }
    Ok(())
}

fn print_text(record: Option<&WorkspaceRecord>) {
    let Some(record) = record else {
        println!("No workspace provisioned. Run: wsforge up");
        return;
    };

    let state = if record.cardinality.is_running() {
        style("running").green()
    } else {
        style("stopped").yellow()
    };

    println!(
        "Workspace {} ({}): {}",
        style(&record.name).cyan(),
        record.owner,
        state
    );

    if let Some(container) = &record.container_id {
        println!("  container:  {}", &container[..12.min(container.len())]);
    }

    // Metadata is only reported while running; stale facts from the last
    // run are still useful for a stopped workspace, marked as such.
    if let Some(report) = &record.last_report {
        if !record.cardinality.is_running() {
            println!("  last run:");
        }
        println!("{}", report);
    }

    println!("  updated:    {}", record.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
}
