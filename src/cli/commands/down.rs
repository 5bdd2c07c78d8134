//! Down command - transition the workspace to Stopped

use crate::cli::args::DownArgs;
use crate::config::Config;
use crate::error::WsforgeResult;
use crate::orchestration::{ContainerRuntime, DockerRuntime};
use crate::workspace::{Reconciler, WorkspaceIdentity, WorkspaceRecord};
use console::style;

/// Execute the down command
pub async fn execute(args: DownArgs, config: &Config) -> WsforgeResult<()> {
    let mut record = match WorkspaceRecord::load(&config.workspace.name).await? {
        Some(record) => record,
        None => {
            return Err(crate::error::WsforgeError::WorkspaceNotProvisioned);
        }
    };

    if !record.cardinality.is_running() {
        println!(
            "{} Workspace {} is already stopped",
            style("!").yellow(),
            style(&record.name).cyan()
        );
        return Ok(());
    }

    // Naming only needs the owner login and workspace name; the rest of the
    // identity is irrelevant for teardown.
    let workspace = WorkspaceIdentity {
        owner_name: record.owner.clone(),
        owner_login: record.owner.clone(),
        owner_id: record.owner_id,
        owner_email: String::new(),
        workspace_name: record.name.clone(),
        workspace_id: record.workspace_id,
    };

    let runtime = DockerRuntime::new();
    let reconciler = Reconciler::new(&runtime, config);

    println!("Stopping workspace {}...", style(&record.name).cyan());

    if args.force {
        runtime
            .remove_container(&workspace.container_name())
            .await?;
    } else {
        reconciler.stop(&workspace).await?;
    }

    // The container is gone; the persistent volume stays untouched.
    record.mark_stopped();
    record.save().await?;

    println!(
        "{} Workspace {} stopped (volume preserved)",
        style("✓").green(),
        style(&record.name).cyan()
    );

    Ok(())
}
