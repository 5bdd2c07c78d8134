//! Up command - transition the workspace to Running

use crate::agent::AgentParams;
use crate::cli::args::UpArgs;
use crate::config::Config;
use crate::error::WsforgeResult;
use crate::identity;
use crate::orchestration::{ContainerRuntime, DockerRuntime};
use crate::workspace::{Reconciler, RepositorySelection, WorkspaceIdentity, WorkspaceRecord};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Execute the up command
pub async fn execute(args: UpArgs, config: &Config) -> WsforgeResult<()> {
    let mut config = config.clone();
    if let Some(repo) = args.repo {
        config.repo.name = repo;
        config.repo.custom_url.clear();
    }
    if let Some(url) = args.repo_url {
        config.repo.custom_url = url;
    }

    let pb = create_progress_bar("Resolving identity...");

    let operator = identity::resolve().await?;
    debug!("Operator: {} <{}>", operator.name, operator.email);

    let owner_login = if config.workspace.owner.is_empty() {
        operator.login.clone()
    } else {
        config.workspace.owner.clone()
    };

    // Stable ids are minted on first provisioning and reused afterwards.
    let mut record = match WorkspaceRecord::load(&config.workspace.name).await? {
        Some(record) => record,
        None => WorkspaceRecord::new(config.workspace.name.clone(), owner_login.clone()),
    };

    let workspace = WorkspaceIdentity {
        owner_name: operator.name.clone(),
        owner_login,
        owner_id: record.owner_id,
        owner_email: operator.email.clone(),
        workspace_name: config.workspace.name.clone(),
        workspace_id: record.workspace_id,
    };

    let repo = RepositorySelection::from_config(&config.repo)?;
    debug!("Repository: {}", repo.url());

    pb.set_message("Checking container runtime...");
    let runtime = DockerRuntime::new();
    if !runtime.is_available().await? {
        pb.finish_and_clear();
        return Err(crate::error::WsforgeError::DockerNotRunning);
    }

    let reconciler = Reconciler::new(&runtime, &config);

    // Unrelated re-runs must not re-provision a live workspace.
    if record.cardinality.is_running() && reconciler.container_exists(&workspace).await? {
        pb.finish_and_clear();
        println!(
            "{} Workspace {} is already running",
            style("!").yellow(),
            style(&record.name).cyan()
        );
        return Ok(());
    }

    pb.set_message("Provisioning workspace...");
    let agent = AgentParams::issue(&config.agent);
    let running = reconciler
        .start(&workspace, &repo, &operator.token, &agent)
        .await?;

    record.mark_running(running.container_id.clone(), running.report.clone());
    record.save().await?;

    pb.finish_and_clear();

    println!(
        "{} Workspace {} is up (container: {})",
        style("✓").green(),
        style(&record.name).cyan(),
        &running.container_id[..12.min(running.container_id.len())]
    );
    println!("{}", running.report);
    println!("  Stop with: wsforge down");

    Ok(())
}

fn create_progress_bar(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
