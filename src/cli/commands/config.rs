//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{WsforgeError, WsforgeResult};
use console::style;

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> WsforgeResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> WsforgeResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("!").yellow(),
            path.display()
        );
        return Ok(());
    }

    let config = Config::default();
    manager.save(&config).await?;

    println!(
        "{} Configuration initialized at {}",
        style("✓").green(),
        path.display()
    );

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> WsforgeResult<()> {
    let mut config = config.clone();

    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["workspace", "name"] => config.workspace.name = value.to_string(),
        ["workspace", "owner"] => config.workspace.owner = value.to_string(),

        ["repo", "name"] => config.repo.name = value.to_string(),
        ["repo", "custom_url"] => config.repo.custom_url = value.to_string(),

        ["cache", "registry"] => config.cache.registry = value.to_string(),
        ["cache", "insecure"] => config.cache.insecure = parse_bool(value)?,
        ["cache", "credentials_file"] => config.cache.credentials_file = value.to_string(),

        ["builder", "image"] => config.builder.image = value.to_string(),
        ["builder", "fallback_image"] => config.builder.fallback_image = value.to_string(),

        ["agent", "access_url"] => config.agent.access_url = value.to_string(),
        ["agent", "init_script"] => config.agent.init_script = value.to_string(),

        _ => {
            eprintln!("{} Unknown config key: {}", style("✗").red(), key);
            eprintln!("Valid keys:");
            print_valid_keys();
            return Ok(());
        }
    }

    manager.save(&config).await?;
    println!("{} Set {} = {}", style("✓").green(), key, value);

    Ok(())
}

fn parse_bool(value: &str) -> WsforgeResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(WsforgeError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn print_valid_keys() {
    let keys = [
        "workspace.name",
        "workspace.owner",
        "repo.name",
        "repo.custom_url",
        "cache.registry",
        "cache.insecure",
        "cache.credentials_file",
        "builder.image",
        "builder.fallback_image",
        "agent.access_url",
        "agent.init_script",
    ];

    for key in keys {
        eprintln!("  {}", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_forms() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
