//! Integration tests for wsforge

mod lifecycle;

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use serial_test::serial;

    fn wsforge() -> Command {
        cargo_bin_cmd!("wsforge")
    }

    #[test]
    fn help_displays() {
        wsforge()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("workspace provisioner"));
    }

    #[test]
    fn version_displays() {
        wsforge()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("wsforge"));
    }

    #[test]
    #[serial]
    fn config_path() {
        wsforge()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    #[serial]
    fn config_show_lists_sections() {
        wsforge()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("[workspace]").and(predicate::str::contains("[cache]")),
            );
    }

    #[test]
    #[serial]
    fn down_without_workspace_fails_with_hint() {
        let temp = tempfile::TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[workspace]\nname = \"never-provisioned-ws\"\n",
        )
        .unwrap();

        wsforge()
            .args(["--config", config_path.to_str().unwrap(), "down"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No workspace has been provisioned"));
    }

    #[test]
    #[serial]
    fn status_reports_missing_workspace() {
        let temp = tempfile::TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[workspace]\nname = \"never-provisioned-ws\"\n",
        )
        .unwrap();

        wsforge()
            .args(["--config", config_path.to_str().unwrap(), "status"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No workspace provisioned"));
    }
}
