mod helpers;

use helpers::{run_cli, DataRoot, EnvGuard};
use serial_test::serial;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("phud.toml");
    std::fs::write(&path, body).expect("write config");
    path.to_string_lossy().into_owned()
}

fn cfg_json() -> serde_json::Value {
    let res = run_cli(&["cfg"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    serde_json::from_str(&res.stdout).expect("cfg prints json")
}

#[test]
#[serial]
fn defaults_are_reported_as_default() {
    let _env = EnvGuard::clean();

    let cfg = cfg_json();

    assert!(cfg["history_dir"]["value"].is_null());
    assert_eq!(cfg["history_dir"]["source"], "default");
    assert_eq!(cfg["require_valid_root"]["value"], true);
    assert_eq!(cfg["log_filter"]["value"], "warn");
    assert_eq!(cfg["workers"]["source"], "default");
}

#[test]
#[serial]
fn file_values_are_applied() {
    let tmp = TempDir::new().expect("temp dir");
    let path = write_config(
        &tmp,
        "history_dir = \"/srv/winamax\"\nworkers = 3\nrequire_valid_root = false\n",
    );
    let _env = EnvGuard::apply(&[("PHUD_CONFIG", path.as_str())]);

    let cfg = cfg_json();

    assert_eq!(cfg["history_dir"]["value"], "/srv/winamax");
    assert_eq!(cfg["history_dir"]["source"], "file");
    assert_eq!(cfg["workers"]["value"], 3);
    assert_eq!(cfg["workers"]["source"], "file");
    assert_eq!(cfg["require_valid_root"]["value"], false);
    assert_eq!(cfg["log_filter"]["source"], "default");
}

#[test]
#[serial]
fn env_overrides_file() {
    let tmp = TempDir::new().expect("temp dir");
    let path = write_config(&tmp, "workers = 3\nlog_filter = \"info\"\n");
    let _env = EnvGuard::apply(&[
        ("PHUD_CONFIG", path.as_str()),
        ("PHUD_WORKERS", "5"),
        ("PHUD_STRICT_ROOT", "off"),
    ]);

    let cfg = cfg_json();

    assert_eq!(cfg["workers"]["value"], 5);
    assert_eq!(cfg["workers"]["source"], "env");
    assert_eq!(cfg["log_filter"]["value"], "info");
    assert_eq!(cfg["log_filter"]["source"], "file");
    assert_eq!(cfg["require_valid_root"]["value"], false);
    assert_eq!(cfg["require_valid_root"]["source"], "env");
}

#[test]
#[serial]
fn empty_env_values_are_ignored() {
    let _env = EnvGuard::apply(&[("PHUD_WORKERS", ""), ("PHUD_LOG", "")]);

    let cfg = cfg_json();

    assert_eq!(cfg["workers"]["source"], "default");
    assert_eq!(cfg["log_filter"]["value"], "warn");
}

#[test]
#[serial]
fn zero_workers_is_rejected() {
    let _env = EnvGuard::apply(&[("PHUD_WORKERS", "0")]);

    let res = run_cli(&["cfg"]);

    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid configuration"), "stderr: {}", res.stderr);
    assert!(res.stdout.is_empty());
}

#[test]
#[serial]
fn unparseable_env_value_is_rejected() {
    let _env = EnvGuard::apply(&[("PHUD_STRICT_ROOT", "maybe")]);

    let res = run_cli(&["cfg"]);

    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("strict root"));
}

#[test]
#[serial]
fn broken_config_file_is_rejected() {
    let tmp = TempDir::new().expect("temp dir");
    let path = write_config(&tmp, "workers = \"many\"\n");
    let _env = EnvGuard::apply(&[("PHUD_CONFIG", path.as_str())]);

    let res = run_cli(&["cfg"]);

    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("cannot parse PHUD_CONFIG"), "stderr: {}", res.stderr);
}

#[test]
#[serial]
fn configured_history_dir_is_used_when_no_dir_is_given() {
    let root = DataRoot::new().with_tables(&["Frankfurt 11"]);
    let root_str = root.path_str();
    let _env = EnvGuard::apply(&[("PHUD_HISTORY_DIR", root_str.as_str())]);

    let validated = run_cli(&["validate"]);
    assert_eq!(validated.exit_code, 0, "stderr: {}", validated.stderr);
    assert!(validated.stdout.contains("with 1 hand history files"));

    let loaded = run_cli(&["load"]);
    assert_eq!(loaded.exit_code, 0, "stderr: {}", loaded.stderr);
    assert!(loaded.stdout.contains("1 cash games"));
}

#[test]
#[serial]
fn strict_root_off_loads_an_incomplete_root() {
    let root = DataRoot::bare();
    std::fs::write(
        root.path()
            .join("history")
            .join(helpers::cash_file_name("Frankfurt 11")),
        helpers::cash_hand("Frankfurt 11", "1-1-1"),
    )
    .expect("write history file");
    let _env = EnvGuard::apply(&[("PHUD_STRICT_ROOT", "false")]);

    let res = run_cli(&["load", "--dir", &root.path_str()]);

    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("1 cash games"));
}
