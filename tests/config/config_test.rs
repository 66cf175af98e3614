//! Coverage for config parsing, file loading and env overrides.

use std::path::PathBuf;

use deskwatch::config::Config;
use deskwatch::notifications::Role;

fn parse(toml_str: &str) -> Config {
    match Config::from_toml(toml_str) {
        Ok(config) => config,
        Err(err) => panic!("config should parse: {err:#}"),
    }
}

#[test]
fn parse_full_config() {
    let config = parse(
        r#"
[api]
base_url = "https://helpdesk.example.com/api"
timeout_secs = 30
token_env = "HELPDESK_TOKEN"

[portal]
role = "manager"

[logging]
level = "debug"
dir = "/var/log/deskwatch"
"#,
    );
    assert_eq!(config.api.base_url, "https://helpdesk.example.com/api");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.api.token_env, "HELPDESK_TOKEN");
    assert_eq!(config.portal.role, Role::Manager);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.dir, Some(PathBuf::from("/var/log/deskwatch")));
}

#[test]
fn partial_config_keeps_defaults() {
    let config = parse("[portal]\nrole = \"technician\"\n");
    assert_eq!(config.portal.role, Role::Technician);
    assert_eq!(config.api.timeout_secs, 15);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn unknown_role_is_rejected() {
    assert!(Config::from_toml("[portal]\nrole = \"admin\"\n").is_err());
}

#[test]
fn env_overrides_file_values() {
    let mut config = parse("[api]\nbase_url = \"http://from-file/api\"\n");
    config.apply_overrides(|key| match key {
        "DESKWATCH_API_URL" => Some("http://from-env/api".to_owned()),
        "DESKWATCH_ROLE" => Some("gestor".to_owned()),
        "DESKWATCH_LOG_LEVEL" => Some("trace".to_owned()),
        _ => None,
    });
    assert_eq!(config.api.base_url, "http://from-env/api");
    assert_eq!(config.portal.role, Role::Manager);
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn invalid_role_override_is_ignored() {
    let mut config = parse("[portal]\nrole = \"client\"\n");
    config.apply_overrides(|key| match key {
        "DESKWATCH_ROLE" => Some("superuser".to_owned()),
        _ => None,
    });
    assert_eq!(config.portal.role, Role::Client);
}

#[test]
fn load_from_missing_file_uses_defaults() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir should be created: {err}"),
    };
    let result = Config::load_from(&dir.path().join("absent.toml"));
    assert!(result.is_ok());
}

#[test]
fn load_from_file_reads_values_and_reports_bad_toml() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir should be created: {err}"),
    };
    let good = dir.path().join("config.toml");
    let bad = dir.path().join("broken.toml");
    assert!(std::fs::write(&good, "[api]\ntimeout_secs = 3\n").is_ok());
    assert!(std::fs::write(&bad, "this is {{ not toml").is_ok());

    match Config::load_from(&good) {
        Ok(config) => assert_eq!(config.api.timeout_secs, 3),
        Err(err) => panic!("config should load: {err:#}"),
    }
    assert!(Config::load_from(&bad).is_err());
}
