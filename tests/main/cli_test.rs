//! CLI contract tests for offline subcommands.

use assert_cmd::Command;

fn deskwatch() -> Command {
    let mut cmd = match Command::cargo_bin("deskwatch") {
        Ok(cmd) => cmd,
        Err(err) => panic!("binary should build: {err}"),
    };
    cmd.env("DESKWATCH_CONFIG", "/nonexistent/deskwatch/config.toml")
        .env_remove("DESKWATCH_ROLE")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = match cmd.output() {
        Ok(output) => output,
        Err(err) => panic!("command should run: {err}"),
    };
    assert!(output.status.success(), "command failed: {output:?}");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn inspect_prints_category_and_details() {
    let stdout = stdout_of(deskwatch().args([
        "inspect",
        "[CHAMADO:#45][TITULO:Impressora sem tinta] O técnico João assumiu o chamado.",
    ]));
    assert!(stdout.contains("category: assignment"));
    assert!(stdout.contains("O técnico João assumiu o chamado."));
    assert!(stdout.contains("Chamado: #45"));
    assert!(stdout.contains("Título: Impressora sem tinta"));
    assert!(stdout.contains("Técnico: João"));
}

#[test]
fn inspect_json_respects_role_flag() {
    let stdout = stdout_of(deskwatch().args([
        "--role",
        "manager",
        "inspect",
        "--json",
        "Relatório semanal de SLA",
    ]));
    let value: serde_json::Value = match serde_json::from_str(&stdout) {
        Ok(value) => value,
        Err(err) => panic!("inspect --json should print JSON: {err}"),
    };
    assert_eq!(value["category"], "report");
    assert!(value.get("ticket_id").is_none());
}

#[test]
fn list_without_token_fails() {
    let output = deskwatch()
        .args(["list"])
        .env_remove("DESKWATCH_TOKEN")
        .current_dir(std::env::temp_dir())
        .output();
    let output = match output {
        Ok(output) => output,
        Err(err) => panic!("command should run: {err}"),
    };
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("DESKWATCH_TOKEN"));
}
