//! CLI smoke tests: verify basic binary behavior.

use std::process::Command;

fn cli_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_unicare"))
}

fn say(args: &[&str]) -> serde_json::Value {
    let output = cli_bin()
        .arg("say")
        .args(args)
        .output()
        .expect("failed to run");
    assert!(output.status.success(), "say failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("say prints JSON")
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage"),
        "Expected usage info in --help output"
    );
    assert!(stdout.contains("serve"));
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("unicare"),
        "Expected binary name in --version output"
    );
}

#[test]
fn test_invalid_config_does_not_panic() {
    // A missing config file falls back to defaults
    let output = cli_bin()
        .arg("--config")
        .arg("/tmp/nonexistent_unicare_config_12345.toml")
        .args(["say", "hi"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
}

#[test]
fn test_say_prints_turn() {
    let value = say(&["hi"]);
    assert_eq!(value["reply"], "Hello! How can I support you today?");
    assert_eq!(value["topic"], "greetings");
    assert_eq!(value["user_facts"], serde_json::json!({}));
}

#[test]
fn test_say_threads_state() {
    let value = say(&[
        "yes",
        "--topic",
        "activity",
        "--facts",
        r#"{"name":"Maria","user_id":7}"#,
    ]);
    assert!(value["reply"].as_str().unwrap().starts_with("Great Maria!"));
    assert_eq!(value["topic"], "activity");
    assert_eq!(value["user_facts"]["user_id"], 7);
}

#[test]
fn test_say_rejects_bad_facts() {
    let output = cli_bin()
        .args(["say", "hi", "--facts", "{not json"])
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
}

#[test]
fn test_missing_rule_book_fails() {
    let output = cli_bin()
        .args(["--rules", "/tmp/nonexistent_unicare_rules_12345.toml", "say", "hi"])
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
}
