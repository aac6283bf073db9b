use assert_cmd::Command;

#[test]
fn help_lists_subcommands() {
    let output = Command::cargo_bin("ragseed-cli")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("verify"));
    assert!(stdout.contains("report"));
}

#[test]
fn missing_subcommand_fails() {
    Command::cargo_bin("ragseed-cli").unwrap().assert().failure();
}

#[test]
fn unsupported_environment_exits_non_zero() {
    Command::cargo_bin("ragseed-cli")
        .unwrap()
        .env("RAGSEED_ENV", "qa")
        .arg("report")
        .assert()
        .failure();
}
