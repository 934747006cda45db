use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("session_ledger_cli").expect("binary builds");
    cmd.env("SESSION_LEDGER_HOME", home.path());
    cmd.env("SESSION_LEDGER_PLAIN", "1");
    cmd
}

#[test]
fn help_lists_the_commands() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add-week"))
        .stdout(predicate::str::contains("set-payment"));
}

#[test]
fn add_week_then_dashboard_round_trip() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["add-week", "2024-03-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("week1"));

    cli(&home)
        .args(["add-session", "week1", "2024-03-05", "1", "paid", "algebra"])
        .assert()
        .success();

    cli(&home)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total payments made"))
        .stdout(predicate::str::contains("R120"))
        .stdout(predicate::str::contains("week1"));
}

#[test]
fn unknown_week_is_reported_on_stderr() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["set-payment", "week9", "1", "paid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("week9"));
}

#[test]
fn script_mode_reads_commands_from_stdin() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .env("SESSION_LEDGER_CLI_SCRIPT", "1")
        .write_stdin("add-week 2024-03-04\nsummary\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total sessions held"));
}
