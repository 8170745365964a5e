//! --status and --reset-state behavior against the real binary

mod common;

use common::TestTarget;
use predicates::prelude::*;

#[test]
fn test_status_on_fresh_target_shows_all_pending() {
    let target = TestTarget::new();
    target
        .command()
        .arg("--status")
        .assert()
        .success()
        .stdout(predicate::str::contains("system-packages"))
        .stdout(predicate::str::contains("motor-service"))
        .stdout(predicate::str::contains("pending"))
        .stdout(predicate::str::contains("0 of 8 steps completed"));
}

#[test]
fn test_status_reports_seeded_completions() {
    let target = TestTarget::new();
    target.seed_state(&[
        ("system-packages", "2026-08-01T10:00:00Z"),
        ("audio", "2026-08-01T10:05:00Z"),
    ]);

    target
        .command()
        .arg("--status")
        .assert()
        .success()
        .stdout(predicate::str::contains("completed 2026-08-01T10:00:00Z"))
        .stdout(predicate::str::contains("2 of 8 steps completed"));
}

#[test]
fn test_status_warns_on_corrupt_state_file() {
    let target = TestTarget::new();
    std::fs::write(target.state_dir.join("state.json"), "{ not json").unwrap();

    target
        .command()
        .arg("--status")
        .assert()
        .success()
        .stderr(predicate::str::contains("not valid JSON"))
        .stdout(predicate::str::contains("0 of 8 steps completed"));
}

#[test]
fn test_reset_state_clears_completions() {
    let target = TestTarget::new();
    target.seed_state(&[("audio", "2026-08-01T10:05:00Z")]);

    target
        .command()
        .arg("--reset-state")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completion state cleared"));

    assert_eq!(target.state_json().trim(), "{}");

    target
        .command()
        .arg("--status")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 8 steps completed"));
}

#[test]
fn test_reset_state_on_empty_store_succeeds() {
    let target = TestTarget::new();
    target
        .command()
        .arg("--reset-state")
        .assert()
        .success();
}
