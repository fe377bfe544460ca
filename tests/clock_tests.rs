use predicates::str::contains;

mod common;
use common::{rti, setup_home, setup_test_db};

#[test]
fn test_full_clock_cycle_with_forced_zero_entry() {
    let home = setup_home("clock_cycle");
    let db = setup_test_db(&home);

    rti(&home)
        .args(["--db", &db, "in"])
        .assert()
        .success()
        .stdout(contains("Clocked in"));

    rti(&home)
        .args(["--db", &db, "status"])
        .assert()
        .success()
        .stdout(contains("working"));

    rti(&home)
        .args(["--db", &db, "break"])
        .assert()
        .success()
        .stdout(contains("Break started"));

    rti(&home)
        .args(["--db", &db, "status"])
        .assert()
        .success()
        .stdout(contains("on break"));

    rti(&home)
        .args(["--db", &db, "resume"])
        .assert()
        .success()
        .stdout(contains("Back to work"));

    // a few seconds of work round down to zero: decline the prompt
    rti(&home)
        .args(["--db", &db, "out"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("session is still active"));

    rti(&home)
        .args(["--db", &db, "status"])
        .assert()
        .success()
        .stdout(contains("working"));

    rti(&home)
        .args(["--db", &db, "out", "--force", "--rate", "1200"])
        .assert()
        .success()
        .stdout(contains("Clocked out"))
        .stdout(contains("= 0"));

    rti(&home)
        .args(["--db", &db, "status"])
        .assert()
        .success()
        .stdout(contains("No active session"));

    rti(&home)
        .args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("[timer]"));
}

#[test]
fn test_double_clock_in_is_rejected() {
    let home = setup_home("double_in");
    let db = setup_test_db(&home);

    rti(&home).args(["--db", &db, "in"]).assert().success();

    rti(&home)
        .args(["--db", &db, "in"])
        .assert()
        .failure()
        .stderr(contains("Cannot clock in while working"));
}

#[test]
fn test_actions_without_session_are_rejected() {
    let home = setup_home("no_session");
    let db = setup_test_db(&home);

    rti(&home)
        .args(["--db", &db, "break"])
        .assert()
        .failure()
        .stderr(contains("no session is active"));

    rti(&home)
        .args(["--db", &db, "out", "--force"])
        .assert()
        .failure()
        .stderr(contains("Cannot clock out"));
}

#[test]
fn test_resume_while_working_is_rejected() {
    let home = setup_home("resume_working");
    let db = setup_test_db(&home);

    rti(&home).args(["--db", &db, "in"]).assert().success();

    rti(&home)
        .args(["--db", &db, "resume"])
        .assert()
        .failure()
        .stderr(contains("Cannot end a break while working"));
}

#[test]
fn test_negative_rate_is_rejected_on_clock_out() {
    let home = setup_home("negative_rate_out");
    let db = setup_test_db(&home);

    rti(&home).args(["--db", &db, "in"]).assert().success();

    rti(&home)
        .args(["--db", &db, "out", "--force", "--rate=-5"])
        .assert()
        .failure()
        .stderr(contains("Invalid hourly rate"));
}

#[test]
fn test_watch_without_session_returns_immediately() {
    let home = setup_home("watch_idle");
    let db = setup_test_db(&home);

    rti(&home)
        .args(["--db", &db, "watch"])
        .assert()
        .success()
        .stdout(contains("No active session to watch"));
}
