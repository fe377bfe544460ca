use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rpaylogger::db::store::LocalStore;

mod common;
use common::{add_entry, rti, setup_home, setup_test_db};

#[test]
fn test_add_prices_tiers_and_lists_entries() {
    let home = setup_home("add_list");
    let db = setup_test_db(&home);

    // 450 regular minutes
    add_entry(&home, &db, "2025-09-01", "09:00", "17:00", "30");
    // 480 regular + 120 OT1 + 60 OT2
    add_entry(&home, &db, "2025-09-15", "08:00", "19:00", "0");

    rti(&home)
        .args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("2025-09-01"))
        .stdout(contains("7500"))
        .stdout(contains("12350"))
        .stdout(contains("2 entries"));

    rti(&home)
        .args(["--db", &db, "list", "--period", "2025-09-15"])
        .assert()
        .success()
        .stdout(contains("12350"))
        .stdout(contains("2025-09-01").not());
}

#[test]
fn test_add_overnight_and_break_window() {
    let home = setup_home("add_overnight");
    let db = setup_test_db(&home);

    add_entry(&home, &db, "2025-10-03", "22:00", "06:00", "0");

    rti(&home)
        .args([
            "--db",
            &db,
            "add",
            "2025-10-04",
            "--in",
            "09:00",
            "--out",
            "18:00",
            "--break-start",
            "12:00",
            "--break-end",
            "12:45",
            "--rate",
            "1000",
            "--note",
            "client visit",
        ])
        .assert()
        .success()
        .stdout(contains("= 8335"));

    let logs = LocalStore::open(&db).unwrap().load_logs().unwrap();
    assert_eq!(logs.len(), 2);

    let overnight = logs.iter().find(|l| l.start_time == "22:00").unwrap();
    assert_eq!(overnight.total_minutes, 480);
    assert_eq!(overnight.total_pay, 8000);

    let day = logs.iter().find(|l| l.start_time == "09:00").unwrap();
    assert_eq!(day.break_minutes, 45);
    assert_eq!(day.regular_minutes, 480);
    assert_eq!(day.overtime_level1_minutes, 15);
    assert_eq!(day.note.as_deref(), Some("client visit"));
}

#[test]
fn test_add_rejects_zero_duration_and_bad_input() {
    let home = setup_home("add_invalid");
    let db = setup_test_db(&home);

    rti(&home)
        .args([
            "--db", &db, "add", "2025-09-01", "--in", "09:00", "--out", "09:30", "--break", "30",
        ])
        .assert()
        .failure()
        .stderr(contains("No payable time"));

    rti(&home)
        .args(["--db", &db, "add", "2025-13-01", "--in", "09:00", "--out", "17:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    rti(&home)
        .args(["--db", &db, "add", "2025-09-01", "--in", "9h", "--out", "17:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));

    rti(&home)
        .args([
            "--db", &db, "add", "2025-09-01", "--in", "09:00", "--out", "17:00", "--rate=-1",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid hourly rate"));

    let logs = LocalStore::open(&db).unwrap().load_logs().unwrap();
    assert!(logs.is_empty());
}

#[test]
fn test_summary_daily_and_monthly() {
    let home = setup_home("summary");
    let db = setup_test_db(&home);

    add_entry(&home, &db, "2025-09-01", "09:00", "17:00", "30");
    add_entry(&home, &db, "2025-09-01", "18:00", "20:00", "0");
    add_entry(&home, &db, "2025-10-02", "08:00", "19:00", "0");

    // 7500 + 2000 on the first day
    rti(&home)
        .args(["--db", &db, "summary"])
        .assert()
        .success()
        .stdout(contains("Daily summary"))
        .stdout(contains("9500"))
        .stdout(contains("12350"));

    rti(&home)
        .args(["--db", &db, "summary", "--monthly"])
        .assert()
        .success()
        .stdout(contains("September 2025"))
        .stdout(contains("October 2025"))
        .stdout(contains("2 (1 days)"));

    rti(&home)
        .args(["--db", &db, "summary", "--period", "2024"])
        .assert()
        .success()
        .stdout(contains("No work logs found"));
}

#[test]
fn test_delete_by_id_prefix() {
    let home = setup_home("delete");
    let db = setup_test_db(&home);

    add_entry(&home, &db, "2025-09-01", "09:00", "17:00", "30");
    add_entry(&home, &db, "2025-09-02", "09:00", "17:00", "30");

    let logs = LocalStore::open(&db).unwrap().load_logs().unwrap();
    let victim = logs.iter().find(|l| l.date_str() == "2025-09-01").unwrap();
    let prefix = &victim.id[..8];

    // declined
    rti(&home)
        .args(["--db", &db, "del", prefix])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    rti(&home)
        .args(["--db", &db, "del", prefix, "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    let logs = LocalStore::open(&db).unwrap().load_logs().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].date_str(), "2025-09-02");

    rti(&home)
        .args(["--db", &db, "del", prefix, "--yes"])
        .assert()
        .failure()
        .stderr(contains("No work log found"));
}
