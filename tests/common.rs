#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Command bound to an isolated HOME, so no real config file is read.
pub fn rti(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("rpaylogger");
    cmd.env("HOME", home).env_remove("RPAYLOGGER_LOG");
    cmd
}

/// Fresh temp directory used as HOME for one test
pub fn setup_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpaylogger_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path.to_string_lossy().to_string()
}

/// Database path inside `home`, initialized through the CLI
pub fn setup_test_db(home: &str) -> String {
    let db = PathBuf::from(home).join("test.sqlite");
    let db = db.to_string_lossy().to_string();
    rti(home)
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success();
    db
}

/// Create a temporary output file path inside `home`
pub fn temp_out(home: &str, name: &str, ext: &str) -> String {
    PathBuf::from(home)
        .join(format!("{}.{}", name, ext))
        .to_string_lossy()
        .to_string()
}

/// Write a config file under `home` bound to a directory remote
pub fn write_remote_config(home: &str, db: &str, remote_dir: &str, namespace: &str) {
    let dir = PathBuf::from(home).join(".rpaylogger");
    fs::create_dir_all(&dir).expect("create config dir");
    let yaml = format!(
        "database: {db}\n\
         hourly_rate: 1000\n\
         billing_unit_minutes: 30\n\
         log_level: warn\n\
         remote:\n  \
           kind: dir\n  \
           location: {remote_dir}\n  \
           namespace: {namespace}\n  \
           timeout_secs: 2\n  \
           poll_interval_secs: 1\n"
    );
    fs::write(dir.join("rpaylogger.conf"), yaml).expect("write config");
}

/// Add a manual entry at rate 1000
pub fn add_entry(home: &str, db: &str, date: &str, start: &str, end: &str, brk: &str) {
    rti(home)
        .args([
            "--db", db, "add", date, "--in", start, "--out", end, "--break", brk, "--rate", "1000",
        ])
        .assert()
        .success();
}
