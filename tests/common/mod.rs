#![allow(dead_code)]

use std::sync::Arc;

use assert_cmd::Command;
use chrono::{NaiveDate, NaiveDateTime};
use expense_ledger::{
    config::Config,
    core::{clock::FixedClock, ExpenseTracker},
    storage::JsonStorage,
};
use tempfile::TempDir;

pub const BIN_NAME: &str = "expense_ledger_cli";

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .expect("valid timestamp")
}

/// Tracker rooted in `home` with the default file names and a controllable clock.
pub fn tracker_in(home: &TempDir, start: NaiveDateTime) -> (ExpenseTracker, Arc<FixedClock>) {
    let config = Config::default().resolved(home.path());
    let clock = Arc::new(FixedClock::new(start));
    let tracker = ExpenseTracker::open_with(&config, Box::new(JsonStorage), clock.clone())
        .expect("open tracker");
    (tracker, clock)
}

/// Binary invocation in script mode with an isolated data directory.
pub fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("EXPENSE_LEDGER_CLI_SCRIPT", "1")
        .env("EXPENSE_LEDGER_HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}
