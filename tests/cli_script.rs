mod common;

use std::fs;

use common::script_command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::tempdir;

#[test]
fn script_mode_adds_expenses_and_prints_report() {
    let home = tempdir().unwrap();
    script_command(&home)
        .write_stdin(
            "add 50 Food \"Grocery shopping\"\nadd 20 Entertainment \"Movie ticket\"\nreport\nexit\n",
        )
        .assert()
        .success()
        .stdout(
            contains("Expense added successfully.")
                .and(contains("Expense Report"))
                .and(contains("Food: $50.00"))
                .and(contains("Entertainment: $20.00"))
                .and(contains("Total: $70.00"))
                .and(contains("Goodbye!")),
        );

    let json = fs::read_to_string(home.path().join("expenses.json")).unwrap();
    assert!(json.contains("\"Grocery shopping\""));
    assert!(json.contains("\"Movie ticket\""));
}

#[test]
fn ledger_survives_between_runs() {
    let home = tempdir().unwrap();
    script_command(&home)
        .write_stdin("1 12.5 Books\nexit\n")
        .assert()
        .success();
    script_command(&home)
        .write_stdin("2\n5\n")
        .assert()
        .success()
        .stdout(contains("Books: $12.50").and(contains("Total: $12.50")));
}

#[test]
fn non_numeric_amount_is_rejected_without_writing() {
    let home = tempdir().unwrap();
    script_command(&home)
        .write_stdin("add twelve Food\nreport\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Invalid amount. Please enter a numeric value.").and(contains("Total: $0.00")),
        );
    assert!(!home.path().join("expenses.json").exists());
}

#[test]
fn monthly_summary_lists_month_then_categories() {
    let home = tempdir().unwrap();
    fs::write(
        home.path().join("expenses.json"),
        r#"[
    {"amount": 10.0, "category": "Food", "description": "", "date": "2024-03-15 10:00:00"},
    {"amount": 2.5, "category": "Food", "description": "", "date": "2024-03-20 10:00:00"},
    {"amount": 7.0, "category": "Fuel", "description": "", "date": "2024-04-01 08:00:00"}
]"#,
    )
    .unwrap();
    script_command(&home)
        .write_stdin("monthly\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("2024-03")
                .and(contains("  Food: $12.50"))
                .and(contains("2024-04"))
                .and(contains("  Fuel: $7.00")),
        );
}

#[test]
fn plot_writes_chart_into_data_dir() {
    let home = tempdir().unwrap();
    script_command(&home)
        .write_stdin("add 9.99 Coffee\nplot\nexit\n")
        .assert()
        .success()
        .stdout(contains("Expense plot saved as"));
    let chart = fs::read_to_string(home.path().join("expenses_by_category.svg")).unwrap();
    assert!(chart.contains("Coffee"));
}

#[test]
fn config_file_controls_paths_and_currency() {
    let home = tempdir().unwrap();
    fs::write(
        home.path().join("config.json"),
        r#"{ "data_file": "books/ledger.json", "currency_symbol": "€" }"#,
    )
    .unwrap();
    script_command(&home)
        .write_stdin("add 3 Tea\nreport\nexit\n")
        .assert()
        .success()
        .stdout(contains("Tea: €3.00"));
    assert!(home.path().join("books").join("ledger.json").exists());
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = tempdir().unwrap();
    script_command(&home)
        .write_stdin("reprot\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Invalid choice. Please try again.").and(contains("Did you mean `report`?")),
        );
}

#[test]
fn help_and_version_print_overview() {
    let home = tempdir().unwrap();
    script_command(&home)
        .write_stdin("help\nversion\nexit\n")
        .assert()
        .success()
        .stdout(contains("Available commands").and(contains("Expense Ledger")));
}

#[test]
fn corrupt_ledger_aborts_with_error() {
    let home = tempdir().unwrap();
    fs::write(home.path().join("expenses.json"), "not json at all").unwrap();
    script_command(&home)
        .write_stdin("report\n")
        .assert()
        .failure()
        .stderr(contains("Error:").and(contains("malformed")));
}

#[test]
fn blank_category_reports_error_and_continues() {
    let home = tempdir().unwrap();
    script_command(&home)
        .write_stdin("add 5 \"  \"\nreport\nexit\n")
        .assert()
        .success()
        .stdout(contains("category is required").and(contains("Total: $0.00")));
}
