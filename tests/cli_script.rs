mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn wallet_cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("wallet_cli").unwrap();
    cmd.env("WALLET_CORE_CLI_SCRIPT", "1")
        .env("WALLET_CORE_HOME", home)
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = common::temp_base();
    let input = "income 250\n\
                 expense \"Movie night\" 30 Entertainment 2024-01-05\n\
                 balance\n\
                 list\n\
                 exit\n";

    wallet_cli(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Income Added: Added 250 to your wallet balance."))
        .stdout(contains("Expense Added: Added Movie night to your expenses."))
        .stdout(contains("$5,220.00"))
        .stdout(contains("January 5, 2024"))
        .stdout(contains("Page 1 of 1"));

    let snapshot = std::fs::read_to_string(home.join("state").join("expenseTrackerState.json")).unwrap();
    assert!(snapshot.contains("\"walletBalance\":5220"));
}

#[test]
fn state_persists_between_runs() {
    let home = common::temp_base();
    wallet_cli(&home)
        .write_stdin("expense Groceries 120 Food 2024-02-01\n")
        .assert()
        .success();

    wallet_cli(&home)
        .write_stdin("top\nbreakdown\n")
        .assert()
        .success()
        .stdout(contains("Top Expenses"))
        .stdout(contains("Food"))
        .stdout(contains("100%"));
}

#[test]
fn rejections_are_reported_and_shell_continues() {
    let home = common::temp_base();
    wallet_cli(&home)
        .write_stdin("expense Boat 9000 Travel 2024-01-01\ndelete 12345\nexpnse\nbalance\n")
        .assert()
        .success()
        .stdout(contains("Expense amount exceeds wallet balance!"))
        .stdout(contains("No expense with id #12345."))
        .stdout(contains("Did you mean `expense`?"))
        .stdout(contains("$5,000.00"));
}

#[test]
fn empty_ledger_shows_placeholders() {
    let home = common::temp_base();
    wallet_cli(&home)
        .write_stdin("list\nbreakdown\n")
        .assert()
        .success()
        .stdout(contains("No transactions yet. Add an expense to get started."))
        .stdout(contains("No Data"))
        .stdout(contains("\u{1b}[").not());
}
