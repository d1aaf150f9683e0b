mod common;

use std::fs;

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

use common::{cli, fast_home, ledger_path};

#[test]
fn script_mode_lists_seeded_accounts() {
    let home = fast_home();
    cli(&home)
        .write_stdin("accounts\nexit\n")
        .assert()
        .success()
        .stdout(contains("SBI Bank").and(contains("₹45,200.50")));
    assert!(ledger_path(&home).exists(), "seed is persisted on first run");
}

#[test]
fn recorded_transaction_survives_restart() {
    let home = fast_home();
    cli(&home)
        .write_stdin("tx-add expense 250 p3 a1 \"Corner Cafe\"\nexit\n")
        .assert()
        .success()
        .stdout(contains("Recorded Corner Cafe -₹250.00"));

    let json = fs::read_to_string(ledger_path(&home)).unwrap();
    assert!(json.contains("\"Corner Cafe\""));

    cli(&home)
        .write_stdin("transactions cafe\n")
        .assert()
        .success()
        .stdout(contains("Corner Cafe"));
}

#[test]
fn mode_switch_filters_accounts() {
    let home = fast_home();
    cli(&home)
        .write_stdin("mode business\naccounts\n")
        .assert()
        .success()
        .stdout(
            contains("Switched to Business mode.")
                .and(contains("Axis Business"))
                .and(contains("SBI Bank").not()),
        );
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = fast_home();
    cli(&home)
        .write_stdin("acounts\n")
        .assert()
        .success()
        .stderr(contains("Unknown command `acounts`"))
        .stdout(contains("Did you mean `accounts`?"));
}

#[test]
fn invalid_amount_is_reported_without_aborting() {
    let home = fast_home();
    cli(&home)
        .write_stdin("tx-add expense abc p3 a1 Shop\ntx-add expense -5 p3 a1 Shop\nversion\n")
        .assert()
        .success()
        .stderr(
            contains("`abc` is not a valid amount")
                .and(contains("amount must be greater than zero")),
        )
        .stdout(contains("Payment Trackers"));
}

#[test]
fn sync_credits_interest_to_first_account() {
    let home = fast_home();
    cli(&home)
        .write_stdin("sync\ntransactions interest\n")
        .assert()
        .success()
        .stdout(contains("Bank Interest Accrual").and(contains("credited to SBI Bank")));
}

#[test]
fn subscribe_runs_the_checkout() {
    let home = fast_home();
    cli(&home)
        .write_stdin("plans yearly\nsubscribe pro asha@okbank --yearly\n")
        .assert()
        .success()
        .stdout(
            contains("₹4,999/yr")
                .and(contains("Payment successful. Welcome to Pro (yearly).")),
        );
}

#[test]
fn subscribe_rejects_upi_without_handle() {
    let home = fast_home();
    cli(&home)
        .write_stdin("subscribe basic asha\n")
        .assert()
        .success()
        .stderr(contains("Please enter a valid UPI ID"))
        .stdout(contains("Payment successful").not());
}

#[test]
fn backup_is_listed() {
    let home = fast_home();
    cli(&home)
        .write_stdin("backup before-import\nbackups\n")
        .assert()
        .success()
        .stdout(contains("Backup created: payment_trackers_v3_").and(contains("before-import")));
}

#[test]
fn reset_restores_demo_data_in_script_mode() {
    let home = fast_home();
    cli(&home)
        .write_stdin("account-delete a1\nreset\naccounts\n")
        .assert()
        .success()
        .stdout(
            contains("Removed SBI Bank")
                .and(contains("Data reset to the demo data set."))
                .and(contains("SBI Bank ••4421")),
        );
}

#[test]
fn corrupt_document_falls_back_to_demo_data() {
    let home = fast_home();
    let path = ledger_path(&home);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not json").unwrap();

    cli(&home)
        .write_stdin("accounts\n")
        .assert()
        .success()
        .stderr(contains("Starting from demo data"))
        .stdout(contains("HDFC Bank"));
    assert!(home.join("data").join("payment_trackers_v3_corrupt.json").exists());
}

#[test]
fn backdated_transaction_is_listed_first() {
    let home = fast_home();
    cli(&home)
        .write_stdin("tx-add expense 10 p3 a1 \"Old Shop\" --date 2020-01-01\ntransactions --limit 1\n")
        .assert()
        .success()
        .stdout(contains("01 Jan 2020").and(contains("Showing 1 of")));
}

#[test]
fn login_without_name_uses_demo_user() {
    let home = fast_home();
    cli(&home)
        .write_stdin("login asha@example.in\nprofile\n")
        .assert()
        .success()
        .stdout(contains("Welcome, Demo User.").and(contains("asha@example.in")));
}
