use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "pocketbook";

fn pocketbook(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("POCKETBOOK_DATA_DIR", home.path());
    cmd.env_remove("POCKETBOOK_LOG");
    cmd
}

fn run(home: &TempDir, args: &[&str]) {
    pocketbook(home).args(args).assert().success();
}

#[test]
fn cli_without_command_prints_hint() {
    let home = TempDir::new().unwrap();
    pocketbook(&home)
        .assert()
        .success()
        .stdout(contains("pocketbook --help"));
}

#[test]
fn cli_expense_updates_wallet_list() {
    let home = TempDir::new().unwrap();
    run(&home, &["wallet", "add", "Dompet", "--balance", "100000"]);
    run(&home, &["category", "add", "Makan", "-t", "expense"]);
    run(&home, &["txn", "add", "Dompet", "Makan", "30000", "-n", "nasi padang"]);

    pocketbook(&home)
        .args(["wallet", "list"])
        .assert()
        .success()
        .stdout(contains("Dompet").and(contains("Rp 70.000")));

    pocketbook(&home)
        .args(["txn", "list", "-q", "padang"])
        .assert()
        .success()
        .stdout(contains("-Rp 30.000"));
}

#[test]
fn cli_transfer_rejects_insufficient_funds() {
    let home = TempDir::new().unwrap();
    run(&home, &["wallet", "add", "A", "--balance", "100"]);
    run(&home, &["wallet", "add", "B"]);

    pocketbook(&home)
        .args(["transfer", "A", "B", "999999"])
        .assert()
        .failure()
        .stderr(contains("Insufficient funds"));

    pocketbook(&home)
        .args(["wallet", "show", "A"])
        .assert()
        .success()
        .stdout(contains("Rp 100"));
}

#[test]
fn cli_transfer_and_summary() {
    let home = TempDir::new().unwrap();
    run(&home, &["wallet", "add", "A", "--balance", "50000"]);
    run(&home, &["wallet", "add", "B", "-t", "bank"]);
    run(&home, &["transfer", "A", "B", "20000", "-n", "tabungan"]);

    pocketbook(&home)
        .args(["summary"])
        .assert()
        .success()
        .stdout(contains("Transfers out").and(contains("Rp 20.000")));

    pocketbook(&home)
        .args(["check"])
        .assert()
        .success()
        .stdout(contains("consistent"));
}

#[test]
fn cli_export_import_round_trip() {
    let home = TempDir::new().unwrap();
    run(&home, &["wallet", "add", "Cash", "--balance", "75000"]);
    let backup = home.path().join("backup.json");
    run(&home, &["export", "json", backup.to_str().unwrap()]);

    let other = TempDir::new().unwrap();
    pocketbook(&other)
        .args(["import", backup.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Wallets:      1"));

    pocketbook(&other)
        .args(["wallet", "list"])
        .assert()
        .success()
        .stdout(contains("Cash").and(contains("Rp 75.000")));
}

#[test]
fn cli_reset_requires_confirmation() {
    let home = TempDir::new().unwrap();
    run(&home, &["wallet", "add", "Cash"]);

    pocketbook(&home)
        .args(["reset", "all"])
        .assert()
        .success()
        .stdout(contains("--yes"));
    pocketbook(&home)
        .args(["wallet", "list"])
        .assert()
        .success()
        .stdout(contains("Cash"));

    run(&home, &["reset", "all", "--yes"]);
    pocketbook(&home)
        .args(["wallet", "list"])
        .assert()
        .success()
        .stdout(contains("No wallets found."));
}

#[test]
fn cli_unknown_wallet_fails() {
    let home = TempDir::new().unwrap();
    pocketbook(&home)
        .args(["wallet", "show", "Nowhere"])
        .assert()
        .failure()
        .stderr(contains("Wallet not found: Nowhere"));
}
