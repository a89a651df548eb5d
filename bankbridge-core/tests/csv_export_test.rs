//! CSV export integration tests
//!
//! Exercise the exporter against a real temporary directory: file naming,
//! header layout, sign canonicalization, and same-day overwrite behavior.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use bankbridge_core::services::CsvExporter;
use bankbridge_core::{AccountDirectory, AccountEntry, Counterparty, Direction, Transaction};

fn directory() -> AccountDirectory {
    let mut entries = HashMap::new();
    entries.insert(
        "LI0001".to_string(),
        AccountEntry {
            name: "A/S Test".to_string(),
            bank_account: None,
            code: None,
        },
    );
    AccountDirectory::new(entries)
}

fn transaction(amount: Decimal, direction: Direction) -> Transaction {
    Transaction {
        value_date: NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
        amount,
        currency: "CHF".to_string(),
        direction,
        creditor: Some(Counterparty {
            name: Some("Acme GmbH".to_string()),
            account_number: Some("DE0001".to_string()),
        }),
        debitor: Some(Counterparty {
            name: None,
            account_number: Some("LI0001".to_string()),
        }),
        reference: None,
    }
}

#[test]
fn export_file_name_is_sanitized_and_dated() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = CsvExporter::new(dir.path().join("output"), directory());

    let path = exporter
        .write(&[transaction(Decimal::new(100, 2), Direction::Incoming)], "A/S Test")
        .unwrap();

    let expected = format!("A_S_Test_{}.csv", Local::now().format("%Y-%m-%d"));
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), expected);
    assert!(path.exists());
}

#[test]
fn export_writes_header_and_canonicalized_amounts() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = CsvExporter::new(dir.path(), directory());

    // Outgoing reported positive by the bank, incoming reported negative
    let transactions = vec![
        transaction(Decimal::new(5000, 2), Direction::Outgoing),
        transaction(Decimal::new(-125, 2), Direction::Incoming),
    ];
    let path = exporter.write(&transactions, "A/S Test").unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();

    assert_eq!(
        lines.next().unwrap(),
        "Date,Description,Amount,Currency,Debitor Account,Creditor Name,Merchant Name"
    );

    let outgoing = lines.next().unwrap();
    assert!(outgoing.contains("Payment to Acme GmbH"));
    assert!(outgoing.contains("-50.00"));

    let incoming = lines.next().unwrap();
    assert!(incoming.contains("Received from A/S Test"));
    assert!(incoming.contains(",1.25,"));

    assert!(lines.next().is_none());
}

#[test]
fn export_creates_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let exporter = CsvExporter::new(&nested, directory());

    exporter
        .write(&[transaction(Decimal::new(100, 2), Direction::Incoming)], "Acme")
        .unwrap();
    assert!(nested.exists());
}

#[test]
fn export_same_day_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = CsvExporter::new(dir.path(), directory());

    let first = exporter
        .write(
            &[
                transaction(Decimal::new(100, 2), Direction::Incoming),
                transaction(Decimal::new(200, 2), Direction::Incoming),
            ],
            "A/S Test",
        )
        .unwrap();
    let second = exporter
        .write(&[transaction(Decimal::new(300, 2), Direction::Incoming)], "A/S Test")
        .unwrap();

    assert_eq!(first, second);
    let content = std::fs::read_to_string(&second).unwrap();
    // Header plus exactly the single row of the second run
    assert_eq!(content.lines().count(), 2);
}
