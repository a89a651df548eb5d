//! Transaction normalization
//!
//! Projects raw bank transactions into the output shape shared by the CSV
//! exporter and the reporting paths: canonical signed amount plus a
//! human-readable description. Counterparty names are resolved through the
//! account directory.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{AccountDirectory, Direction, Transaction};

/// Output projection of a [`Transaction`]
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedRow {
    pub date: NaiveDate,
    pub description: String,
    /// Canonical signed amount (outgoing negative, incoming positive)
    pub amount: Decimal,
    pub currency: String,
    /// Display name of the debitor account, `"Unknown"` when unmapped
    pub debitor_name: String,
    pub creditor_name: Option<String>,
    pub merchant_name: Option<String>,
}

/// Maps raw transactions to [`NormalizedRow`]s
pub struct Normalizer<'a> {
    directory: &'a AccountDirectory,
}

impl<'a> Normalizer<'a> {
    pub fn new(directory: &'a AccountDirectory) -> Self {
        Self { directory }
    }

    pub fn normalize(&self, tx: &Transaction) -> NormalizedRow {
        let merchant_name = tx.creditor_name().map(str::to_string);
        let debitor_name = self
            .directory
            .display_name(tx.debitor_account().unwrap_or_default())
            .to_string();

        let description = match tx.direction {
            Direction::Outgoing => format!(
                "Payment to {}",
                tx.creditor_name().unwrap_or(AccountDirectory::UNKNOWN)
            ),
            Direction::Incoming => format!("Received from {}", debitor_name),
            Direction::Unknown => "Unknown transaction".to_string(),
        };

        NormalizedRow {
            date: tx.value_date,
            description,
            amount: tx.signed_amount(),
            currency: tx.currency.clone(),
            debitor_name,
            creditor_name: merchant_name.clone(),
            merchant_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::{AccountEntry, Counterparty};

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

    fn transaction(direction: Direction) -> Transaction {
        Transaction {
            value_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            amount: Decimal::new(15000, 2),
            currency: "EUR".to_string(),
            direction,
            creditor: Some(Counterparty {
                name: Some("Acme GmbH".to_string()),
                account_number: None,
            }),
            debitor: Some(Counterparty {
                name: None,
                account_number: Some("LI0001".to_string()),
            }),
            reference: None,
        }
    }

    #[test]
    fn test_outgoing_description_and_sign() {
        let dir = directory();
        let row = Normalizer::new(&dir).normalize(&transaction(Direction::Outgoing));
        assert_eq!(row.description, "Payment to Acme GmbH");
        assert_eq!(row.amount, Decimal::new(-15000, 2));
        assert_eq!(row.merchant_name.as_deref(), Some("Acme GmbH"));
    }

    #[test]
    fn test_incoming_description_uses_directory_name() {
        let dir = directory();
        let row = Normalizer::new(&dir).normalize(&transaction(Direction::Incoming));
        assert_eq!(row.description, "Received from A/S Test");
        assert_eq!(row.amount, Decimal::new(15000, 2));
        assert_eq!(row.debitor_name, "A/S Test");
    }

    #[test]
    fn test_incoming_from_unmapped_debitor() {
        let dir = AccountDirectory::default();
        let row = Normalizer::new(&dir).normalize(&transaction(Direction::Incoming));
        assert_eq!(row.description, "Received from Unknown");
        assert_eq!(row.debitor_name, "Unknown");
    }

    #[test]
    fn test_unknown_direction_description() {
        let dir = directory();
        let row = Normalizer::new(&dir).normalize(&transaction(Direction::Unknown));
        assert_eq!(row.description, "Unknown transaction");
        // Pass-through, no canonicalization
        assert_eq!(row.amount, Decimal::new(15000, 2));
    }
}
