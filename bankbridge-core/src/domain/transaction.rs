//! Transaction domain model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction direction as reported by the bank
///
/// Anything the API reports outside `incoming`/`outgoing` collapses to
/// `Unknown`; such transactions keep their source amount sign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A counterparty (creditor or debitor) on a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counterparty {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
}

/// A single transaction fetched from the bank
///
/// Transactions are immutable snapshots; the bank API does not expose a
/// transaction identifier and nothing here is persisted except as CSV rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Value date
    pub value_date: NaiveDate,
    /// Amount as reported by the bank, sign included
    pub amount: Decimal,
    pub currency: String,
    pub direction: Direction,
    pub creditor: Option<Counterparty>,
    pub debitor: Option<Counterparty>,
    /// Bank transaction type, used as the downstream reference
    pub reference: Option<String>,
}

impl Transaction {
    /// Canonical signed amount for output
    ///
    /// Outgoing transactions are negative and incoming positive regardless
    /// of the sign the bank returned. Unknown directions pass through.
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Outgoing => -self.amount.abs(),
            Direction::Incoming => self.amount.abs(),
            Direction::Unknown => self.amount,
        }
    }

    /// Name of the creditor, if the bank reported one
    pub fn creditor_name(&self) -> Option<&str> {
        self.creditor.as_ref().and_then(|c| c.name.as_deref())
    }

    /// Account number of the debitor, if the bank reported one
    pub fn debitor_account(&self) -> Option<&str> {
        self.debitor.as_ref().and_then(|d| d.account_number.as_deref())
    }
}
