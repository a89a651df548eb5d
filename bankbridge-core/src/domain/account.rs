//! Account domain model and the static account directory

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An account as reported by the bank's accounts endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Bank account identifier (used as the transaction query key)
    pub account: String,
    /// ISO 4217 currency code
    pub currency: String,
    /// Customer label from the bank, if any
    #[serde(default)]
    pub customer: Option<String>,
}

impl Account {
    /// Normalize currency code to uppercase
    pub fn normalize_currency(currency: &str) -> String {
        currency.trim().to_uppercase()
    }
}

/// A locally maintained directory entry for one bank account
///
/// `bank_account` and `code` are the downstream accounting system's
/// coordinates; they are only required for forwarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEntry {
    /// Human-readable display name
    pub name: String,
    #[serde(default)]
    pub bank_account: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Static lookup table from bank account identifier to display data
///
/// The directory is populated externally through configuration. Identifiers
/// without an entry resolve to [`AccountDirectory::UNKNOWN`] and are excluded
/// from reports and exports; callers surface the exclusion instead of
/// dropping it silently.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    entries: HashMap<String, AccountEntry>,
}

impl AccountDirectory {
    /// Display name for identifiers absent from the directory
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn new(entries: HashMap<String, AccountEntry>) -> Self {
        Self { entries }
    }

    /// Look up the directory entry for an account identifier
    pub fn resolve(&self, account_id: &str) -> Option<&AccountEntry> {
        self.entries.get(account_id)
    }

    /// Whether the identifier has a directory entry
    pub fn is_mapped(&self, account_id: &str) -> bool {
        self.entries.contains_key(account_id)
    }

    /// Display name for an identifier, `"Unknown"` when absent
    pub fn display_name(&self, account_id: &str) -> &str {
        self.entries
            .get(account_id)
            .map(|e| e.name.as_str())
            .unwrap_or(Self::UNKNOWN)
    }

    /// Iterate over all (identifier, entry) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AccountEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
