//! Forward service - re-post bank transactions to the accounting system
//!
//! Iterates the account directory (not the bank's account list: only
//! accounts with downstream coordinates can be forwarded), fetches each
//! account's transactions over the range, and posts them one at a time.
//! A failed post is counted and the run moves on; there is no retry.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::adapters::bankfrick::BankFrickClient;
use crate::adapters::iplicit::{BankTransactionPayload, IplicitClient};
use crate::config::DownstreamSettings;
use crate::domain::result::Result;
use crate::domain::{AccountDirectory, AccountEntry, Transaction};

/// Result of a forward run
#[derive(Debug, Serialize)]
pub struct ForwardOutcome {
    pub posted: usize,
    pub failed: usize,
    /// Directory entries skipped for missing downstream coordinates
    pub skipped_accounts: Vec<String>,
    pub warnings: Vec<String>,
}

/// Forward service driving fetch + normalize + post per account
pub struct ForwardService {
    client: Arc<BankFrickClient>,
    directory: AccountDirectory,
    downstream: DownstreamSettings,
}

impl ForwardService {
    pub fn new(
        client: Arc<BankFrickClient>,
        directory: AccountDirectory,
        downstream: DownstreamSettings,
    ) -> Self {
        Self {
            client,
            directory,
            downstream,
        }
    }

    /// Post every directory account's transactions over the date range.
    pub fn forward_range(&self, from_date: NaiveDate, to_date: NaiveDate) -> Result<ForwardOutcome> {
        let iplicit = match &self.downstream.base_url {
            Some(url) => IplicitClient::new_with_base_url(&self.downstream.api_key, url),
            None => IplicitClient::new(&self.downstream.api_key),
        }?;

        let token = self.client.authorize()?;

        let mut posted = 0;
        let mut failed = 0;
        let mut skipped_accounts = Vec::new();
        let mut warnings = Vec::new();

        for (account_id, entry) in self.directory.iter() {
            if entry.bank_account.is_none() || entry.code.is_none() {
                skipped_accounts.push(entry.name.clone());
                continue;
            }

            let transactions =
                match self.client.get_transactions(&token, account_id, from_date, to_date) {
                    Ok(transactions) => transactions,
                    Err(e) if !e.is_fatal() => {
                        warnings.push(format!(
                            "Failed to fetch transactions for {}: {}",
                            entry.name, e
                        ));
                        continue;
                    }
                    Err(e) => return Err(e),
                };

            if transactions.is_empty() {
                warnings.push(format!("No transactions found for {}", entry.name));
                continue;
            }

            for tx in &transactions {
                let payload = build_payload(&self.downstream.legal_entity, entry, tx);
                // Every post error is per-transaction: count it and move on
                match iplicit.post_transaction(&payload) {
                    Ok(()) => posted += 1,
                    Err(e) => {
                        failed += 1;
                        warnings.push(format!(
                            "Failed to post transaction '{}' for {}: {}",
                            payload.description, entry.name, e
                        ));
                    }
                }
            }
        }

        Ok(ForwardOutcome {
            posted,
            failed,
            skipped_accounts,
            warnings,
        })
    }
}

/// Build the downstream payload for one transaction.
///
/// Amount carries the canonical sign; reference falls back to `"N/A"` when
/// the bank reported no transaction type, description to `"N/A"` when there
/// is no creditor name.
pub(crate) fn build_payload(
    legal_entity: &str,
    entry: &AccountEntry,
    tx: &Transaction,
) -> BankTransactionPayload {
    BankTransactionPayload {
        legal_entity: legal_entity.to_string(),
        bank_account: entry.bank_account.clone().unwrap_or_default(),
        code: entry.code.clone().unwrap_or_default(),
        transaction_date: tx.value_date.format("%Y-%m-%d").to_string(),
        amount: tx.signed_amount(),
        reference: tx.reference.clone().unwrap_or_else(|| "N/A".to_string()),
        description: tx
            .creditor_name()
            .map(str::to_string)
            .unwrap_or_else(|| "N/A".to_string()),
    }
}
