//! Export service - write normalized transactions to dated CSV files
//!
//! One file per mapped account per day, named
//! `<sanitized-label>_<YYYY-MM-DD>.csv`. Re-running on the same day
//! overwrites the prior file for that label.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::adapters::bankfrick::BankFrickClient;
use crate::domain::result::Result;
use crate::domain::{AccountDirectory, Normalizer, Transaction};

/// CSV column header, fixed across all exports
const CSV_HEADER: [&str; 7] = [
    "Date",
    "Description",
    "Amount",
    "Currency",
    "Debitor Account",
    "Creditor Name",
    "Merchant Name",
];

/// Writes normalized transactions to CSV files in the output directory
pub struct CsvExporter {
    output_dir: PathBuf,
    directory: AccountDirectory,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>, directory: AccountDirectory) -> Self {
        Self {
            output_dir: output_dir.into(),
            directory,
        }
    }

    /// Replace characters that do not belong in a file name
    pub fn sanitize_label(label: &str) -> String {
        label.replace(['/', ' '], "_")
    }

    /// Write one CSV file for an account's transactions, returning its path.
    ///
    /// Creates the output directory if absent. The file name carries
    /// today's date; same-day re-runs overwrite.
    pub fn write(&self, transactions: &[Transaction], account_label: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let file_name = format!(
            "{}_{}.csv",
            Self::sanitize_label(account_label),
            Local::now().format("%Y-%m-%d")
        );
        let path = self.output_dir.join(file_name);

        let normalizer = Normalizer::new(&self.directory);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(CSV_HEADER)?;

        for tx in transactions {
            let row = normalizer.normalize(tx);
            writer.write_record([
                row.date.format("%Y-%m-%d").to_string(),
                row.description,
                row.amount.to_string(),
                row.currency,
                row.debitor_name,
                row.creditor_name.unwrap_or_default(),
                row.merchant_name.unwrap_or_default(),
            ])?;
        }

        writer.flush()?;
        Ok(path)
    }
}

/// Result of an export run
#[derive(Debug, Serialize)]
pub struct ExportOutcome {
    pub files: Vec<PathBuf>,
    /// Account identifiers skipped because they have no directory entry
    pub skipped_accounts: Vec<String>,
    pub warnings: Vec<String>,
}

/// Export service driving fetch + normalize + CSV write per account
pub struct ExportService {
    client: Arc<BankFrickClient>,
    directory: AccountDirectory,
    exporter: CsvExporter,
}

impl ExportService {
    pub fn new(
        client: Arc<BankFrickClient>,
        directory: AccountDirectory,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let exporter = CsvExporter::new(output_dir, directory.clone());
        Self {
            client,
            directory,
            exporter,
        }
    }

    /// Path of the configured output directory
    pub fn output_dir(&self) -> &Path {
        self.exporter.output_dir.as_path()
    }

    /// Export each mapped account's transactions over the date range to its
    /// own CSV file.
    ///
    /// Only transactions whose debitor account number matches the account
    /// being exported are written. Accounts with nothing to write produce
    /// no file and a warning.
    pub fn export_range(&self, from_date: NaiveDate, to_date: NaiveDate) -> Result<ExportOutcome> {
        let token = self.client.authorize()?;
        let accounts = self.client.get_accounts(&token)?;

        let mut files = Vec::new();
        let mut skipped_accounts = Vec::new();
        let mut warnings = Vec::new();

        for account in accounts {
            let entry = match self.directory.resolve(&account.account) {
                Some(entry) => entry,
                None => {
                    skipped_accounts.push(account.account);
                    continue;
                }
            };

            let transactions = match self.client.get_transactions(
                &token,
                &account.account,
                from_date,
                to_date,
            ) {
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

            let own: Vec<Transaction> = transactions
                .into_iter()
                .filter(|tx| tx.debitor_account() == Some(account.account.as_str()))
                .collect();

            if own.is_empty() {
                warnings.push(format!("No transactions to export for {}", entry.name));
                continue;
            }

            files.push(self.exporter.write(&own, &entry.name)?);
        }

        Ok(ExportOutcome {
            files,
            skipped_accounts,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_label() {
        assert_eq!(CsvExporter::sanitize_label("A/S Test"), "A_S_Test");
        assert_eq!(CsvExporter::sanitize_label("Acme Limited"), "Acme_Limited");
        assert_eq!(CsvExporter::sanitize_label("plain"), "plain");
    }
}
