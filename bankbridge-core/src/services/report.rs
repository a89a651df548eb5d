//! Report service - daily transaction summaries
//!
//! Two reporting strategies over the same fetch path: one line per mapped
//! account, or accounts grouped by legal-entity name fragments. Accounts
//! missing from the directory are excluded from the breakdown and listed on
//! the result so the omission is visible to the caller.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::adapters::bankfrick::BankFrickClient;
use crate::domain::result::Result;
use crate::domain::AccountDirectory;

/// Report service for per-account and grouped summaries
pub struct ReportService {
    client: Arc<BankFrickClient>,
    directory: AccountDirectory,
    entity_groups: Vec<String>,
}

/// Transaction count for one mapped account on the report date
#[derive(Debug, Clone, Serialize)]
pub struct AccountActivity {
    pub name: String,
    pub currency: String,
    pub count: usize,
}

/// Per-account daily summary
#[derive(Debug, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub entries: Vec<AccountActivity>,
    /// Account identifiers skipped because they have no directory entry
    pub unmapped_accounts: Vec<String>,
    pub warnings: Vec<String>,
}

/// Summary for one legal-entity group
#[derive(Debug, Serialize)]
pub struct EntityGroupSummary {
    pub entity: String,
    pub accounts: Vec<AccountActivity>,
    /// Total transaction count across the group
    pub total: usize,
}

/// Daily summary grouped by legal entity
#[derive(Debug, Serialize)]
pub struct GroupedSummary {
    pub date: NaiveDate,
    pub groups: Vec<EntityGroupSummary>,
    pub unmapped_accounts: Vec<String>,
    pub warnings: Vec<String>,
}

impl ReportService {
    pub fn new(
        client: Arc<BankFrickClient>,
        directory: AccountDirectory,
        entity_groups: Vec<String>,
    ) -> Self {
        Self {
            client,
            directory,
            entity_groups,
        }
    }

    /// Fetch transaction counts for every mapped account on `date`.
    ///
    /// Fetch failures for a single account degrade to a zero-data entry
    /// being skipped with a warning; account-list failures abort the run.
    pub fn daily(&self, date: NaiveDate) -> Result<DailySummary> {
        let token = self.client.authorize()?;
        let accounts = self.client.get_accounts(&token)?;

        let mut entries = Vec::new();
        let mut unmapped_accounts = Vec::new();
        let mut warnings = Vec::new();

        for account in accounts {
            let entry = match self.directory.resolve(&account.account) {
                Some(entry) => entry,
                None => {
                    unmapped_accounts.push(account.account);
                    continue;
                }
            };

            let transactions =
                match self.client.get_transactions(&token, &account.account, date, date) {
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

            entries.push(AccountActivity {
                name: entry.name.clone(),
                currency: account.currency,
                count: transactions.len(),
            });
        }

        Ok(DailySummary {
            date,
            entries,
            unmapped_accounts,
            warnings,
        })
    }

    /// Daily summary with accounts grouped by legal-entity name fragment
    pub fn grouped(&self, date: NaiveDate) -> Result<GroupedSummary> {
        let daily = self.daily(date)?;
        let groups = group_by_entity(&daily.entries, &self.entity_groups);

        Ok(GroupedSummary {
            date: daily.date,
            groups,
            unmapped_accounts: daily.unmapped_accounts,
            warnings: daily.warnings,
        })
    }
}

/// Group account activity by substring match on entity name fragments.
///
/// An account belongs to the first fragment its display name contains;
/// accounts matching no fragment are left out of every group.
pub(crate) fn group_by_entity(
    entries: &[AccountActivity],
    fragments: &[String],
) -> Vec<EntityGroupSummary> {
    fragments
        .iter()
        .map(|fragment| {
            let accounts: Vec<AccountActivity> = entries
                .iter()
                .filter(|e| e.name.contains(fragment.as_str()))
                .cloned()
                .collect();
            let total = accounts.iter().map(|a| a.count).sum();
            EntityGroupSummary {
                entity: fragment.clone(),
                accounts,
                total,
            }
        })
        .collect()
}

fn format_report_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

impl DailySummary {
    /// Human-readable summary lines, one per mapped account
    pub fn lines(&self) -> Vec<String> {
        let date = format_report_date(self.date);
        self.entries
            .iter()
            .map(|entry| {
                if entry.count > 0 {
                    format!("{} had {} transactions on {}", entry.name, entry.count, date)
                } else {
                    format!("{} had no movements on {}", entry.name, date)
                }
            })
            .collect()
    }
}

impl GroupedSummary {
    /// Human-readable summary lines.
    ///
    /// A group with no movements at all collapses to a single line;
    /// otherwise only accounts with movements are listed.
    pub fn lines(&self) -> Vec<String> {
        let date = format_report_date(self.date);
        let mut lines = Vec::new();

        for group in &self.groups {
            if group.total == 0 {
                lines.push(format!("{} had no movements on {}", group.entity, date));
            } else {
                for account in group.accounts.iter().filter(|a| a.count > 0) {
                    lines.push(format!(
                        "{} had {} transactions on {}",
                        account.name, account.count, date
                    ));
                }
            }
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(name: &str, count: usize) -> AccountActivity {
        AccountActivity {
            name: name.to_string(),
            currency: "CHF".to_string(),
            count,
        }
    }

    fn fragments() -> Vec<String> {
        vec!["A/S".to_string(), "Limited".to_string()]
    }

    #[test]
    fn test_group_by_entity_partitions_on_name_fragment() {
        let entries = vec![
            activity("Nordic A/S", 2),
            activity("Acme Limited", 0),
            activity("Harbor A/S", 1),
        ];

        let groups = group_by_entity(&entries, &fragments());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].entity, "A/S");
        assert_eq!(groups[0].accounts.len(), 2);
        assert_eq!(groups[0].total, 3);
        assert_eq!(groups[1].entity, "Limited");
        assert_eq!(groups[1].total, 0);
    }

    #[test]
    fn test_accounts_matching_no_fragment_are_left_out() {
        let entries = vec![activity("Standalone GmbH", 4)];
        let groups = group_by_entity(&entries, &fragments());
        assert!(groups.iter().all(|g| g.accounts.is_empty()));
    }

    #[test]
    fn test_daily_lines_format() {
        let summary = DailySummary {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            entries: vec![activity("Nordic A/S", 3), activity("Acme Limited", 0)],
            unmapped_accounts: Vec::new(),
            warnings: Vec::new(),
        };

        let lines = summary.lines();
        assert_eq!(lines[0], "Nordic A/S had 3 transactions on 14/03/2025");
        assert_eq!(lines[1], "Acme Limited had no movements on 14/03/2025");
    }

    #[test]
    fn test_quiet_group_emits_exactly_one_line() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let entries = vec![
            activity("Nordic A/S", 0),
            activity("Harbor A/S", 0),
            activity("Acme Limited", 2),
        ];
        let summary = GroupedSummary {
            date,
            groups: group_by_entity(&entries, &fragments()),
            unmapped_accounts: Vec::new(),
            warnings: Vec::new(),
        };

        let lines = summary.lines();
        let quiet: Vec<_> = lines.iter().filter(|l| l.contains("A/S had no movements")).collect();
        assert_eq!(quiet.len(), 1);
        assert_eq!(quiet[0], "A/S had no movements on 14/03/2025");
        // No per-account lines for the quiet group
        assert!(!lines.iter().any(|l| l.starts_with("Nordic A/S")));
        assert!(lines.contains(&"Acme Limited had 2 transactions on 14/03/2025".to_string()));
    }
}
