//! Configuration management
//!
//! Loaded once per run from `settings.json` in the bridge directory and
//! passed into components at construction; nothing reads it afterwards.
//!
//! ```json
//! {
//!   "bank": { "apiKey": "...", "privateKeyPath": "/path/key.pem" },
//!   "downstream": { "apiKey": "...", "legalEntity": "..." },
//!   "export": { "outputDir": "/path/output" },
//!   "report": { "entityGroups": ["A/S", "Limited"] },
//!   "accounts": { "<account-id>": { "name": "...", "bankAccount": "...", "code": "..." } }
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{AccountDirectory, AccountEntry};

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    bank: BankSettings,
    #[serde(default)]
    downstream: DownstreamSettings,
    #[serde(default)]
    export: ExportSettings,
    #[serde(default)]
    report: ReportSettings,
    #[serde(default)]
    accounts: HashMap<String, AccountEntry>,
}

/// Upstream bank API settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub private_key_path: PathBuf,
    /// Optional override of the production base URL
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Downstream accounting API settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub legal_entity: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportSettings {
    #[serde(default)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportSettings {
    #[serde(default)]
    entity_groups: Option<Vec<String>>,
}

/// Bridge configuration (resolved view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub bank: BankSettings,
    pub downstream: DownstreamSettings,
    pub output_dir: PathBuf,
    pub entity_groups: Vec<String>,
    pub directory: AccountDirectory,
}

impl Config {
    /// Load config from the bridge directory.
    ///
    /// A missing settings file yields defaults; a malformed one is an error
    /// rather than a silent fallback, since every credential lives here.
    pub fn load(bridge_dir: &Path) -> Result<Self> {
        let settings_path = bridge_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {}", settings_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", settings_path.display()))?
        } else {
            SettingsFile::default()
        };

        let output_dir = raw
            .export
            .output_dir
            .unwrap_or_else(|| bridge_dir.join("output"));
        let entity_groups = raw
            .report
            .entity_groups
            .unwrap_or_else(default_entity_groups);

        Ok(Self {
            bank: raw.bank,
            downstream: raw.downstream,
            output_dir,
            entity_groups,
            directory: AccountDirectory::new(raw.accounts),
        })
    }
}

fn default_entity_groups() -> Vec<String> {
    vec!["A/S".to_string(), "Limited".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_settings_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.output_dir, dir.path().join("output"));
        assert_eq!(config.entity_groups, vec!["A/S", "Limited"]);
        assert!(config.directory.is_empty());
        assert!(config.bank.api_key.is_empty());
    }

    #[test]
    fn test_load_full_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{
                "bank": { "apiKey": "bank-key", "privateKeyPath": "/keys/id.pem" },
                "downstream": { "apiKey": "dl-key", "legalEntity": "Test Entity" },
                "export": { "outputDir": "/data/out" },
                "report": { "entityGroups": ["GmbH"] },
                "accounts": {
                    "LI0001": { "name": "A/S Test", "bankAccount": "B-01", "code": "GBP" },
                    "LI0002": { "name": "Acme Limited" }
                }
            }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.bank.api_key, "bank-key");
        assert_eq!(config.bank.private_key_path, PathBuf::from("/keys/id.pem"));
        assert_eq!(config.downstream.legal_entity, "Test Entity");
        assert_eq!(config.output_dir, PathBuf::from("/data/out"));
        assert_eq!(config.entity_groups, vec!["GmbH"]);
        assert_eq!(config.directory.len(), 2);
        assert_eq!(config.directory.display_name("LI0001"), "A/S Test");
        // Entries without downstream coordinates still resolve for reporting
        let partial = config.directory.resolve("LI0002").unwrap();
        assert!(partial.bank_account.is_none());
    }

    #[test]
    fn test_malformed_settings_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
