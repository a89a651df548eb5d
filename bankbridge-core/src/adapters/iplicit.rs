//! Iplicit accounting API client
//!
//! Posts normalized bank transactions to the Iplicit `/BankTransaction`
//! endpoint. Failures here are per-transaction: the caller logs and moves
//! on to the next transaction, no retry.

use std::time::Duration;

use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::Serialize;
use url::Url;

use crate::domain::result::{Error, Result};

/// Default production API URL
const IPLICIT_PRODUCTION_URL: &str = "https://api.iplicit.com";

/// Environment variable to override the Iplicit API base URL.
pub const IPLICIT_BASE_URL_ENV: &str = "IPLICIT_BASE_URL";

/// Get the base URL, checking the environment variable first
pub fn get_base_url() -> String {
    std::env::var(IPLICIT_BASE_URL_ENV).unwrap_or_else(|_| IPLICIT_PRODUCTION_URL.to_string())
}

/// Payload shape of the `/BankTransaction` endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BankTransactionPayload {
    pub legal_entity: String,
    pub bank_account: String,
    pub code: String,
    /// Transaction date, YYYY-MM-DD
    pub transaction_date: String,
    /// Canonical signed amount
    pub amount: Decimal,
    pub reference: String,
    pub description: String,
}

/// Iplicit API client
#[derive(Debug)]
pub struct IplicitClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl IplicitClient {
    /// Create a new client with the given API key.
    ///
    /// Uses the `IPLICIT_BASE_URL` environment variable if set,
    /// otherwise defaults to the production API.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::new_with_base_url(api_key, &get_base_url())
    }

    /// Create a new client with a custom base URL.
    pub fn new_with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::config("Iplicit API key cannot be empty"));
        }

        Url::parse(base_url).map_err(|e| {
            Error::config(format!("Invalid Iplicit base URL '{}': {}", base_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Post a single bank transaction. HTTP 200 and 201 both count as
    /// accepted.
    pub fn post_transaction(&self, payload: &BankTransactionPayload) -> Result<()> {
        let url = format!("{}/BankTransaction", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        match response.status().as_u16() {
            200 | 201 => Ok(()),
            status => Err(Error::api("BankTransaction", status)),
        }
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::transport("Connection timed out after 30 seconds")
        } else if error.is_connect() {
            Error::transport("Unable to connect to the Iplicit API")
        } else {
            Error::transport(format!("Iplicit request failed: {}", error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_empty_api_key() {
        let result = IplicitClient::new_with_base_url("", "http://localhost");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = IplicitClient::new_with_base_url("key", "http://localhost/api/").unwrap();
        assert_eq!(client.base_url, "http://localhost/api");
    }

    #[test]
    fn test_default_base_url() {
        std::env::remove_var(IPLICIT_BASE_URL_ENV);
        assert_eq!(get_base_url(), "https://api.iplicit.com");
    }

    #[test]
    fn test_payload_serializes_with_pascal_case_fields() {
        let payload = BankTransactionPayload {
            legal_entity: "Test Entity".to_string(),
            bank_account: "BANK-01".to_string(),
            code: "GBP".to_string(),
            transaction_date: "2025-01-15".to_string(),
            amount: Decimal::new(-4250, 2),
            reference: "SEPA".to_string(),
            description: "Acme GmbH".to_string(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["LegalEntity"], "Test Entity");
        assert_eq!(json["BankAccount"], "BANK-01");
        assert_eq!(json["Code"], "GBP");
        assert_eq!(json["TransactionDate"], "2025-01-15");
        assert_eq!(json["Reference"], "SEPA");
        assert_eq!(json["Description"], "Acme GmbH");
        assert_eq!(json["Amount"], serde_json::json!("-42.50"));
    }
}
