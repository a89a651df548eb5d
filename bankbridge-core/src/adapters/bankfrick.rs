//! Bank Frick web API client
//!
//! Handles authentication and account/transaction retrieval against the
//! Bank Frick online banking web API. Authorization is a signed request:
//! the JSON payload is signed with the customer's RSA key and the signature
//! travels in the `Signature` header.
//!
//! API Documentation: https://developers.bankfrick.li/docs

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use url::Url;

use crate::adapters::signer::{RequestSigner, SIGNATURE_ALGORITHM};
use crate::domain::result::{Error, Result};
use crate::domain::{Account, Counterparty, Direction, Transaction};

// =============================================================================
// API Response Models (matching the web API spec)
// =============================================================================

/// Body of a successful authorization response
#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    token: String,
}

/// Wrapper for the accounts list response
#[derive(Debug, Deserialize)]
struct AccountsResponse {
    #[serde(default)]
    accounts: Vec<BankFrickAccount>,
}

/// Account record from the API
#[derive(Debug, Clone, Deserialize)]
pub struct BankFrickAccount {
    /// Account identifier (IBAN-style)
    pub account: String,
    pub currency: String,
    #[serde(default)]
    pub customer: Option<String>,
}

/// The transactions endpoint answers with either a wrapper object or a
/// bare array depending on the query; both normalize to a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TransactionsResponse {
    Wrapped {
        transactions: Vec<BankFrickTransaction>,
    },
    Bare(Vec<BankFrickTransaction>),
}

impl TransactionsResponse {
    fn into_list(self) -> Vec<BankFrickTransaction> {
        match self {
            Self::Wrapped { transactions } => transactions,
            Self::Bare(transactions) => transactions,
        }
    }
}

/// Transaction record from the API
#[derive(Debug, Clone, Deserialize)]
pub struct BankFrickTransaction {
    /// Value date, ISO date string YYYY-MM-DD
    pub valuta: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub creditor: Option<Counterparty>,
    #[serde(default)]
    pub debitor: Option<Counterparty>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
}

/// Deserialize amount that can be number or string
fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => {
            let s = n.to_string();
            s.parse::<Decimal>()
                .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e)))
        }
        JsonValue::String(s) => s
            .parse::<Decimal>()
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        _ => Err(D::Error::custom("expected number or string for amount")),
    }
}

// =============================================================================
// Bank Frick HTTP Client
// =============================================================================

/// Default production API URL
const BANKFRICK_PRODUCTION_URL: &str = "https://olb.bankfrick.li/webapi/v2";

/// Environment variable to override the API base URL.
/// Set this to use the bank's sandbox environment for testing.
pub const BANKFRICK_BASE_URL_ENV: &str = "BANKFRICK_BASE_URL";

/// Get the base URL, checking the environment variable first
pub fn get_base_url() -> String {
    std::env::var(BANKFRICK_BASE_URL_ENV).unwrap_or_else(|_| BANKFRICK_PRODUCTION_URL.to_string())
}

/// Bank Frick API client
#[derive(Debug)]
pub struct BankFrickClient {
    client: Client,
    api_key: String,
    base_url: String,
    signer: RequestSigner,
}

impl BankFrickClient {
    /// Create a new client with the given API key and request signer.
    ///
    /// Uses the `BANKFRICK_BASE_URL` environment variable if set,
    /// otherwise defaults to the production API.
    pub fn new(api_key: &str, signer: RequestSigner) -> Result<Self> {
        Self::new_with_base_url(api_key, signer, &get_base_url())
    }

    /// Create a new client with a custom base URL.
    pub fn new_with_base_url(api_key: &str, signer: RequestSigner, base_url: &str) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::config("Bank API key cannot be empty"));
        }

        Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid bank base URL '{}': {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            signer,
        })
    }

    /// Request a bearer token from the authorization endpoint.
    ///
    /// The payload `{"key": <api_key>}` is signed with the RSA key; the
    /// signature and algorithm travel as headers. A non-200 answer is an
    /// authentication rejection and aborts the run.
    pub fn authorize(&self) -> Result<String> {
        let url = format!("{}/authorize", self.base_url);
        let payload = serde_json::json!({ "key": self.api_key }).to_string();
        let signature = self
            .signer
            .sign_payload(&payload)
            .map_err(|e| Error::signing(e.to_string()))?;

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Signature", signature)
            .header("algorithm", SIGNATURE_ALGORITHM)
            .body(payload)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        match response.status().as_u16() {
            200 => {
                let body: AuthorizeResponse = response
                    .json()
                    .map_err(|e| Error::auth(format!("Malformed authorization response: {}", e)))?;
                Ok(body.token)
            }
            status => Err(Error::auth(format!(
                "authorization endpoint returned HTTP {}",
                status
            ))),
        }
    }

    /// Fetch the account list.
    ///
    /// A missing `accounts` field parses as an empty list. Non-200 statuses
    /// surface as [`Error::Api`]; callers treat the account list as fatal
    /// for the run.
    pub fn get_accounts(&self, token: &str) -> Result<Vec<Account>> {
        let url = format!("{}/accounts", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .bearer_auth(token)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        match response.status().as_u16() {
            200 => {
                let body: JsonValue = response
                    .json()
                    .map_err(|e| Error::transport(format!("Failed to read accounts body: {}", e)))?;
                let parsed: AccountsResponse = serde_json::from_value(body)?;
                Ok(parsed
                    .accounts
                    .into_iter()
                    .map(|a| self.map_account(a))
                    .collect())
            }
            status => Err(Error::api("accounts", status)),
        }
    }

    /// Fetch transactions for one account over an inclusive date range.
    ///
    /// Accepts both response shapes (wrapper object and bare array).
    /// Non-200 statuses and unrecognized shapes surface as soft errors;
    /// callers degrade to an empty list.
    pub fn get_transactions(
        &self,
        token: &str,
        account_id: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        let url = format!(
            "{}/transactions?accountId={}&fromDate={}&toDate={}",
            self.base_url,
            account_id,
            from_date.format("%Y-%m-%d"),
            to_date.format("%Y-%m-%d")
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .bearer_auth(token)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        match response.status().as_u16() {
            200 => {
                let body: JsonValue = response.json().map_err(|e| {
                    Error::transport(format!("Failed to read transactions body: {}", e))
                })?;
                let parsed: TransactionsResponse = serde_json::from_value(body)?;
                Ok(parsed
                    .into_list()
                    .iter()
                    .map(|t| self.map_transaction(t))
                    .collect())
            }
            status => Err(Error::api("transactions", status)),
        }
    }

    /// Map an API account to the domain Account
    fn map_account(&self, raw: BankFrickAccount) -> Account {
        Account {
            account: raw.account,
            currency: Account::normalize_currency(&raw.currency),
            customer: raw.customer,
        }
    }

    /// Map an API transaction to the domain Transaction
    fn map_transaction(&self, raw: &BankFrickTransaction) -> Transaction {
        let value_date = NaiveDate::parse_from_str(&raw.valuta, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().naive_utc().date());

        Transaction {
            value_date,
            amount: raw.amount,
            currency: raw.currency.clone(),
            direction: raw.direction,
            creditor: raw.creditor.clone(),
            debitor: raw.debitor.clone(),
            reference: raw.transaction_type.clone(),
        }
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::transport("Connection timed out after 30 seconds")
        } else if error.is_connect() {
            Error::transport("Unable to connect to the bank API")
        } else {
            Error::transport(format!("Bank API request failed: {}", error))
        }
    }
}
