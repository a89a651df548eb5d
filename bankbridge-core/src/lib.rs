//! Bankbridge Core - business logic for the bank data bridge
//!
//! This crate implements the core logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (Account, Transaction, normalization)
//! - **adapters**: Concrete implementations (bank API client, signer, Iplicit)
//! - **services**: Business logic orchestration (report, export, forward)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::bankfrick::BankFrickClient;
use adapters::signer::RequestSigner;
use config::Config;
use services::{ExportService, ForwardService, ReportService};

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{
    Account, AccountDirectory, AccountEntry, Counterparty, Direction, NormalizedRow, Normalizer,
    Transaction,
};

/// Main context for bridge operations
///
/// This is the primary entry point for all business logic. It holds the
/// configuration, the authenticated bank client, and all services. Building
/// the context loads the RSA key; a missing or unparseable key fails here,
/// before any network traffic.
pub struct BridgeContext {
    pub config: Config,
    pub client: Arc<BankFrickClient>,
    pub report_service: ReportService,
    pub export_service: ExportService,
    pub forward_service: ForwardService,
}

impl BridgeContext {
    /// Create a new bridge context from the given bridge directory
    pub fn new(bridge_dir: &Path) -> Result<Self> {
        let config = Config::load(bridge_dir)?;

        let signer = RequestSigner::from_pem_file(&config.bank.private_key_path)?;
        let client = Arc::new(match &config.bank.base_url {
            Some(url) => BankFrickClient::new_with_base_url(&config.bank.api_key, signer, url),
            None => BankFrickClient::new(&config.bank.api_key, signer),
        }?);

        let report_service = ReportService::new(
            Arc::clone(&client),
            config.directory.clone(),
            config.entity_groups.clone(),
        );
        let export_service = ExportService::new(
            Arc::clone(&client),
            config.directory.clone(),
            config.output_dir.clone(),
        );
        let forward_service = ForwardService::new(
            Arc::clone(&client),
            config.directory.clone(),
            config.downstream.clone(),
        );

        Ok(Self {
            config,
            client,
            report_service,
            export_service,
            forward_service,
        })
    }
}
