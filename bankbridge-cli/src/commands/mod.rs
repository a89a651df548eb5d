//! CLI command implementations

pub mod accounts;
pub mod daily;
pub mod export;
pub mod forward;
pub mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};

use bankbridge_core::BridgeContext;

/// Get the bridge directory from environment or default
pub fn get_bridge_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BANKBRIDGE_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".bankbridge")
    }
}

/// Get or create the bridge context
pub fn get_context() -> Result<BridgeContext> {
    let bridge_dir = get_bridge_dir();

    std::fs::create_dir_all(&bridge_dir)
        .with_context(|| format!("Failed to create bridge directory: {:?}", bridge_dir))?;

    BridgeContext::new(&bridge_dir).context("Failed to initialize bridge context")
}

/// Yesterday in local time, the default report date
pub fn yesterday() -> NaiveDate {
    Local::now().date_naive() - Duration::days(1)
}

/// Print skipped-account and warning diagnostics shared by all commands
pub fn print_diagnostics(unmapped: &[String], warnings: &[String]) {
    if !unmapped.is_empty() {
        crate::output::warning(&format!(
            "Skipped {} account(s) with no directory entry: {}",
            unmapped.len(),
            unmapped.join(", ")
        ));
    }
    for warning in warnings {
        crate::output::warning(warning);
    }
}
