//! Export command - write transactions to CSV files

use anyhow::Result;
use chrono::{Duration, NaiveDate};

use super::{get_context, print_diagnostics, yesterday};
use crate::output;

pub fn run(from: Option<NaiveDate>, to: Option<NaiveDate>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    // Trailing week: eight days ago through yesterday
    let to_date = to.unwrap_or_else(yesterday);
    let from_date = from.unwrap_or_else(|| yesterday() - Duration::days(7));

    let outcome = ctx.export_service.export_range(from_date, to_date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    for file in &outcome.files {
        output::success(&format!("Saved transactions to {}", file.display()));
    }
    if outcome.files.is_empty() {
        println!(
            "No files written for {} to {}.",
            from_date.format("%Y-%m-%d"),
            to_date.format("%Y-%m-%d")
        );
    }
    println!();

    print_diagnostics(&outcome.skipped_accounts, &outcome.warnings);

    Ok(())
}
