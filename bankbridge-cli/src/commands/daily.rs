//! Daily command - per-account transaction counts for one day

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;

use super::{get_context, print_diagnostics, yesterday};

pub fn run(date: Option<NaiveDate>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let date = date.unwrap_or_else(yesterday);
    let summary = ctx.report_service.daily(date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Daily Transaction Summary".bold());
    println!();
    for line in summary.lines() {
        println!("{}", line);
    }
    if summary.entries.is_empty() {
        println!("No mapped accounts reported by the bank.");
    }
    println!();

    print_diagnostics(&summary.unmapped_accounts, &summary.warnings);

    Ok(())
}
