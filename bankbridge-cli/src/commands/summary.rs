//! Summary command - daily summary grouped by legal entity

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;

use super::{get_context, print_diagnostics, yesterday};

pub fn run(date: Option<NaiveDate>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let date = date.unwrap_or_else(yesterday);
    let summary = ctx.report_service.grouped(date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Daily Transaction Summary".bold());
    println!();
    for line in summary.lines() {
        println!("{}", line);
    }
    println!();

    print_diagnostics(&summary.unmapped_accounts, &summary.warnings);

    Ok(())
}
