//! Forward command - post transactions to the downstream accounting system

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};

use super::{get_context, print_diagnostics};
use crate::output;

pub fn run(from: Option<NaiveDate>, to: Option<NaiveDate>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    // Month to date
    let today = Local::now().date_naive();
    let to_date = to.unwrap_or(today);
    let from_date = from.unwrap_or_else(|| today.with_day(1).unwrap_or(today));

    let outcome = ctx.forward_service.forward_range(from_date, to_date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    output::success(&format!("Posted {} transaction(s)", outcome.posted));
    if outcome.failed > 0 {
        output::error(&format!("Failed to post {} transaction(s)", outcome.failed));
    }
    println!();

    print_diagnostics(&outcome.skipped_accounts, &outcome.warnings);

    Ok(())
}
