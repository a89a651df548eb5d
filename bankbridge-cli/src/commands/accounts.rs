//! Accounts command - list bank accounts and their mapping status

use anyhow::Result;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    let token = ctx.client.authorize()?;
    let accounts = ctx.client.get_accounts(&token)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }

    if accounts.is_empty() {
        println!("The bank reported no accounts.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Account", "Currency", "Customer", "Mapped Name"]);

    let mut unmapped = 0;
    for account in &accounts {
        let mapped = ctx.config.directory.resolve(&account.account);
        if mapped.is_none() {
            unmapped += 1;
        }
        table.add_row(vec![
            account.account.as_str(),
            account.currency.as_str(),
            account.customer.as_deref().unwrap_or("-"),
            mapped.map(|e| e.name.as_str()).unwrap_or("-"),
        ]);
    }

    println!("{}", table);

    if unmapped > 0 {
        println!();
        output::warning(&format!(
            "{} account(s) have no directory entry and will be excluded from reports",
            unmapped
        ));
    }

    Ok(())
}
