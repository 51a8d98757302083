use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, Table};
use moneygraph::balance::{balance_change, sum_account_balances, sum_monthly_balances, BalanceChange};
use moneygraph::fmt::{self, format_last_transaction_date, money, signed_money};
use moneygraph::settings::load_settings;
use moneygraph::Timescale;

use super::require_snapshot;

fn change_cell(change: &BalanceChange, symbol: &str) -> Cell {
    let text = fmt::balance_change(change, symbol);
    if change.delta.is_sign_negative() && !change.delta.is_zero() {
        Cell::new(text.red())
    } else {
        Cell::new(text.green())
    }
}

pub fn run(file: Option<String>, timescale: Option<Timescale>) -> Result<()> {
    let settings = load_settings();
    let snapshot = require_snapshot(file, &settings)?;
    let timescale = timescale.unwrap_or(settings.default_timescale);
    let symbol = settings.currency_symbol.as_str();
    let summaries = &snapshot.account_summaries;

    if summaries.is_empty() {
        println!("No accounts in snapshot.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    let mut table = Table::new();
    table.set_header(vec![
        "Account".to_string(),
        "Institution".to_string(),
        "Balance".to_string(),
        format!("Change ({})", timescale.label()),
        "Last Transaction".to_string(),
    ]);
    for summary in summaries {
        let name = if summary.account.is_active {
            Cell::new(&summary.account.name)
        } else {
            Cell::new(format!("{} (inactive)", summary.account.name).dimmed())
        };
        table.add_row(vec![
            name,
            Cell::new(&summary.account.institution),
            Cell::new(money(summary.balance, symbol)),
            change_cell(&balance_change(timescale, summary), symbol),
            Cell::new(format_last_transaction_date(
                summary.last_transaction_date.as_deref(),
                today,
            )),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(money(sum_account_balances(summaries), symbol).bold()),
        Cell::new(""),
        Cell::new(""),
    ]);
    // sum of monthly net changes, not a balance change: the first month of
    // the window is not counted
    table.add_row(vec![
        Cell::new("Net Monthly Change".bold()),
        Cell::new(""),
        Cell::new(""),
        Cell::new(signed_money(sum_monthly_balances(summaries, timescale), symbol).bold()),
        Cell::new(""),
    ]);

    println!("Balances\n{table}");
    Ok(())
}
