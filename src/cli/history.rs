use anyhow::{bail, Result};
use colored::Colorize;
use comfy_table::{Cell, Table};
use moneygraph::balance::total_balance_by_month;
use moneygraph::fmt::{money, signed_money};
use moneygraph::settings::load_settings;
use moneygraph::window::months_in_window;
use moneygraph::{BoundedMonth, Timescale};

use super::require_snapshot;

pub fn run(file: Option<String>, timescale: Option<Timescale>) -> Result<()> {
    let settings = load_settings();
    let snapshot = require_snapshot(file, &settings)?;
    let timescale = timescale.unwrap_or(settings.default_timescale);
    let symbol = settings.currency_symbol.as_str();
    let summaries = &snapshot.account_summaries;

    let history = summaries.iter().map(|s| &s.monthly_balances);
    let (Some(first), Some(last)) = (
        history.clone().map(|h| h.start_year_month).min(),
        history.map(|h| h.end_year_month).max(),
    ) else {
        bail!("snapshot has no balance history");
    };

    let latest = BoundedMonth::new(last).attach_bounds(Some(first), Some(last))?;
    let totals = total_balance_by_month(summaries, months_in_window(&latest, timescale)?);

    let mut table = Table::new();
    table.set_header(vec!["Month", "Net Balance", "Change"]);
    let mut previous = None;
    for (month, total) in totals {
        let change = match previous {
            Some(prev) => {
                let delta = total - prev;
                let text = signed_money(delta, symbol);
                if delta.is_sign_negative() && !delta.is_zero() {
                    Cell::new(text.red())
                } else {
                    Cell::new(text.green())
                }
            }
            None => Cell::new(""),
        };
        table.add_row(vec![Cell::new(month), Cell::new(money(total, symbol)), change]);
        previous = Some(total);
    }

    println!("Net Balance ({})\n{table}", timescale.label());
    Ok(())
}
