use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{AccountSummary, MonthlyBalance, MonthlyBalanceResult};
use crate::month::{MonthRange, YearMonth};
use crate::timescale::Timescale;
use crate::window::nominal_start;

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Entry for exactly `month`, if the account has one.
pub fn balance_at(account: &MonthlyBalanceResult, month: YearMonth) -> Option<&MonthlyBalance> {
    account
        .monthly_balances
        .iter()
        .find(|mb| mb.year_month == month)
}

/// Most recent entry at or before `month`. Months without transactions carry
/// the previous balance forward.
pub fn latest_balance_at_or_before(
    account: &MonthlyBalanceResult,
    month: YearMonth,
) -> Option<&MonthlyBalance> {
    let mut newest_first: Vec<&MonthlyBalance> = account.monthly_balances.iter().collect();
    newest_first.sort_by(|a, b| b.year_month.cmp(&a.year_month));
    newest_first.into_iter().find(|mb| mb.year_month <= month)
}

/// Carried-forward end balance for every month in `months`; `None` before the
/// account's first entry.
pub fn balances_for_months(
    account: &MonthlyBalanceResult,
    months: MonthRange,
) -> Vec<(YearMonth, Option<Decimal>)> {
    months
        .map(|m| (m, latest_balance_at_or_before(account, m).map(|mb| mb.end_balance)))
        .collect()
}

/// Sum of carried-forward end balances across accounts for each month.
/// Accounts with no history yet contribute nothing.
pub fn total_balance_by_month(
    summaries: &[AccountSummary],
    months: MonthRange,
) -> Vec<(YearMonth, Decimal)> {
    months
        .map(|m| {
            let total = summaries
                .iter()
                .filter_map(|s| latest_balance_at_or_before(&s.monthly_balances, m))
                .map(|mb| mb.end_balance)
                .sum();
            (m, total)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Balance change
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceChange {
    pub delta: Decimal,
    /// Percent of the starting balance, 2dp. Zero when the start balance is zero.
    pub percentage: Decimal,
}

/// Change over the window ending at the account's last month of history.
pub fn balance_change(timescale: Timescale, summary: &AccountSummary) -> BalanceChange {
    balance_change_at(timescale, summary, summary.monthly_balances.end_year_month)
}

/// Change over the window ending at `reference`.
///
/// The start balance is zero for `All`; otherwise it is the end balance of the
/// first entry on or after the window start, or zero when there is none (no
/// carry-forward here). The end balance is the latest entry at or before
/// `reference`, falling back to the account's current balance.
pub fn balance_change_at(
    timescale: Timescale,
    summary: &AccountSummary,
    reference: YearMonth,
) -> BalanceChange {
    let history = &summary.monthly_balances;

    let start_balance = match nominal_start(timescale, reference) {
        None => Decimal::ZERO,
        Some(window_start) => {
            let mut oldest_first: Vec<&MonthlyBalance> = history.monthly_balances.iter().collect();
            oldest_first.sort_by(|a, b| a.year_month.cmp(&b.year_month));
            oldest_first
                .into_iter()
                .find(|mb| mb.year_month >= window_start)
                .map_or(Decimal::ZERO, |mb| mb.end_balance)
        }
    };

    let end_balance = latest_balance_at_or_before(history, reference)
        .map_or(summary.balance, |mb| mb.end_balance);

    let delta = end_balance - start_balance;
    let percentage = if start_balance.is_zero() {
        Decimal::ZERO
    } else {
        (delta / start_balance * Decimal::ONE_HUNDRED).round_dp(2)
    };

    BalanceChange { delta, percentage }
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

pub fn sum_account_balances(summaries: &[AccountSummary]) -> Decimal {
    summaries.iter().map(|s| s.balance).sum()
}

/// Total net change (the `monthly_balance` field) across all accounts within
/// the window ending at the latest month any account has data for.
pub fn sum_monthly_balances(summaries: &[AccountSummary], timescale: Timescale) -> Decimal {
    match summaries
        .iter()
        .map(|s| s.monthly_balances.end_year_month)
        .max()
    {
        Some(reference) => sum_monthly_balances_at(summaries, timescale, reference),
        None => Decimal::ZERO,
    }
}

/// Net change over months strictly after the window start and at or before
/// `reference`. `All` has no lower limit.
pub fn sum_monthly_balances_at(
    summaries: &[AccountSummary],
    timescale: Timescale,
    reference: YearMonth,
) -> Decimal {
    let window_start = nominal_start(timescale, reference);
    summaries
        .iter()
        .flat_map(|s| s.monthly_balances.monthly_balances.iter())
        .filter(|mb| window_start.map_or(true, |start| mb.year_month > start))
        .filter(|mb| mb.year_month <= reference)
        .map(|mb| mb.monthly_balance)
        .sum()
}
