use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::balance::BalanceChange;
use crate::series::parse_date_time;

/// Format a decimal as a currency amount with thousands separators: £1,234.56
pub fn money(val: Decimal, symbol: &str) -> String {
    let negative = val.is_sign_negative() && !val.is_zero();
    format!("{}{symbol}{}", if negative { "-" } else { "" }, unsigned_amount(val))
}

/// Like [`money`] but always carries a sign: +£10.00 / -£10.00
pub fn signed_money(val: Decimal, symbol: &str) -> String {
    let sign = if val.is_sign_negative() && !val.is_zero() { '-' } else { '+' };
    format!("{sign}{symbol}{}", unsigned_amount(val))
}

fn unsigned_amount(val: Decimal) -> String {
    let cents = val
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let cents = format!("{cents:.2}");
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();
    format!("{with_commas}.{dec_part}")
}

/// "+£123.45 (4.56%)"; the percentage is left off when it is zero.
pub fn balance_change(change: &BalanceChange, symbol: &str) -> String {
    let amount = signed_money(change.delta, symbol);
    if change.percentage.is_zero() {
        amount
    } else {
        format!("{amount} ({:.2}%)", change.percentage)
    }
}

/// dd/mm/yyyy, or N/A when there is no usable date.
pub fn format_date(date_time: Option<&str>) -> String {
    date_time
        .and_then(|raw| parse_date_time(raw).ok())
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// "dd/mm/yyyy (N days ago)" counted back from `today`.
pub fn format_last_transaction_date(date_time: Option<&str>, today: NaiveDate) -> String {
    match date_time.and_then(|raw| parse_date_time(raw).ok()) {
        Some(dt) => {
            let days = (today - dt.date()).num_days();
            format!("{} ({days} days ago)", dt.format("%d/%m/%Y"))
        }
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(d("1234.56"), "£"), "£1,234.56");
        assert_eq!(money(d("-500.00"), "£"), "-£500.00");
        assert_eq!(money(d("0"), "£"), "£0.00");
        assert_eq!(money(d("1000000.99"), "$"), "$1,000,000.99");
        assert_eq!(money(d("42.1"), "£"), "£42.10");
        assert_eq!(money(d("2.005"), "£"), "£2.01");
    }

    #[test]
    fn test_signed_money() {
        assert_eq!(signed_money(d("12.5"), "£"), "+£12.50");
        assert_eq!(signed_money(d("-0.75"), "£"), "-£0.75");
        assert_eq!(signed_money(d("0.00"), "£"), "+£0.00");
    }

    #[test]
    fn test_balance_change_text() {
        let change = BalanceChange {
            delta: d("123.45"),
            percentage: d("4.56"),
        };
        assert_eq!(balance_change(&change, "£"), "+£123.45 (4.56%)");

        let loss = BalanceChange {
            delta: d("-1500"),
            percentage: d("-12.5"),
        };
        assert_eq!(balance_change(&loss, "£"), "-£1,500.00 (-12.50%)");

        let from_zero = BalanceChange {
            delta: d("80"),
            percentage: Decimal::ZERO,
        };
        assert_eq!(balance_change(&from_zero, "£"), "+£80.00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2024-02-27T10:00:00")), "27/02/2024");
        assert_eq!(format_date(Some("2024-02-27")), "27/02/2024");
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("garbage")), "N/A");
    }

    #[test]
    fn test_format_last_transaction_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            format_last_transaction_date(Some("2024-02-27T10:00:00"), today),
            "27/02/2024 (3 days ago)"
        );
        assert_eq!(format_last_transaction_date(None, today), "N/A");
    }
}
