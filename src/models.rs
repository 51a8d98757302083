//! Shapes handed over by the data-access layer. Field names follow the
//! dashboard API's camelCase JSON; money is `Decimal` and travels as strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::month::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    CurrentAccount,
    Asset,
    CashIsa,
    CreditCard,
    IfIsa,
    JuniorIsa,
    Loan,
    Mortgage,
    Pension,
    SavingsAccount,
    ShareIsa,
    Stockbroker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountBehaviour {
    #[default]
    Standard,
    CrowdProperty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub institution: String,
    pub name: String,
    pub account_type: AccountType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_behaviour: Option<AccountBehaviour>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_active() -> bool {
    true
}

/// One month of an account's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBalance {
    pub year_month: YearMonth,
    pub start_balance: Decimal,
    /// Net change within the month.
    pub monthly_balance: Decimal,
    pub end_balance: Decimal,
    #[serde(default)]
    pub deposits_to_date: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBalanceResult {
    pub account_id: i64,
    pub monthly_balances: Vec<MonthlyBalance>,
    pub start_year_month: YearMonth,
    pub end_year_month: YearMonth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub account: Account,
    /// Current balance.
    pub balance: Decimal,
    pub monthly_balances: MonthlyBalanceResult,
    #[serde(default)]
    pub last_transaction_date: Option<String>,
}

/// A dated value in an ad-hoc key/value series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSeriesPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// ISO-8601 timestamp or date.
    pub date_time: String,
    pub key: String,
    pub value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_summary_from_api_json() {
        let json = r#"{
            "account": {
                "id": 7,
                "institution": "Monzo",
                "name": "Joint",
                "accountType": "currentAccount",
                "isActive": true
            },
            "balance": "1024.50",
            "monthlyBalances": {
                "accountId": 7,
                "startYearMonth": "2024-01",
                "endYearMonth": "2024-02",
                "monthlyBalances": [
                    {"yearMonth": "2024-01", "startBalance": "0", "monthlyBalance": "1000.00",
                     "endBalance": "1000.00", "depositsToDate": "1000.00"},
                    {"yearMonth": "2024-02", "startBalance": "1000.00", "monthlyBalance": "24.50",
                     "endBalance": "1024.50"}
                ]
            },
            "lastTransactionDate": "2024-02-27T10:00:00"
        }"#;
        let summary: AccountSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.account.account_type, AccountType::CurrentAccount);
        assert_eq!(summary.account.account_behaviour, None);
        assert_eq!(summary.balance, Decimal::from_str_exact("1024.50").unwrap());
        let balances = &summary.monthly_balances.monthly_balances;
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[1].deposits_to_date, Decimal::ZERO);
        assert_eq!(balances[1].year_month.to_string(), "2024-02");
    }

    #[test]
    fn test_money_serializes_as_string() {
        let point = DataSeriesPoint {
            id: None,
            date_time: "2024-04-06".to_string(),
            key: "house".to_string(),
            value: Decimal::from_str_exact("250000.10").unwrap(),
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["value"], serde_json::json!("250000.10"));
        assert_eq!(json["dateTime"], serde_json::json!("2024-04-06"));
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_inactive_account_flag_defaults_to_active() {
        let json = r#"{"id": 1, "institution": "HL", "name": "SIPP", "accountType": "pension"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert!(account.is_active);
        assert_eq!(account.account_type, AccountType::Pension);
    }
}
