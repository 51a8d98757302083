use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "accountSummaries": [
        {
            "account": {
                "id": 1,
                "institution": "Monzo",
                "name": "Joint",
                "accountType": "currentAccount"
            },
            "balance": "1500.00",
            "monthlyBalances": {
                "accountId": 1,
                "startYearMonth": "2024-01",
                "endYearMonth": "2024-03",
                "monthlyBalances": [
                    {"yearMonth": "2024-01", "startBalance": "0", "monthlyBalance": "1000", "endBalance": "1000"},
                    {"yearMonth": "2024-02", "startBalance": "1000", "monthlyBalance": "200", "endBalance": "1200"},
                    {"yearMonth": "2024-03", "startBalance": "1200", "monthlyBalance": "300", "endBalance": "1500"}
                ]
            },
            "lastTransactionDate": "2024-03-28T09:30:00"
        }
    ],
    "dataSeries": [
        {"id": 1, "dateTime": "2023-05-01T00:00:00", "key": "house", "value": "250000"},
        {"id": 2, "dateTime": "2024-05-01T00:00:00", "key": "house", "value": "260000"}
    ],
    "inflationRates": {"2023": 0.04}
}"#;

/// A home directory with no settings file and a snapshot on disk.
fn setup() -> (TempDir, String) {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("snapshot.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    let path = path.to_string_lossy().to_string();
    (home, path)
}

fn moneygraph(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("moneygraph").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1").env_remove("MONEYGRAPH_LOG");
    cmd
}

#[test]
fn test_months_lists_window() {
    let (home, _) = setup();
    moneygraph(home.path())
        .args(["months", "2024-06", "--timescale", "3m"])
        .assert()
        .success()
        .stdout("2024-04\n2024-05\n2024-06\n");
}

#[test]
fn test_months_window_is_cut_at_min() {
    let (home, _) = setup();
    moneygraph(home.path())
        .args(["months", "2024-02", "--timescale", "6m", "--min", "2024-01", "--max", "2024-12"])
        .assert()
        .success()
        .stdout("2024-01\n2024-02\n");
}

#[test]
fn test_months_rejects_inverted_bounds() {
    let (home, _) = setup();
    moneygraph(home.path())
        .args(["months", "2024-06", "--min", "2024-12", "--max", "2024-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("later than maximum bound"));
}

#[test]
fn test_months_all_without_min_fails() {
    let (home, _) = setup();
    moneygraph(home.path())
        .args(["months", "2024-02", "--timescale", "all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_months_rejects_bad_reference() {
    let (home, _) = setup();
    moneygraph(home.path())
        .args(["months", "2024-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid reference month"));
}

#[test]
fn test_balances_table() {
    let (home, snapshot) = setup();
    moneygraph(home.path())
        .args(["balances", "--file", &snapshot, "--timescale", "3m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Joint"))
        .stdout(predicate::str::contains("£1,500.00"))
        .stdout(predicate::str::contains("+£500.00 (50.00%)"))
        .stdout(predicate::str::contains("28/03/2024"));
}

#[test]
fn test_balances_net_change_row_is_labelled() {
    let (home, snapshot) = setup();
    // default 1y window reaches back past the first month of history, so the
    // net monthly change (1,500) differs from the account's balance change (500)
    moneygraph(home.path())
        .args(["balances", "--file", &snapshot])
        .assert()
        .success()
        .stdout(predicate::str::contains("+£500.00 (50.00%)"))
        .stdout(predicate::str::contains("Net Monthly Change"))
        .stdout(predicate::str::contains("+£1,500.00"));
}

#[test]
fn test_balances_without_data_file_fails() {
    let (home, _) = setup();
    moneygraph(home.path())
        .arg("balances")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data file"));
}

#[test]
fn test_history_totals_by_month() {
    let (home, snapshot) = setup();
    moneygraph(home.path())
        .args(["history", "--file", &snapshot, "--timescale", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01"))
        .stdout(predicate::str::contains("£1,200.00"))
        .stdout(predicate::str::contains("+£300.00"));
}

#[test]
fn test_chart_json() {
    let (home, snapshot) = setup();
    let output = moneygraph(home.path())
        .args(["chart", "--file", &snapshot, "--key", "house=#112233", "--format", "year"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let chart: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(chart["labels"], serde_json::json!(["2023", "2024"]));
    assert_eq!(chart["datasets"][0]["label"], "house");
    assert_eq!(chart["datasets"][0]["color"], "#112233");
    assert_eq!(chart["datasets"][0]["data"][1], 260000.0);
}

#[test]
fn test_chart_inflation_adjusted() {
    let (home, snapshot) = setup();
    let output = moneygraph(home.path())
        .args(["chart", "--file", &snapshot, "--format", "year", "--inflation-year", "2024"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let chart: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = chart["datasets"][0]["data"][0].as_f64().unwrap();
    assert!((first - 260000.0).abs() < 1e-6, "{first}");
}

#[test]
fn test_chart_from_csv() {
    let (home, _) = setup();
    let csv = home.path().join("series.csv");
    std::fs::write(&csv, "Date,pension\n06/04/2023,1000\n05/04/2024,1100\n").unwrap();
    let output = moneygraph(home.path())
        .args(["chart", "--series-csv", csv.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let chart: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // both dates fall in the 2023/24 tax year
    assert_eq!(chart["labels"].as_array().unwrap().len(), 2);
    assert_eq!(chart["labels"][0], "2023/24");
    assert_eq!(chart["labels"][1], "2023/24");
}

#[test]
fn test_settings_init_writes_defaults() {
    let (home, _) = setup();
    moneygraph(home.path())
        .args(["settings", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"currency_symbol\": \"£\""));
    assert!(home.path().join(".config/moneygraph/settings.json").exists());
}
