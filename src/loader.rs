//! Reads the data-access layer's exports: a JSON snapshot of account summaries,
//! data series and inflation rates, plus CSV files of dated series values.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::error::{MoneygraphError, Result};
use crate::inflation::InflationRates;
use crate::models::{AccountSummary, DataSeriesPoint};
use crate::series::SeriesCache;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub account_summaries: Vec<AccountSummary>,
    #[serde(default)]
    pub data_series: Vec<DataSeriesPoint>,
    #[serde(default)]
    pub inflation_rates: InflationRates,
}

impl Snapshot {
    pub fn series_cache(&self) -> SeriesCache {
        SeriesCache::from_points(self.data_series.clone())
    }
}

pub fn read_snapshot<R: Read>(reader: R) -> Result<Snapshot> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let file = std::fs::File::open(path)?;
    let snapshot = read_snapshot(std::io::BufReader::new(file))?;
    info!(
        path = %path.display(),
        accounts = snapshot.account_summaries.len(),
        points = snapshot.data_series.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Parse a `dd/mm/yyyy` date into an ISO timestamp at midnight.
fn parse_date_dmy(raw: &str) -> Result<String> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y")
        .map(|d| d.format("%Y-%m-%dT00:00:00").to_string())
        .map_err(|_| MoneygraphError::Parse(format!("invalid date {raw:?} (expected dd/mm/yyyy)")))
}

/// Read a wide CSV: a `Date` column plus one column per series key. Empty
/// cells are skipped.
pub fn read_series_csv<R: Read>(reader: R) -> Result<Vec<DataSeriesPoint>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let date_col = headers
        .iter()
        .position(|h| h == "Date")
        .ok_or_else(|| MoneygraphError::Parse("CSV has no Date column".to_string()))?;

    let mut points = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let date_time = parse_date_dmy(record.get(date_col).unwrap_or_default())?;
        for (i, cell) in record.iter().enumerate() {
            if i == date_col || cell.is_empty() {
                continue;
            }
            let key = headers.get(i).unwrap_or_default();
            let value = Decimal::from_str_exact(&cell.replace(',', "")).map_err(|_| {
                MoneygraphError::Parse(format!("invalid value {cell:?} for {key} on {date_time}"))
            })?;
            points.push(DataSeriesPoint {
                id: None,
                date_time: date_time.clone(),
                key: key.to_string(),
                value,
            });
        }
    }
    Ok(points)
}

pub fn load_series_csv(path: &Path) -> Result<Vec<DataSeriesPoint>> {
    let file = std::fs::File::open(path)?;
    let points = read_series_csv(file)?;
    info!(path = %path.display(), points = points.len(), "loaded series CSV");
    Ok(points)
}
