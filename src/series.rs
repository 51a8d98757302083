use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::seeded_color;
use crate::error::{MoneygraphError, Result};
use crate::models::DataSeriesPoint;

// ---------------------------------------------------------------------------
// Dates and labels
// ---------------------------------------------------------------------------

/// Parse an ISO-8601 timestamp or bare date. Offsets are normalized to UTC.
pub fn parse_date_time(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| MoneygraphError::Parse(format!("unparseable date {raw:?}")))
}

/// Axis label styles. Each style knows how to print a date and how to read
/// the year back out of its own labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateLabelFormat {
    /// `MM/YYYY`
    MonthYear,
    /// `YYYY/YY`, UK tax years starting 6 April.
    #[default]
    TaxYear,
    /// `YYYY`
    Year,
}

fn month_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(0[1-9]|1[0-2])/(\d{4})$").unwrap())
}

fn tax_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})/(\d{2})$").unwrap())
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})$").unwrap())
}

/// First year of the UK tax year containing `date`.
pub fn tax_year_start(date: &NaiveDate) -> i32 {
    if (date.month(), date.day()) >= (4, 6) {
        date.year()
    } else {
        date.year() - 1
    }
}

impl DateLabelFormat {
    pub fn format(&self, dt: &NaiveDateTime) -> String {
        let date = dt.date();
        match self {
            DateLabelFormat::MonthYear => format!("{:02}/{:04}", date.month(), date.year()),
            DateLabelFormat::TaxYear => {
                let start = tax_year_start(&date);
                format!("{start:04}/{:02}", (start + 1).rem_euclid(100))
            }
            DateLabelFormat::Year => format!("{:04}", date.year()),
        }
    }

    /// Year a label refers to. Tax-year labels resolve to their first year.
    pub fn parse_year(&self, label: &str) -> Option<i32> {
        let label = label.trim();
        match self {
            DateLabelFormat::MonthYear => month_year_re()
                .captures(label)
                .and_then(|c| c[2].parse().ok()),
            DateLabelFormat::TaxYear => {
                let caps = tax_year_re().captures(label)?;
                let start: i32 = caps[1].parse().ok()?;
                let end: i32 = caps[2].parse().ok()?;
                ((start + 1).rem_euclid(100) == end).then_some(start)
            }
            DateLabelFormat::Year => year_re().captures(label).and_then(|c| c[1].parse().ok()),
        }
    }

    pub fn pattern(&self) -> &'static str {
        match self {
            DateLabelFormat::MonthYear => "MM/YYYY",
            DateLabelFormat::TaxYear => "YYYY/YY",
            DateLabelFormat::Year => "YYYY",
        }
    }

    fn token(&self) -> &'static str {
        match self {
            DateLabelFormat::MonthYear => "month-year",
            DateLabelFormat::TaxYear => "tax-year",
            DateLabelFormat::Year => "year",
        }
    }
}

impl fmt::Display for DateLabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for DateLabelFormat {
    type Err = MoneygraphError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        let all = [DateLabelFormat::MonthYear, DateLabelFormat::TaxYear, DateLabelFormat::Year];
        all.into_iter()
            .find(|f| f.token().eq_ignore_ascii_case(wanted) || f.pattern().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let expected: Vec<String> =
                    all.iter().map(|f| format!("{} ({})", f.token(), f.pattern())).collect();
                MoneygraphError::Parse(format!(
                    "unknown label format {wanted:?}, expected one of: {}",
                    expected.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Chart output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    /// One slot per axis label; `None` means no data, which is not zero.
    pub data: Vec<Option<f64>>,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.datasets.is_empty()
    }
}

/// A series to plot. Without a color the key's seeded color is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSpec {
    pub key: String,
    pub color: Option<String>,
}

impl SeriesSpec {
    pub fn with_color(key: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            color: Some(color.into()),
        }
    }
}

impl From<&str> for SeriesSpec {
    fn from(key: &str) -> Self {
        Self {
            key: key.to_string(),
            color: None,
        }
    }
}

impl From<String> for SeriesSpec {
    fn from(key: String) -> Self {
        Self { key, color: None }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NamedSeries<'a> {
    pub key: &'a str,
    pub points: &'a [DataSeriesPoint],
    pub color: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Align series onto one date axis labelled with `format`.
pub fn align_series(series: &[NamedSeries], format: DateLabelFormat) -> Result<ChartData> {
    align_series_with(series, |dt| format.format(dt))
}

/// Align series onto the sorted union of their dates, labelling each date with
/// `label`. A series has `None` wherever it has no point on an axis date.
/// When two points of one series share a date the first one wins.
pub fn align_series_with<F>(series: &[NamedSeries], label: F) -> Result<ChartData>
where
    F: Fn(&NaiveDateTime) -> String,
{
    if series.iter().all(|s| s.points.is_empty()) {
        return Ok(ChartData::default());
    }

    let mut parsed: Vec<HashMap<NaiveDateTime, f64>> = Vec::with_capacity(series.len());
    let mut axis: BTreeSet<NaiveDateTime> = BTreeSet::new();
    for s in series {
        let mut values = HashMap::with_capacity(s.points.len());
        for point in s.points {
            let at = parse_date_time(&point.date_time)?;
            axis.insert(at);
            let Some(value) = point.value.to_f64() else {
                warn!(key = s.key, value = %point.value, "value not representable as a number");
                continue;
            };
            values.entry(at).or_insert(value);
        }
        parsed.push(values);
    }

    let labels: Vec<String> = axis.iter().map(&label).collect();
    let datasets = series
        .iter()
        .zip(parsed)
        .map(|(s, values)| ChartDataset {
            label: s.key.to_string(),
            data: axis.iter().map(|at| values.get(at).copied()).collect(),
            color: s
                .color
                .map(str::to_string)
                .unwrap_or_else(|| seeded_color(s.key)),
        })
        .collect();

    debug!(points = axis.len(), series = series.len(), "aligned chart series");
    Ok(ChartData { labels, datasets })
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Data series grouped by key, filled once by [`SeriesCache::load`].
#[derive(Debug, Clone, Default)]
pub struct SeriesCache {
    series: BTreeMap<String, Vec<DataSeriesPoint>>,
    loaded: bool,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<DataSeriesPoint>) -> Self {
        let mut cache = Self::new();
        cache.load(points);
        cache
    }

    /// Replace the cache contents with `points`, grouped by key.
    pub fn load(&mut self, points: Vec<DataSeriesPoint>) {
        self.series.clear();
        for point in points {
            self.series.entry(point.key.clone()).or_default().push(point);
        }
        self.loaded = true;
        debug!(keys = self.series.len(), "data series cache loaded");
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Points for `key`; empty (with a warning) when the key is unknown.
    pub fn get(&self, key: &str) -> &[DataSeriesPoint] {
        if !self.loaded {
            warn!(key = key, "data series requested before the cache was loaded");
            return &[];
        }
        match self.series.get(key) {
            Some(points) => points,
            None => {
                warn!(key = key, "key not found in the data series cache");
                &[]
            }
        }
    }

    /// Points for all `keys`, concatenated in key order.
    pub fn get_many<S: AsRef<str>>(&self, keys: &[S]) -> Vec<DataSeriesPoint> {
        keys.iter()
            .flat_map(|k| self.get(k.as_ref()).iter().cloned())
            .collect()
    }

    pub fn chart_data(&self, specs: &[SeriesSpec], format: DateLabelFormat) -> Result<ChartData> {
        let series: Vec<NamedSeries> = specs
            .iter()
            .map(|spec| NamedSeries {
                key: &spec.key,
                points: self.get(&spec.key),
                color: spec.color.as_deref(),
            })
            .collect();
        align_series(&series, format)
    }
}
