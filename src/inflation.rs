use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::series::{ChartData, DateLabelFormat};

/// Annual inflation rates by calendar year, as fractions (0.03 is 3%).
/// Years may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<i32, f64>", into = "BTreeMap<i32, f64>")]
pub struct InflationRates {
    rates: BTreeMap<i32, f64>,
    loaded: bool,
}

impl InflationRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rates(rates: impl IntoIterator<Item = (i32, f64)>) -> Self {
        let mut table = Self::new();
        table.load(rates.into_iter().collect());
        table
    }

    /// Replace the table contents.
    pub fn load(&mut self, rates: BTreeMap<i32, f64>) {
        self.rates = rates;
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn rate(&self, year: i32) -> Option<f64> {
        self.rates.get(&year).copied()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.rates.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    fn factor(&self, year: i32) -> Option<f64> {
        match self.rate(year) {
            Some(rate) => Some(1.0 + rate),
            None => {
                warn!(year, loaded = self.loaded, "no inflation rate for year; amount left unchanged for it");
                None
            }
        }
    }
}

impl From<BTreeMap<i32, f64>> for InflationRates {
    fn from(rates: BTreeMap<i32, f64>) -> Self {
        Self {
            rates,
            loaded: true,
        }
    }
}

impl From<InflationRates> for BTreeMap<i32, f64> {
    fn from(table: InflationRates) -> Self {
        table.rates
    }
}

/// Restate `amount` from `source_year` money into `target_year` money.
///
/// Going forward multiplies by `1 + rate` for each year from `source_year` up
/// to but excluding `target_year`. Going back divides by `1 + rate` for each
/// year from `source_year` down to but excluding `target_year`. Missing years
/// are skipped with a warning.
pub fn adjust_for_inflation(
    amount: f64,
    source_year: i32,
    target_year: i32,
    rates: &InflationRates,
) -> f64 {
    match source_year.cmp(&target_year) {
        Ordering::Equal => amount,
        Ordering::Less => (source_year..target_year)
            .filter_map(|year| rates.factor(year))
            .fold(amount, |acc, factor| acc * factor),
        Ordering::Greater => ((target_year + 1)..=source_year)
            .rev()
            .filter_map(|year| rates.factor(year))
            .fold(amount, |acc, factor| acc / factor),
    }
}

/// Restate every point of `chart` into `reference_year` money, reading each
/// point's year from its axis label. Points whose label has no usable year,
/// and gaps, pass through unchanged.
pub fn adjust_chart_data_for_inflation(
    chart: &ChartData,
    reference_year: i32,
    format: DateLabelFormat,
    rates: &InflationRates,
) -> ChartData {
    let years: Vec<Option<i32>> = chart.labels.iter().map(|l| format.parse_year(l)).collect();
    let mut adjusted = chart.clone();
    for dataset in &mut adjusted.datasets {
        for (slot, year) in dataset.data.iter_mut().zip(&years) {
            if let (Some(value), Some(year)) = (slot.as_mut(), year) {
                *value = adjust_for_inflation(*value, *year, reference_year, rates);
            }
        }
    }
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ChartDataset;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn table() -> InflationRates {
        InflationRates::from_rates([(2020, 0.05), (2021, 0.03)])
    }

    #[test]
    fn test_same_year_is_identity() {
        assert_eq!(adjust_for_inflation(123.45, 2021, 2021, &table()), 123.45);
    }

    #[test]
    fn test_forward_chains_rates() {
        let v = adjust_for_inflation(100.0, 2020, 2022, &table());
        assert!(close(v, 108.15), "{v}");
    }

    #[test]
    fn test_backward_divides_descending() {
        // 2022 has no rate and is skipped; only 2021 applies
        let v = adjust_for_inflation(103.0, 2022, 2020, &table());
        assert!(close(v, 100.0), "{v}");
        let v = adjust_for_inflation(108.15, 2021, 2019, &table());
        assert!(close(v, 108.15 / 1.03 / 1.05), "{v}");
    }

    #[test]
    fn test_missing_years_leave_amount_unchanged() {
        let v = adjust_for_inflation(50.0, 2010, 2015, &table());
        assert_eq!(v, 50.0);
        let v = adjust_for_inflation(50.0, 2010, 2015, &InflationRates::new());
        assert_eq!(v, 50.0);
    }

    #[test]
    fn test_table_from_json_with_string_years() {
        let rates: InflationRates = serde_json::from_str(r#"{"2020": 0.05, "2021": 0.03}"#).unwrap();
        assert!(rates.is_loaded());
        assert_eq!(rates.rate(2021), Some(0.03));
        assert_eq!(rates.rate(2022), None);
        assert_eq!(rates.years().collect::<Vec<_>>(), vec![2020, 2021]);
        assert!(!InflationRates::new().is_loaded());
    }

    #[test]
    fn test_adjust_chart_data() {
        let chart = ChartData {
            labels: vec!["2020".to_string(), "n/a".to_string(), "2022".to_string()],
            datasets: vec![ChartDataset {
                label: "savings".to_string(),
                data: vec![Some(100.0), Some(7.0), None],
                color: "#000000".to_string(),
            }],
        };
        let adjusted = adjust_chart_data_for_inflation(&chart, 2022, DateLabelFormat::Year, &table());
        let data = &adjusted.datasets[0].data;
        assert!(close(data[0].unwrap(), 108.15));
        assert_eq!(data[1], Some(7.0));
        assert_eq!(data[2], None);
        assert_eq!(adjusted.labels, chart.labels);
        // input untouched
        assert_eq!(chart.datasets[0].data[0], Some(100.0));
    }

    #[test]
    fn test_adjust_chart_data_tax_year_labels() {
        let chart = ChartData {
            labels: vec!["2020/21".to_string(), "2021/22".to_string()],
            datasets: vec![ChartDataset {
                label: "isa".to_string(),
                data: vec![Some(100.0), Some(100.0)],
                color: "#000000".to_string(),
            }],
        };
        let adjusted = adjust_chart_data_for_inflation(&chart, 2021, DateLabelFormat::TaxYear, &table());
        assert!(close(adjusted.datasets[0].data[0].unwrap(), 105.0));
        assert_eq!(adjusted.datasets[0].data[1], Some(100.0));
    }
}
