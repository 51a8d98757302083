pub mod balances;
pub mod chart;
pub mod history;
pub mod months;
pub mod settings;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use moneygraph::loader::{load_snapshot, Snapshot};
use moneygraph::series::{DateLabelFormat, SeriesSpec};
use moneygraph::settings::{shellexpand_path, Settings};
use moneygraph::Timescale;

#[derive(Parser)]
#[command(
    name = "moneygraph",
    about = "Balance history and chart series for a personal-finance dashboard."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the month keys covered by a timescale window.
    Months {
        /// Reference month: YYYY-MM
        reference: String,
        /// Timescale: all, 1m, 3m, 6m, 1y, 2y, 5y
        #[arg(long, default_value = "1y")]
        timescale: Timescale,
        /// Earliest month allowed: YYYY-MM
        #[arg(long)]
        min: Option<String>,
        /// Latest month allowed: YYYY-MM
        #[arg(long)]
        max: Option<String>,
    },
    /// Show account balances and how they changed over a window.
    Balances {
        /// Snapshot JSON (default: data_file from settings)
        #[arg(long)]
        file: Option<String>,
        /// Timescale: all, 1m, 3m, 6m, 1y, 2y, 5y
        #[arg(long)]
        timescale: Option<Timescale>,
    },
    /// Show the combined balance of all accounts month by month.
    History {
        /// Snapshot JSON (default: data_file from settings)
        #[arg(long)]
        file: Option<String>,
        /// Timescale: all, 1m, 3m, 6m, 1y, 2y, 5y
        #[arg(long)]
        timescale: Option<Timescale>,
    },
    /// Print data series aligned for charting, as JSON.
    Chart {
        /// Snapshot JSON (default: data_file from settings)
        #[arg(long)]
        file: Option<String>,
        /// Extra series from a CSV with a Date column (dd/mm/yyyy)
        #[arg(long = "series-csv")]
        series_csv: Option<String>,
        /// Series key to plot, optionally with a color: key or key=#RRGGBB (repeatable)
        #[arg(long = "key")]
        keys: Vec<String>,
        /// Axis labels: month-year, tax-year, year
        #[arg(long)]
        format: Option<DateLabelFormat>,
        /// Restate values in this year's money
        #[arg(long = "inflation-year")]
        inflation_year: Option<i32>,
    },
    /// Show the effective settings.
    Settings {
        /// Write a settings file with default values if none exists
        #[arg(long)]
        init: bool,
    },
}

/// `--file` wins over the settings file's `data_file`.
pub(crate) fn resolve_data_file(file: Option<String>, settings: &Settings) -> Option<PathBuf> {
    file.or_else(|| settings.data_file.clone())
        .map(|p| PathBuf::from(shellexpand_path(&p)))
}

pub(crate) fn require_snapshot(file: Option<String>, settings: &Settings) -> Result<Snapshot> {
    let Some(path) = resolve_data_file(file, settings) else {
        bail!("no data file: pass --file or set data_file in settings");
    };
    load_snapshot(&path).with_context(|| format!("reading snapshot {}", path.display()))
}

pub(crate) fn parse_series_spec(raw: &str) -> SeriesSpec {
    match raw.split_once('=') {
        Some((key, color)) if !color.trim().is_empty() => {
            SeriesSpec::with_color(key.trim(), color.trim())
        }
        Some((key, _)) => SeriesSpec::from(key.trim()),
        None => SeriesSpec::from(raw.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_series_spec() {
        assert_eq!(parse_series_spec("house"), SeriesSpec::from("house"));
        assert_eq!(
            parse_series_spec("house=#FF0000"),
            SeriesSpec::with_color("house", "#FF0000")
        );
        assert_eq!(parse_series_spec("house="), SeriesSpec::from("house"));
    }

    #[test]
    fn test_resolve_data_file_prefers_flag() {
        let settings = Settings {
            data_file: Some("/from/settings.json".to_string()),
            ..Settings::default()
        };
        assert_eq!(
            resolve_data_file(Some("/from/flag.json".to_string()), &settings),
            Some(PathBuf::from("/from/flag.json"))
        );
        assert_eq!(
            resolve_data_file(None, &settings),
            Some(PathBuf::from("/from/settings.json"))
        );
        assert_eq!(resolve_data_file(None, &Settings::default()), None);
    }
}
