use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use moneygraph::inflation::{adjust_chart_data_for_inflation, InflationRates};
use moneygraph::loader::load_series_csv;
use moneygraph::series::{DateLabelFormat, SeriesCache, SeriesSpec};
use moneygraph::settings::{load_settings, shellexpand_path};

use super::{parse_series_spec, require_snapshot, resolve_data_file};

pub struct ChartArgs {
    pub file: Option<String>,
    pub series_csv: Option<String>,
    pub keys: Vec<String>,
    pub format: Option<DateLabelFormat>,
    pub inflation_year: Option<i32>,
}

pub fn run(args: ChartArgs) -> Result<()> {
    let settings = load_settings();
    let mut points = Vec::new();
    let mut rates = InflationRates::new();

    let has_snapshot = resolve_data_file(args.file.clone(), &settings).is_some();
    if has_snapshot {
        let snapshot = require_snapshot(args.file, &settings)?;
        points.extend(snapshot.data_series);
        rates = snapshot.inflation_rates;
    }
    if let Some(csv) = &args.series_csv {
        let path = PathBuf::from(shellexpand_path(csv));
        let extra = load_series_csv(&path)
            .with_context(|| format!("reading series CSV {}", path.display()))?;
        points.extend(extra);
    } else if !has_snapshot {
        bail!("no data: pass --file, --series-csv, or set data_file in settings");
    }

    let cache = SeriesCache::from_points(points);
    let specs: Vec<SeriesSpec> = if args.keys.is_empty() {
        cache.keys().map(SeriesSpec::from).collect()
    } else {
        args.keys.iter().map(|k| parse_series_spec(k)).collect()
    };

    let format = args.format.unwrap_or(settings.label_format);
    let mut chart = cache.chart_data(&specs, format)?;
    if let Some(year) = args.inflation_year.or(settings.inflation_reference_year) {
        if !rates.is_loaded() {
            bail!("inflation adjustment needs inflationRates in the snapshot");
        }
        chart = adjust_chart_data_for_inflation(&chart, year, format, &rates);
    }

    println!("{}", serde_json::to_string_pretty(&chart)?);
    Ok(())
}
