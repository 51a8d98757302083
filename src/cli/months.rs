use anyhow::{Context, Result};
use moneygraph::window::months_in_window;
use moneygraph::{BoundedMonth, Timescale, YearMonth};

fn parse_bound(raw: Option<&str>, flag: &str) -> Result<Option<YearMonth>> {
    raw.map(|s| s.parse::<YearMonth>().with_context(|| format!("invalid --{flag}")))
        .transpose()
}

pub fn run(reference: &str, timescale: Timescale, min: Option<&str>, max: Option<&str>) -> Result<()> {
    let month: BoundedMonth = reference
        .parse()
        .with_context(|| format!("invalid reference month {reference:?}"))?;
    let month = month
        .attach_bounds(parse_bound(min, "min")?, parse_bound(max, "max")?)
        .context("invalid --min/--max")?
        .clamp();

    for m in months_in_window(&month, timescale)? {
        println!("{m}");
    }
    Ok(())
}
