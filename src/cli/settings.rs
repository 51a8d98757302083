use anyhow::{Context, Result};
use moneygraph::settings::{load_settings, save_settings, settings_path};

pub fn run(init: bool) -> Result<()> {
    let path = settings_path();
    if init && !path.exists() {
        save_settings(&load_settings())
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    let settings = load_settings();
    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
