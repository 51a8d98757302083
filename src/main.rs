mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MONEYGRAPH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Months {
            reference,
            timescale,
            min,
            max,
        } => cli::months::run(&reference, timescale, min.as_deref(), max.as_deref()),
        Commands::Balances { file, timescale } => cli::balances::run(file, timescale),
        Commands::History { file, timescale } => cli::history::run(file, timescale),
        Commands::Chart {
            file,
            series_csv,
            keys,
            format,
            inflation_year,
        } => cli::chart::run(cli::chart::ChartArgs {
            file,
            series_csv,
            keys,
            format,
            inflation_year,
        }),
        Commands::Settings { init } => cli::settings::run(init),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
