use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use share_picker::bruteforce::{BruteForce, DEFAULT_MAX_SHARES};
use share_picker::knapsack::{Knapsack, DEFAULT_MAX_CELLS, DEFAULT_RESOLUTION};
use share_picker::loader::{read_shares_from_path, LoadOptions};
use share_picker::report::{write_elapsed, write_report, Format, ReportOptions};
use share_picker::Algorithm;

#[derive(Debug, Parser)]
#[command(name = "share-picker")]
#[command(about = "Pick the most profitable set of shares that fits a budget")]
struct Args {
    /// CSV file with a header row and `label,cost,profit` rows.
    path: PathBuf,

    #[arg(long, default_value_t = 500.0)]
    budget: f64,

    #[arg(long, value_enum, default_value_t = Algorithm::Dynamic)]
    algorithm: Algorithm,

    /// Grid steps per currency unit for the dynamic solver.
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: u32,

    /// Largest knapsack table the dynamic solver may allocate.
    #[arg(long, default_value_t = DEFAULT_MAX_CELLS)]
    max_cells: usize,

    /// Largest input the brute-force solver accepts.
    #[arg(long, default_value_t = DEFAULT_MAX_SHARES)]
    max_shares: usize,

    /// Keep rows with a negative cost instead of dropping them.
    #[arg(long)]
    keep_negative_cost: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[arg(long)]
    no_color: bool,

    #[arg(long, default_value_t = 2)]
    horizon_years: u32,

    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .with_writer(std::io::stderr)
        .init();

    let start_time = Instant::now();

    let load_options = LoadOptions {
        reject_negative_cost: !args.keep_negative_cost,
    };
    let shares = read_shares_from_path(&args.path, &load_options)
        .with_context(|| format!("failed to load shares from {}", args.path.display()))?;

    let solver = args.algorithm.build(
        BruteForce {
            max_shares: args.max_shares,
        },
        Knapsack {
            resolution: args.resolution,
            max_cells: args.max_cells,
        },
    );
    let result = solver
        .solve(&shares, args.budget)
        .with_context(|| format!("{} solver failed", solver.name()))?;

    let report_options = ReportOptions {
        format: args.format,
        color: !args.no_color,
        horizon_years: args.horizon_years,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, solver.name(), &result, &report_options)?;

    let elapsed = start_time.elapsed();
    info!(
        algorithm = solver.name(),
        shares = shares.len(),
        selected = result.selection.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "done"
    );
    write_elapsed(&mut out, elapsed, &report_options)?;
    out.flush()?;
    Ok(())
}
