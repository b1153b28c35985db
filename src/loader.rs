use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::share::Share;

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Drop rows whose cost is below zero instead of handing them to the solver.
    pub reject_negative_cost: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            reject_negative_cost: true,
        }
    }
}

// Columns are matched by position, header names are ignored.
#[derive(Debug, Deserialize)]
struct ShareCsvRow {
    label: String,
    cost: String,
    profit: String,
}

pub fn read_shares_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Vec<Share>> {
    let csv_file = File::open(path.as_ref())?;
    read_shares(csv_file, options)
}

pub fn read_shares<R: Read>(reader: R, options: &LoadOptions) -> Result<Vec<Share>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut shares = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() < 3 {
            return Err(Error::Parse {
                line,
                field: "row",
                value: record.iter().collect::<Vec<_>>().join(","),
            });
        }
        let row: ShareCsvRow = record.deserialize(None)?;
        let cost = parse_number(line, "cost", &row.cost)?;
        let profit_rate = parse_number(line, "profit", &row.profit)?;

        if options.reject_negative_cost && cost < 0.0 {
            warn!(line, label = %row.label, cost, "skipping share with negative cost");
            skipped += 1;
            continue;
        }
        shares.push(Share::new(row.label, cost, profit_rate));
    }
    debug!(loaded = shares.len(), skipped, "read shares");
    Ok(shares)
}

fn parse_number(line: u64, field: &'static str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::Parse {
            line,
            field,
            value: value.to_string(),
        }),
    }
}
