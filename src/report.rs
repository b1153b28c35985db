use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use crate::error::Result;
use crate::share::{OptimizationResult, Share};

const LINE_WIDTH: usize = 75;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[1;31m";
const GREEN: &str = "\x1b[1;32m";
const YELLOW: &str = "\x1b[1;33m";
const BLUE: &str = "\x1b[1;34m";
const MAGENTA: &str = "\x1b[1;35m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub format: Format,
    pub color: bool,
    /// Holding period the profit rates refer to.
    pub horizon_years: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: Format::Text,
            color: true,
            horizon_years: 2,
        }
    }
}

impl ReportOptions {
    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn centered(&self, style: &str, text: &str) -> String {
        self.paint(style, &format!("{:^width$}", text, width = LINE_WIDTH))
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    algorithm: &'a str,
    selection: &'a [Share],
    total_cost: f64,
    total_profit: f64,
}

pub fn write_report<W: Write>(
    out: &mut W,
    algorithm: &str,
    result: &OptimizationResult,
    options: &ReportOptions,
) -> Result<()> {
    match options.format {
        Format::Json => {
            let report = JsonReport {
                algorithm,
                selection: &result.selection,
                total_cost: result.total_cost(),
                total_profit: result.total_profit,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        Format::Text => write_text(out, result, options)?,
    }
    Ok(())
}

fn write_text<W: Write>(out: &mut W, result: &OptimizationResult, options: &ReportOptions) -> Result<()> {
    if result.is_empty() {
        writeln!(
            out,
            "{}",
            options.paint(RED, "No feasible investment options within the given constraints.")
        )?;
        return Ok(());
    }

    let years = options.horizon_years;
    writeln!(out, "{}", options.centered(MAGENTA, "Best investment options:"))?;
    for share in &result.selection {
        writeln!(
            out,
            "- {} || {} || {}",
            options.paint(BLUE, &format!("Action: {}", share.label)),
            options.paint(GREEN, &format!("Cost per share: {:?} euros", share.cost)),
            options.paint(YELLOW, &format!("Profit after {years} years: {:?}%", share.profit_rate)),
        )?;
    }
    writeln!(
        out,
        "{}",
        options.centered(RED, &format!("Total cost: {:.2}", result.total_cost()))
    )?;
    writeln!(
        out,
        "{}",
        options.centered(
            RED,
            &format!("Total profit after {years} years: {:.2}", result.total_profit)
        )
    )?;
    Ok(())
}

/// Timing line printed after the report in text mode.
pub fn write_elapsed<W: Write>(out: &mut W, elapsed: Duration, options: &ReportOptions) -> Result<()> {
    if options.format == Format::Text {
        let text = format!("Elapsed time: {:.2} seconds", elapsed.as_secs_f64());
        writeln!(out, "{}", options.centered(MAGENTA, &text))?;
    }
    Ok(())
}
