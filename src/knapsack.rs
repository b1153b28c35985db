use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::share::{check_budget, OptimizationResult, Share, Solver};

/// Grid steps per currency unit; 100 means every cent is a column.
pub const DEFAULT_RESOLUTION: u32 = 100;
/// 50M cells of f64 is 400MB, well past any sane portfolio.
pub const DEFAULT_MAX_CELLS: usize = 50_000_000;

// Relative distance under which a scaled value counts as sitting on a grid point.
const SNAP_EPSILON: f64 = 1e-12;

/// 0/1 knapsack table over a scaled-integer budget axis.
///
/// Costs and the budget are multiplied by `resolution` and mapped to whole
/// grid steps: the budget rounds down and costs round up. Fractional amounts
/// finer than one grid step therefore make a share look slightly more
/// expensive. The chosen selection is re-checked against the real budget.
#[derive(Debug, Clone, Copy)]
pub struct Knapsack {
    pub resolution: u32,
    /// Upper bound on `(shares + 1) * (budget steps + 1)`, checked before allocating.
    pub max_cells: usize,
}

impl Default for Knapsack {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rounding {
    Down,
    Up,
}

fn grid_units(value: f64, resolution: u32, rounding: Rounding) -> f64 {
    let scaled = value * resolution as f64;
    let snapped = scaled.round();
    if (scaled - snapped).abs() <= SNAP_EPSILON * snapped.abs().max(1.0) {
        return snapped;
    }
    match rounding {
        Rounding::Down => scaled.floor(),
        Rounding::Up => scaled.ceil(),
    }
}

impl Knapsack {
    /// Highest table column and per-share column widths; `None` marks a
    /// share that can never fit. Columns past the summed cost of every share
    /// cannot change the answer, so the table stops there.
    fn layout(&self, shares: &[Share], budget: f64) -> Result<(usize, Vec<Option<usize>>)> {
        if let Some(share) = shares.iter().find(|s| s.cost < 0.0) {
            return Err(Error::NegativeCost {
                label: share.label.clone(),
            });
        }

        let units: Vec<f64> = shares
            .iter()
            .map(|s| grid_units(s.cost, self.resolution, Rounding::Up))
            .collect();
        let budget_units = grid_units(budget, self.resolution, Rounding::Down);
        let columns = budget_units.min(units.iter().sum());
        let cells = (shares.len() as f64 + 1.0) * (columns + 1.0);
        if cells > self.max_cells as f64 {
            return Err(Error::TableTooLarge {
                cells: cells as u128,
                limit: self.max_cells,
            });
        }
        let width = columns as usize;

        let costs = units
            .into_iter()
            .map(|u| (u <= width as f64).then_some(u as usize))
            .collect();
        Ok((width, costs))
    }
}

/// Indexes taken on the way back from `(rows - 1, column)`, last share first.
fn walk_back(knapsack: &[Vec<f64>], costs: &[Option<usize>], column: usize) -> Vec<usize> {
    let mut picked = Vec::new();
    let mut i = knapsack.len() - 1;
    let mut j = column;
    while i > 0 && j > 0 {
        if knapsack[i][j] != knapsack[i - 1][j] {
            if let Some(cost) = costs[i - 1] {
                picked.push(i - 1);
                j -= cost;
            }
        }
        i -= 1;
    }
    picked
}

impl Solver for Knapsack {
    fn name(&self) -> &'static str {
        "dynamic"
    }

    #[instrument(skip_all, fields(shares = shares.len(), budget = budget, resolution = self.resolution))]
    fn solve(&self, shares: &[Share], budget: f64) -> Result<OptimizationResult> {
        check_budget(budget)?;
        if self.resolution == 0 {
            return Err(Error::InvalidResolution);
        }
        if shares.is_empty() {
            return Ok(OptimizationResult::empty());
        }
        let (width, costs) = self.layout(shares, budget)?;
        if width == 0 {
            return Ok(OptimizationResult::empty());
        }
        debug!(rows = shares.len() + 1, columns = width + 1, "allocating knapsack table");

        let mut knapsack = vec![vec![0f64; width + 1]; shares.len() + 1];
        for i in 1..knapsack.len() {
            let profit = shares[i - 1].profit();
            for w in 1..=width {
                let exclude_item = knapsack[i - 1][w];
                knapsack[i][w] = match costs[i - 1] {
                    Some(cost) if cost <= w => {
                        let include_item = knapsack[i - 1][w - cost] + profit;
                        if include_item > exclude_item {
                            include_item
                        } else {
                            exclude_item
                        }
                    }
                    _ => exclude_item,
                };
            }
        }

        // Grid snapping and f64 summation can both push the real cost of a
        // column's selection past the budget; fall back one column at a time.
        // Column 0 is always the empty selection.
        let mut column = width;
        let picked = loop {
            let picked = walk_back(&knapsack, &costs, column);
            let cost: f64 = picked.iter().map(|&i| shares[i].cost).sum();
            if cost <= budget {
                break picked;
            }
            column -= 1;
        };
        if column < width {
            debug!(width, column, "stepped back to a column whose real cost fits");
        }

        Ok(OptimizationResult {
            selection: picked.into_iter().map(|i| shares[i].clone()).collect(),
            total_profit: knapsack[shares.len()][column],
        })
    }
}
