use serde::Serialize;

use crate::bruteforce::BruteForce;
use crate::error::{Error, Result};
use crate::knapsack::Knapsack;

/// A share that can be bought once, at `cost`, yielding `profit_rate` percent
/// of that cost at the end of the holding period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    pub cost: f64,
    pub profit_rate: f64,
}

impl Share {
    pub fn new(label: impl Into<String>, cost: f64, profit_rate: f64) -> Self {
        Self {
            label: label.into(),
            cost,
            profit_rate,
        }
    }

    /// Absolute profit, proportional to the amount invested.
    pub fn profit(&self) -> f64 {
        self.cost * self.profit_rate / 100.0
    }
}

pub fn total_cost(shares: &[Share]) -> f64 {
    shares.iter().map(|s| s.cost).sum()
}

pub fn total_profit(shares: &[Share]) -> f64 {
    shares.iter().map(Share::profit).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub selection: Vec<Share>,
    pub total_profit: f64,
}

impl OptimizationResult {
    /// "No feasible investment": nothing selected, nothing earned.
    pub fn empty() -> Self {
        Self {
            selection: Vec::new(),
            total_profit: 0.0,
        }
    }

    pub fn total_cost(&self) -> f64 {
        total_cost(&self.selection)
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }
}

/// Picks the most profitable set of shares whose summed cost stays within `budget`.
pub trait Solver {
    fn name(&self) -> &'static str;

    fn solve(&self, shares: &[Share], budget: f64) -> Result<OptimizationResult>;
}

pub(crate) fn check_budget(budget: f64) -> Result<()> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(Error::InvalidBudget(budget));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Algorithm {
    /// Try every subset; exact but exponential.
    BruteForce,
    /// Knapsack table over a scaled budget grid.
    Dynamic,
}

impl Algorithm {
    pub fn build(self, brute_force: BruteForce, knapsack: Knapsack) -> Box<dyn Solver> {
        match self {
            Algorithm::BruteForce => Box::new(brute_force),
            Algorithm::Dynamic => Box::new(knapsack),
        }
    }
}
