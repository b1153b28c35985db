use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::share::{check_budget, OptimizationResult, Share, Solver};

pub const DEFAULT_MAX_SHARES: usize = 24;

/// Exhaustive search over every subset of the input.
#[derive(Debug, Clone, Copy)]
pub struct BruteForce {
    pub max_shares: usize,
}

impl Default for BruteForce {
    fn default() -> Self {
        Self {
            max_shares: DEFAULT_MAX_SHARES,
        }
    }
}

impl Solver for BruteForce {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    #[instrument(skip_all, fields(shares = shares.len(), budget = budget))]
    fn solve(&self, shares: &[Share], budget: f64) -> Result<OptimizationResult> {
        check_budget(budget)?;
        if shares.len() > self.max_shares {
            return Err(Error::TooManyShares {
                count: shares.len(),
                limit: self.max_shares,
            });
        }

        let mut best_profit = 0.0;
        let mut best: Vec<usize> = Vec::new();
        let mut visited = 0u64;
        for size in 0..=shares.len() {
            let mut combination = Combinations::new(shares.len(), size);
            while let Some(indexes) = combination.next_indexes() {
                visited += 1;
                let cost: f64 = indexes.iter().map(|&i| shares[i].cost).sum();
                if cost > budget {
                    continue;
                }
                let profit: f64 = indexes.iter().map(|&i| shares[i].profit()).sum();
                if profit > best_profit {
                    best_profit = profit;
                    best = indexes.to_vec();
                }
            }
        }
        debug!(visited, best_profit, "exhaustive search done");

        Ok(OptimizationResult {
            selection: best.into_iter().map(|i| shares[i].clone()).collect(),
            total_profit: best_profit,
        })
    }
}

/// Lexicographic `k`-of-`n` index combinations, reusing one buffer.
struct Combinations {
    n: usize,
    indexes: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indexes: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }

    fn next_indexes(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indexes.as_slice());
        }
        let k = self.indexes.len();
        // rightmost slot that can still move forward
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indexes[i] < self.n - k + i {
                break;
            }
        }
        self.indexes[i] += 1;
        for j in i + 1..k {
            self.indexes[j] = self.indexes[j - 1] + 1;
        }
        Some(self.indexes.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(n: usize, k: usize) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut c = Combinations::new(n, k);
        while let Some(idx) = c.next_indexes() {
            out.push(idx.to_vec());
        }
        out
    }

    #[test]
    fn combinations_are_lexicographic() {
        assert_eq!(
            all(4, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
        assert_eq!(all(3, 0), vec![Vec::<usize>::new()]);
        assert_eq!(all(3, 3), vec![vec![0, 1, 2]]);
        assert!(all(2, 3).is_empty());
    }

    #[test]
    fn picks_best_pair() {
        let shares = vec![
            Share::new("A", 100.0, 10.0),
            Share::new("B", 200.0, 15.0),
            Share::new("C", 300.0, 8.0),
        ];
        let result = BruteForce::default().solve(&shares, 300.0).unwrap();
        let labels: Vec<_> = result.selection.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert!((result.total_profit - 40.0).abs() < 1e-9);
    }

    #[test]
    fn considers_the_full_set() {
        let shares = vec![Share::new("A", 10.0, 10.0), Share::new("B", 20.0, 10.0)];
        let result = BruteForce::default().solve(&shares, 30.0).unwrap();
        assert_eq!(result.selection.len(), 2);
        assert!((result.total_profit - 3.0).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_first_found() {
        let shares = vec![Share::new("A", 10.0, 10.0), Share::new("B", 10.0, 10.0)];
        let result = BruteForce::default().solve(&shares, 10.0).unwrap();
        assert_eq!(result.selection, vec![shares[0].clone()]);
    }

    #[test]
    fn nothing_affordable() {
        let shares = vec![Share::new("A", 10.0, 10.0)];
        let result = BruteForce::default().solve(&shares, 5.0).unwrap();
        assert_eq!(result, OptimizationResult::empty());
    }

    #[test]
    fn size_guard() {
        let shares: Vec<_> = (0..5).map(|i| Share::new(format!("S{i}"), 1.0, 1.0)).collect();
        let solver = BruteForce { max_shares: 4 };
        assert!(matches!(
            solver.solve(&shares, 10.0),
            Err(Error::TooManyShares { count: 5, limit: 4 })
        ));
    }

    #[test]
    fn negative_cost_is_summed() {
        let shares = vec![Share::new("A", -5.0, 10.0), Share::new("B", 10.0, 10.0)];
        let result = BruteForce::default().solve(&shares, 5.0).unwrap();
        assert_eq!(result.selection.len(), 2);
        assert!(result.total_cost() <= 5.0);
    }

    #[test]
    fn rejects_negative_budget() {
        assert!(matches!(
            BruteForce::default().solve(&[], -1.0),
            Err(Error::InvalidBudget(_))
        ));
    }
}
