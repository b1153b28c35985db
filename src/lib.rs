pub mod bruteforce;
pub mod error;
pub mod knapsack;
pub mod loader;
pub mod report;
pub mod share;

pub use error::{Error, Result};
pub use share::{Algorithm, OptimizationResult, Share, Solver};
