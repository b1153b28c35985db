use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: invalid {field} value {value:?}")]
    Parse {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("invalid budget {0}: must be a finite, non-negative amount")]
    InvalidBudget(f64),

    #[error("budget table would need {cells} cells, limit is {limit}")]
    TableTooLarge { cells: u128, limit: usize },

    #[error("{count} shares is too many for an exhaustive search (limit {limit})")]
    TooManyShares { count: usize, limit: usize },

    #[error("share {label:?} has a negative cost")]
    NegativeCost { label: String },

    #[error("grid resolution must be at least 1")]
    InvalidResolution,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
