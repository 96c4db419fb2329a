use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid entry date {value:?} (expected dd/mm/yyyy)")]
    InvalidDateFormat { value: String },

    #[error("could not load the month of {target} after {attempts} extensions")]
    TargetMonthUnreachable { target: NaiveDate, attempts: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed entries file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
