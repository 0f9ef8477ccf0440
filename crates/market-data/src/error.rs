use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to open '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: close {value} is not a positive finite price")]
    InvalidPrice { row: usize, value: f64 },

    #[error("Date {0} appears more than once")]
    DuplicateDate(NaiveDate),
}
