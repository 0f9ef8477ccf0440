use crate::error::DataError;
use core_types::PriceBar;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ReturnRow {
    #[serde(rename = "Return")]
    value: f64,
}

fn open(path: &Path) -> Result<csv::Reader<File>, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ReaderBuilder::new().trim(Trim::All).from_reader(file))
}

/// Loads daily closes from a CSV file with `Date,Close` headers.
///
/// Rows are returned sorted by date. Non-positive or non-finite closes and
/// repeated dates are rejected; row numbers in errors count data rows from 1.
pub fn load_bars<P: AsRef<Path>>(path: P) -> Result<Vec<PriceBar>, DataError> {
    let path = path.as_ref();
    let mut reader = open(path)?;
    let mut bars = Vec::new();

    for (index, record) in reader.deserialize::<PriceBar>().enumerate() {
        let raw = record?;
        let bar = PriceBar::new(raw.date, raw.close).map_err(|_| DataError::InvalidPrice {
            row: index + 1,
            value: raw.close,
        })?;
        bars.push(bar);
    }

    bars.sort_by_key(|b| b.date);
    if let Some(w) = bars.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(DataError::DuplicateDate(w[0].date));
    }

    tracing::info!("Loaded {} bars from {}", bars.len(), path.display());
    Ok(bars)
}

/// Loads per-period returns from a CSV file with a single `Return` header.
///
/// Values are kept in file order and passed through as-is, NaN included.
pub fn load_returns<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, DataError> {
    let path = path.as_ref();
    let mut reader = open(path)?;

    let returns = reader
        .deserialize::<ReturnRow>()
        .map(|row| row.map(|r| r.value))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!("Loaded {} returns from {}", returns.len(), path.display());
    Ok(returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_and_sorts_bars() {
        let file = csv_file("Date,Close\n2024-01-03,102.0\n2024-01-02, 100.0\n");
        let bars = load_bars(file.path()).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].close, 100.0);
        assert_eq!(bars[1].close, 102.0);
    }

    #[test]
    fn rejects_non_positive_close() {
        let file = csv_file("Date,Close\n2024-01-02,100.0\n2024-01-03,0\n");
        match load_bars(file.path()) {
            Err(DataError::InvalidPrice { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, 0.0);
            }
            other => panic!("expected InvalidPrice, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_dates() {
        let file = csv_file("Date,Close\n2024-01-02,100.0\n2024-01-02,101.0\n");
        assert!(matches!(
            load_bars(file.path()),
            Err(DataError::DuplicateDate(_))
        ));
    }

    #[test]
    fn malformed_row_is_a_csv_error() {
        let file = csv_file("Date,Close\nyesterday,100.0\n");
        assert!(matches!(load_bars(file.path()), Err(DataError::Csv(_))));
    }

    #[test]
    fn missing_close_fails_the_whole_file() {
        let file = csv_file("Date,Close\n2024-01-02,100.0\n2024-01-03,\n2024-01-04,101.0\n");
        assert!(matches!(load_bars(file.path()), Err(DataError::Csv(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_bars("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }

    #[test]
    fn loads_returns_in_order_keeping_nan() {
        let file = csv_file("Return\n0.0\n0.1\nNaN\n-0.05\n");
        let returns = load_returns(file.path()).unwrap();

        assert_eq!(returns.len(), 4);
        assert_eq!(returns[1], 0.1);
        assert!(returns[2].is_nan());
        assert_eq!(returns[3], -0.05);
    }

    #[test]
    fn empty_returns_file_is_empty() {
        let file = csv_file("Return\n");
        assert!(load_returns(file.path()).unwrap().is_empty());
    }
}
