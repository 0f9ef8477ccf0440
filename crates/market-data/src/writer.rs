use crate::error::DataError;
use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// One row of an exported backtest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub date: NaiveDate,
    pub close: f64,
    #[serde(rename = "return")]
    pub period_return: f64,
    pub exposure: f64,
    pub strategy_return: f64,
    pub strategy_pnl: f64,
    pub buy_hold_pnl: f64,
}

fn create(path: &Path) -> Result<Writer<File>, DataError> {
    let file = File::create(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Writer::from_writer(file))
}

/// Writes backtest rows with a header line.
pub fn write_series<P: AsRef<Path>>(path: P, rows: &[SeriesRow]) -> Result<(), DataError> {
    let path = path.as_ref();
    let mut writer = create(path)?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Writes a single named column of values.
pub fn write_values<P: AsRef<Path>>(path: P, header: &str, values: &[f64]) -> Result<(), DataError> {
    let path = path.as_ref();
    let mut writer = create(path)?;

    writer.write_record([header])?;
    for value in values {
        writer.write_record([value.to_string()])?;
    }
    writer.flush().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} values to {}", values.len(), path.display());
    Ok(())
}
