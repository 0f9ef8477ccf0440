use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Close")]
    pub close: f64,
}

impl PriceBar {
    /// Builds a bar, rejecting closes that cannot produce a meaningful return.
    pub fn new(date: NaiveDate, close: f64) -> Result<Self, CoreError> {
        if !close.is_finite() || close <= 0.0 {
            return Err(CoreError::InvalidInput(
                "close".to_string(),
                format!("{close} on {date} is not a positive finite price"),
            ));
        }
        Ok(Self { date, close })
    }
}
