use serde::{Deserialize, Serialize};

/// A report of a strategy's performance against buy-and-hold.
///
/// Percentages are expressed in points (12.5 means 12.5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Number of periods in the compounded paths.
    pub periods: usize,

    // I. Profitability
    pub final_value: f64,
    pub total_return_pct: f64,
    pub buy_hold_final_value: f64,
    pub buy_hold_return_pct: f64,
    /// Strategy return minus buy-and-hold return, in points.
    pub excess_return_pct: f64,

    // II. Risk and Drawdown
    pub max_drawdown_pct: f64,
    pub buy_hold_max_drawdown_pct: f64,
    pub sharpe_ratio: Option<f64>, // None with fewer than two returns

    // III. Exposure
    pub time_in_market_pct: f64,
}

impl PerformanceReport {
    /// Creates a report for an empty run: both paths never leave 1.0.
    pub fn new() -> Self {
        Self {
            periods: 0,
            final_value: 1.0,
            total_return_pct: 0.0,
            buy_hold_final_value: 1.0,
            buy_hold_return_pct: 0.0,
            excess_return_pct: 0.0,
            max_drawdown_pct: 0.0,
            buy_hold_max_drawdown_pct: 0.0,
            sharpe_ratio: None,
            time_in_market_pct: 0.0,
        }
    }
}

impl Default for PerformanceReport {
    fn default() -> Self {
        Self::new()
    }
}
