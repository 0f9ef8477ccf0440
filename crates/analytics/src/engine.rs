use crate::error::AnalyticsError;
use crate::report::PerformanceReport;
use core_types::Exposure;

/// A stateless calculator for deriving performance metrics from compounded paths.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsEngine {
    periods_per_year: u32,
    risk_free_rate: f64,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(252, 0.0)
    }
}

impl AnalyticsEngine {
    /// `risk_free_rate` is annual; it is spread evenly across `periods_per_year`.
    pub fn new(periods_per_year: u32, risk_free_rate: f64) -> Self {
        Self {
            periods_per_year,
            risk_free_rate,
        }
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `strategy_returns` - Per-period strategy returns (first entry is the
    ///   period with no prior bar and is normally 0.0).
    /// * `exposures` - Exposure decided at each bar, held over the next period.
    /// * `strategy_pnl` - The strategy's compounded value path.
    /// * `buy_hold_pnl` - The buy-and-hold compounded value path.
    ///
    /// All four series must have the same length.
    pub fn calculate(
        &self,
        strategy_returns: &[f64],
        exposures: &[Exposure],
        strategy_pnl: &[f64],
        buy_hold_pnl: &[f64],
    ) -> Result<PerformanceReport, AnalyticsError> {
        let periods = strategy_pnl.len();
        check_len("strategy_returns", periods, strategy_returns.len())?;
        check_len("exposures", periods, exposures.len())?;
        check_len("buy_hold_pnl", periods, buy_hold_pnl.len())?;

        let mut report = PerformanceReport::new();
        if periods == 0 {
            return Ok(report);
        }

        report.periods = periods;
        report.final_value = strategy_pnl[periods - 1];
        report.buy_hold_final_value = buy_hold_pnl[periods - 1];
        report.total_return_pct = (report.final_value - 1.0) * 100.0;
        report.buy_hold_return_pct = (report.buy_hold_final_value - 1.0) * 100.0;
        report.excess_return_pct = report.total_return_pct - report.buy_hold_return_pct;

        report.max_drawdown_pct = self.max_drawdown_pct(strategy_pnl);
        report.buy_hold_max_drawdown_pct = self.max_drawdown_pct(buy_hold_pnl);
        report.sharpe_ratio = self.sharpe_ratio(strategy_returns);
        report.time_in_market_pct = time_in_market_pct(exposures);

        tracing::debug!("Performance report: {:?}", report);
        Ok(report)
    }

    /// Annualized Sharpe ratio of periodic returns.
    ///
    /// Uses the sample standard deviation. Returns `None` with fewer than two
    /// returns and `Some(0.0)` when the returns have no dispersion.
    pub fn sharpe_ratio(&self, returns: &[f64]) -> Option<f64> {
        if returns.len() < 2 {
            return None;
        }

        let per_period_rf = self.risk_free_rate / f64::from(self.periods_per_year);
        let n = returns.len() as f64;

        let mean = returns.iter().map(|r| r - per_period_rf).sum::<f64>() / n;
        let variance = returns
            .iter()
            .map(|r| {
                let d = r - per_period_rf - mean;
                d * d
            })
            .sum::<f64>()
            / (n - 1.0);
        let std_dev = variance.sqrt();

        if std_dev == 0.0 {
            return Some(0.0);
        }
        Some(mean / std_dev * f64::from(self.periods_per_year).sqrt())
    }

    /// Largest peak-to-trough decline of a value path, in percent of the peak.
    pub fn max_drawdown_pct(&self, values: &[f64]) -> f64 {
        let Some(&first) = values.first() else {
            return 0.0;
        };

        let mut peak = first;
        let mut max_drawdown = 0.0_f64;
        for &value in values {
            if value > peak {
                peak = value;
            }
            if peak > 0.0 {
                max_drawdown = max_drawdown.max((peak - value) / peak);
            }
        }
        max_drawdown * 100.0
    }
}

fn check_len(name: &'static str, expected: usize, actual: usize) -> Result<(), AnalyticsError> {
    if expected != actual {
        return Err(AnalyticsError::LengthMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Share of holding periods spent long. The last exposure has no following
/// period, so it is not counted.
fn time_in_market_pct(exposures: &[Exposure]) -> f64 {
    if exposures.len() < 2 {
        return 0.0;
    }
    let held = &exposures[..exposures.len() - 1];
    let long = held.iter().filter(|e| e.is_long()).count();
    long as f64 / held.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sharpe_needs_two_returns() {
        let engine = AnalyticsEngine::default();
        assert_eq!(engine.sharpe_ratio(&[]), None);
        assert_eq!(engine.sharpe_ratio(&[0.01]), None);
    }

    #[test]
    fn sharpe_of_constant_returns_is_zero() {
        let engine = AnalyticsEngine::default();
        assert_eq!(engine.sharpe_ratio(&[0.01, 0.01, 0.01]), Some(0.0));
    }

    #[test]
    fn sharpe_uses_sample_std_and_annualizes() {
        let engine = AnalyticsEngine::new(4, 0.0);
        // mean 0.02, sample std 0.02 -> 1.0 per period, x sqrt(4) = 2.0
        let sharpe = engine.sharpe_ratio(&[0.0, 0.02, 0.04]).unwrap();
        assert!(approx(sharpe, 2.0), "{sharpe}");
    }

    #[test]
    fn sharpe_subtracts_per_period_risk_free_rate() {
        let engine = AnalyticsEngine::new(4, 0.04);
        // Excess returns: -0.01, 0.01, 0.03 -> mean 0.01, std 0.02 -> 0.5 x 2
        let sharpe = engine.sharpe_ratio(&[0.0, 0.02, 0.04]).unwrap();
        assert!(approx(sharpe, 1.0), "{sharpe}");
    }

    #[test]
    fn drawdown_tracks_running_peak() {
        let engine = AnalyticsEngine::default();
        let dd = engine.max_drawdown_pct(&[1.0, 1.2, 0.9, 1.5, 1.2]);
        assert!(approx(dd, 25.0), "{dd}");
        assert_eq!(engine.max_drawdown_pct(&[]), 0.0);
        assert_eq!(engine.max_drawdown_pct(&[1.0, 1.1, 1.2]), 0.0);
    }

    #[test]
    fn full_report() {
        let engine = AnalyticsEngine::default();
        let strategy_returns = [0.0, 0.1, 0.0, -0.5];
        let exposures = [Exposure::Long, Exposure::Flat, Exposure::Long, Exposure::Long];
        let strategy_pnl = [1.0, 1.1, 1.1, 0.55];
        let buy_hold_pnl = [1.0, 1.1, 1.21, 0.605];

        let report = engine
            .calculate(&strategy_returns, &exposures, &strategy_pnl, &buy_hold_pnl)
            .unwrap();

        assert_eq!(report.periods, 4);
        assert!(approx(report.total_return_pct, -45.0));
        assert!(approx(report.buy_hold_return_pct, -39.5));
        assert!(approx(report.excess_return_pct, -5.5));
        assert!(approx(report.max_drawdown_pct, 50.0));
        assert!(approx(report.buy_hold_max_drawdown_pct, 50.0));
        assert!(approx(report.time_in_market_pct, 200.0 / 3.0));
        assert!(report.sharpe_ratio.is_some());
    }

    #[test]
    fn empty_series_gives_neutral_report() {
        let report = AnalyticsEngine::default().calculate(&[], &[], &[], &[]).unwrap();
        assert_eq!(report, PerformanceReport::new());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = AnalyticsEngine::default()
            .calculate(&[0.0], &[Exposure::Flat], &[1.0, 1.0], &[1.0, 1.0])
            .unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::LengthMismatch {
                name: "strategy_returns",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let json = serde_json::to_value(PerformanceReport::new()).unwrap();
        assert_eq!(json["periods"], 0);
        assert!(json["sharpe_ratio"].is_null());
    }
}
