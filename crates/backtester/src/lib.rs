use crate::error::BacktestError;
use analytics::{AnalyticsEngine, PerformanceReport};
use core_types::{Exposure, PriceBar};
use indicatif::{ProgressBar, ProgressStyle};
use pnl::compute_pnl_series;
use serde::Serialize;
use std::time::{Duration, Instant};
use strategies::Strategy;

pub mod error;

/// Everything a backtest produces, aligned by index with `bars`.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestResult {
    /// Bars after the strategy warm-up was dropped.
    pub bars: Vec<PriceBar>,
    /// Close-to-close returns; the first entry is 0.0.
    pub returns: Vec<f64>,
    pub exposures: Vec<Exposure>,
    /// Previous bar's exposure times this bar's return; the first entry is 0.0.
    pub strategy_returns: Vec<f64>,
    pub strategy_pnl: Vec<f64>,
    pub buy_hold_pnl: Vec<f64>,
    pub report: PerformanceReport,
    #[serde(with = "humantime_serde")]
    pub pnl_elapsed: Duration,
    #[serde(with = "humantime_serde")]
    pub reference_elapsed: Duration,
}

/// The backtesting engine for a single price series.
pub struct Backtester {
    strategy: Box<dyn Strategy>,
    analytics_engine: AnalyticsEngine,
}

impl Backtester {
    pub fn new(strategy: Box<dyn Strategy>, analytics_engine: AnalyticsEngine) -> Self {
        Self {
            strategy,
            analytics_engine,
        }
    }

    /// Runs the strategy over `bars` (sorted by date) and compounds the result.
    pub fn run(&mut self, bars: &[PriceBar]) -> Result<BacktestResult, BacktestError> {
        let warmup = self.strategy.warmup_period();
        if bars.len() <= warmup {
            return Err(BacktestError::NotEnoughData {
                needed: warmup + 1,
                available: bars.len(),
            });
        }

        let progress_bar = ProgressBar::new(bars.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        progress_bar.set_message("Evaluating strategy...");

        let mut exposures = Vec::with_capacity(bars.len());
        for bar in bars {
            exposures.push(self.strategy.evaluate(bar)?);
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        // Drop the rows whose indicators were still warming up.
        let bars = bars[warmup..].to_vec();
        let exposures = exposures.split_off(warmup);

        let returns = period_returns(&bars);
        let strategy_returns = strategy_returns(&exposures, &returns);

        let started = Instant::now();
        let strategy_pnl = compute_pnl_series(&strategy_returns);
        let pnl_elapsed = started.elapsed();

        let started = Instant::now();
        let reference = scan_reference(&strategy_returns);
        let reference_elapsed = started.elapsed();

        if let Some(index) = first_mismatch(&strategy_pnl, &reference) {
            return Err(BacktestError::Mismatch(index));
        }

        let buy_hold_pnl = compute_pnl_series(&returns);

        let report = self.analytics_engine.calculate(
            &strategy_returns,
            &exposures,
            &strategy_pnl,
            &buy_hold_pnl,
        )?;

        tracing::info!(
            "Backtest over {} bars ({} warm-up dropped): return {:.2}% vs buy-and-hold {:.2}%",
            bars.len(),
            warmup,
            report.total_return_pct,
            report.buy_hold_return_pct
        );
        tracing::info!(
            "PnL series computed in {:?} (iterator scan {:?})",
            pnl_elapsed,
            reference_elapsed
        );

        Ok(BacktestResult {
            bars,
            returns,
            exposures,
            strategy_returns,
            strategy_pnl,
            buy_hold_pnl,
            report,
            pnl_elapsed,
            reference_elapsed,
        })
    }
}

/// Close-to-close fractional returns. The first bar has no predecessor and gets 0.0.
fn period_returns(bars: &[PriceBar]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(bars.len());
    if bars.is_empty() {
        return returns;
    }
    returns.push(0.0);
    returns.extend(bars.windows(2).map(|w| w[1].close / w[0].close - 1.0));
    returns
}

/// Applies yesterday's exposure to today's return.
fn strategy_returns(exposures: &[Exposure], returns: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(returns.len());
    if returns.is_empty() {
        return out;
    }
    out.push(0.0);
    out.extend(
        exposures
            .iter()
            .zip(&returns[1..])
            .map(|(exposure, r)| exposure.as_f64() * r),
    );
    out
}

/// The same compounding written as an iterator scan, used to cross-check and
/// time the main implementation.
fn scan_reference(returns: &[f64]) -> Vec<f64> {
    if returns.is_empty() {
        return Vec::new();
    }
    std::iter::once(1.0)
        .chain(returns[1..].iter().scan(1.0, |value, r| {
            *value *= 1.0 + r;
            Some(*value)
        }))
        .collect()
}

fn first_mismatch(a: &[f64], b: &[f64]) -> Option<usize> {
    if a.len() != b.len() {
        return Some(a.len().min(b.len()));
    }
    a.iter()
        .zip(b)
        .position(|(x, y)| x.to_bits() != y.to_bits() && !(x.is_nan() && y.is_nan()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Days, NaiveDate};

    fn bars(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: start + Days::new(i as u64),
                close,
            })
            .collect()
    }

    #[test]
    fn returns_are_close_to_close_with_leading_zero() {
        let returns = period_returns(&bars(&[100.0, 110.0, 99.0]));
        assert_eq!(returns.len(), 3);
        assert_eq!(returns[0], 0.0);
        assert!((returns[1] - 0.10).abs() < 1e-12);
        assert!((returns[2] + 0.10).abs() < 1e-12);
        assert!(period_returns(&[]).is_empty());
    }

    #[test]
    fn returns_use_price_ratio_minus_one() {
        let closes = [100.0, 100.3, 99.7, 101.1, 0.7, 3.3, 123.456];
        let returns = period_returns(&bars(&closes));
        for i in 1..closes.len() {
            let expected = closes[i] / closes[i - 1] - 1.0;
            assert_eq!(returns[i].to_bits(), expected.to_bits(), "index {i}");
        }
    }

    #[test]
    fn exposure_applies_to_following_period() {
        let exposures = [Exposure::Long, Exposure::Flat, Exposure::Long];
        let returns = [0.0, 0.10, 0.20];
        assert_eq!(strategy_returns(&exposures, &returns), vec![0.0, 0.10, 0.0]);
    }

    #[test]
    fn scan_reference_matches_recurrence() {
        let returns = [0.3, 0.1, -0.2, 0.05];
        let expected = compute_pnl_series(&returns);
        assert_eq!(first_mismatch(&expected, &scan_reference(&returns)), None);
        assert!(scan_reference(&[]).is_empty());
    }

    #[test]
    fn nan_on_both_sides_is_not_a_mismatch() {
        assert_eq!(first_mismatch(&[1.0, f64::NAN], &[1.0, f64::NAN]), None);
        assert_eq!(first_mismatch(&[1.0, 2.0], &[1.0, 2.5]), Some(1));
        assert_eq!(first_mismatch(&[1.0], &[1.0, 2.0]), Some(1));
    }
}
