use crate::Strategy;
use crate::error::StrategyError;
use configuration::MACrossoverParams;
use core_types::{Exposure, PriceBar};
use ta::Next;
use ta::indicators::SimpleMovingAverage as Sma;

/// The dual moving average crossover strategy.
///
/// Holds a long position for the next period whenever the fast SMA closes above
/// the slow SMA, and stays flat otherwise. The signal is a level, not a crossing
/// event: every bar above the slow average is a long bar.
pub struct MACrossover {
    ma_fast: Sma,
    ma_slow: Sma,
    slow_period: usize,
    // Bars seen so far, capped at `slow_period`.
    seen: usize,
}

impl MACrossover {
    /// Creates a new `MACrossover` instance with the given parameters.
    ///
    /// It performs validation to ensure the parameters are logical.
    pub fn new(params: MACrossoverParams) -> Result<Self, StrategyError> {
        if params.fast_period == 0 {
            return Err(StrategyError::InvalidParameters(
                "Fast MA period must be at least 1".to_string(),
            ));
        }
        if params.fast_period >= params.slow_period {
            return Err(StrategyError::InvalidParameters(
                "Fast MA period must be less than Slow MA period".to_string(),
            ));
        }

        Ok(Self {
            ma_fast: new_sma(params.fast_period)?,
            ma_slow: new_sma(params.slow_period)?,
            slow_period: params.slow_period,
            seen: 0,
        })
    }
}

fn new_sma(period: usize) -> Result<Sma, StrategyError> {
    Sma::new(period).map_err(|e| StrategyError::IndicatorError(format!("{e:?}")))
}

impl Strategy for MACrossover {
    fn evaluate(&mut self, bar: &PriceBar) -> Result<Exposure, StrategyError> {
        let fast = self.ma_fast.next(bar.close);
        let slow = self.ma_slow.next(bar.close);
        self.seen = (self.seen + 1).min(self.slow_period);

        if !fast.is_finite() || !slow.is_finite() {
            return Err(StrategyError::IndicatorError(format!(
                "moving average is not finite on {} (fast {fast}, slow {slow})",
                bar.date
            )));
        }

        // Both windows must be full before the comparison means anything.
        if self.seen < self.slow_period {
            return Ok(Exposure::Flat);
        }

        let exposure = if fast > slow {
            Exposure::Long
        } else {
            Exposure::Flat
        };
        tracing::debug!(
            "MACrossover: {} close {} fast {:.4} slow {:.4} -> {:?}",
            bar.date,
            bar.close,
            fast,
            slow,
            exposure
        );
        Ok(exposure)
    }

    fn warmup_period(&self) -> usize {
        self.slow_period - 1
    }
}
