use crate::error::ConfigError;
use core_types::StrategyId;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub strategy: StrategySettings,
    pub analytics: AnalyticsSettings,
}

/// Selects the strategy and carries its parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StrategySettings {
    pub id: StrategyId,
    pub fast_period: usize,
    pub slow_period: usize,
}

impl StrategySettings {
    pub fn ma_crossover(&self) -> MACrossoverParams {
        MACrossoverParams {
            fast_period: self.fast_period,
            slow_period: self.slow_period,
        }
    }
}

/// Parameters for the moving average crossover strategy.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MACrossoverParams {
    pub fast_period: usize,
    pub slow_period: usize,
}

/// Contains parameters for the performance calculations.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AnalyticsSettings {
    /// Number of return periods in a year, used to annualize the Sharpe ratio.
    /// 252 corresponds to daily bars on trading days.
    pub periods_per_year: u32,
    /// Annual risk-free rate as a fraction (0.02 for 2%).
    pub risk_free_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: StrategySettings {
                id: StrategyId::MACrossover,
                fast_period: MACrossoverParams::default().fast_period,
                slow_period: MACrossoverParams::default().slow_period,
            },
            analytics: AnalyticsSettings::default(),
        }
    }
}

impl Default for MACrossoverParams {
    fn default() -> Self {
        Self {
            fast_period: 20,
            slow_period: 50,
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            periods_per_year: 252,
            risk_free_rate: 0.0,
        }
    }
}

impl Config {
    /// Checks the cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ma = self.strategy.ma_crossover();
        if ma.fast_period == 0 {
            return Err(ConfigError::ValidationError(
                "strategy.fast_period must be at least 1".to_string(),
            ));
        }
        if ma.fast_period >= ma.slow_period {
            return Err(ConfigError::ValidationError(format!(
                "strategy.fast_period ({}) must be less than strategy.slow_period ({})",
                ma.fast_period, ma.slow_period
            )));
        }
        if self.analytics.periods_per_year == 0 {
            return Err(ConfigError::ValidationError(
                "analytics.periods_per_year must be at least 1".to_string(),
            ));
        }
        if !self.analytics.risk_free_rate.is_finite() {
            return Err(ConfigError::ValidationError(
                "analytics.risk_free_rate must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn fast_must_be_shorter_than_slow() {
        let mut config = Config::default();
        config.strategy.fast_period = 50;
        config.strategy.slow_period = 50;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn zero_periods_are_rejected() {
        let mut config = Config::default();
        config.strategy.fast_period = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analytics.periods_per_year = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_finite_rate_is_rejected() {
        let mut config = Config::default();
        config.analytics.risk_free_rate = f64::NAN;
        assert!(config.validate().is_err());
    }
}
