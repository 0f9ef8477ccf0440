use crate::Strategy;
use crate::error::StrategyError;
use crate::ma_crossover::MACrossover;
use configuration::settings::Config;
use core_types::StrategyId;

/// Creates a new strategy instance based on the provided ID and configuration.
pub fn create_strategy(id: StrategyId, config: &Config) -> Result<Box<dyn Strategy>, StrategyError> {
    // The compiler will error here if a new StrategyId is added but not handled.
    match id {
        StrategyId::MACrossover => {
            let params = config.strategy.ma_crossover();
            Ok(Box::new(MACrossover::new(params)?))
        }
    }
}
