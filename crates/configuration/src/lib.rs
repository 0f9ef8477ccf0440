use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsSettings, MACrossoverParams, StrategySettings};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `PNL_STRATEGY__FAST_PERIOD=10`.
pub const ENV_PREFIX: &str = "PNL";

/// Loads the application configuration from `config.toml`, if present.
///
/// Every setting has a default, so a missing file is not an error. Environment
/// variables with the `PNL_` prefix override both.
pub fn load_config() -> Result<Config, ConfigError> {
    build(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
}

/// Loads the application configuration from an explicit TOML file.
///
/// Unlike [`load_config`], the file must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    build(config::File::from(path).required(true))
}

fn build<S>(file: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let defaults = Config::default();

    let builder = config::Config::builder()
        .set_default("strategy.id", "ma_crossover")?
        .set_default("strategy.fast_period", defaults.strategy.fast_period as i64)?
        .set_default("strategy.slow_period", defaults.strategy.slow_period as i64)?
        .set_default(
            "analytics.periods_per_year",
            i64::from(defaults.analytics.periods_per_year),
        )?
        .set_default("analytics.risk_free_rate", defaults.analytics.risk_free_rate)?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!("Loaded configuration: {:?}", config);
    Ok(config)
}
