//! # Strategy Library
//!
//! This crate turns a stream of daily closes into the exposure held over the
//! next period. It defines a universal `Strategy` trait and provides the moving
//! average crossover implementation.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** No I/O. Depends only on `core-types` and `configuration`.
//! - **Strategy agnostic backtest:** The backtester drives any `Strategy` through
//!   the trait without knowing its internals.
//!
//! ## Public API
//!
//! - `Strategy`: The core trait all strategies implement.
//! - `create_strategy`: The factory function to construct a strategy instance.
//! - `MACrossover`: Long while the fast SMA is above the slow SMA.

pub mod error;
pub mod factory;
pub mod ma_crossover;

pub use error::StrategyError;
pub use factory::create_strategy;
pub use ma_crossover::MACrossover;

pub use core_types::StrategyId;

use core_types::{Exposure, PriceBar};

/// The core trait that all strategies must implement.
///
/// `evaluate` takes `&mut self` because indicators carry state from bar to bar.
/// The `Send + Sync` bounds let a boxed strategy move across threads.
pub trait Strategy: Send + Sync {
    /// Consumes the next bar and returns the exposure to hold from this bar's
    /// close to the next one.
    fn evaluate(&mut self, bar: &PriceBar) -> Result<Exposure, StrategyError>;

    /// Number of leading bars whose output is not yet meaningful because the
    /// indicators have not seen enough history.
    fn warmup_period(&self) -> usize;
}
