//! # Market Data
//!
//! CSV input and output for the PnL workspace.
//!
//! - `load_bars`: daily closes (`Date,Close`) sorted by date.
//! - `load_returns`: a single `Return` column, in file order.
//! - `write_series` / `write_values`: export computed series.

pub mod error;
pub mod loader;
pub mod writer;

pub use error::DataError;
pub use loader::{load_bars, load_returns};
pub use writer::{SeriesRow, write_series, write_values};
