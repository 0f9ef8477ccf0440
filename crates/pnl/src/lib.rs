//! # PnL Series
//!
//! Turns a sequence of per-period fractional returns into a normalized value
//! path by compounding: `pnl[0] = 1.0`, `pnl[i] = pnl[i - 1] * (1.0 + r[i])`.
//!
//! `r[0]` is never read. Index 0 is "now", with no prior-period return, so the
//! path always starts at exactly 1.0.
//!
//! ## Public API
//!
//! - `compute_pnl_series`: allocates and returns the compounded path.
//! - `compute_pnl_series_into`: fills a caller-owned buffer, failing before
//!   any write if either buffer is shorter than the requested length.
//! - `computePnLSeries`: the same recurrence behind a C ABI, for callers that
//!   load the `cdylib`.

pub mod error;
pub mod ffi;
pub mod series;

pub use error::PnlError;
pub use series::{compute_pnl_series, compute_pnl_series_into};
