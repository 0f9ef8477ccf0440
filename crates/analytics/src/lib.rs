//! # Analytics Engine
//!
//! This crate provides the tools for judging a compounded return path. It acts
//! as the "unbiased judge" of a backtest.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** No knowledge of files or configuration loading. It depends
//!   only on `core-types`.
//! - **Stateless Calculation:** The `AnalyticsEngine` takes return and value
//!   series as input and produces a `PerformanceReport` as output.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the calculation logic.
//! - `PerformanceReport`: The standardized struct that holds the metrics.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::PerformanceReport;
