//! Grid scan engine.
//!
//! [`RgsEngine`] walks every cut-point of a cut table over every added data
//! set and publishes a [`ScanResult`] of weighted pass counts.
//!
//! # Key Types
//!
//! - [`RgsEngine`]: data set registration (`add`) and scans (`run`)
//! - [`ScanConfig`]: parallelism, pruning and ladder direction
//! - [`ScanResult`]: read-only counts and totals from the last run
//! - [`ScanStrategy`]: which counting kernel served a run
//!
//! # Kernels
//!
//! When the cut-points, ordered by a single-sided driver cut, tighten on every
//! cut variable, one walk over a shrinking active event set serves the whole
//! grid. Otherwise each cut-point binary-searches the events sorted by the
//! driver, or, without a single-sided cut, tests every event. All kernels give
//! identical counts; only their cost differs.

mod config;
mod engine;
mod kernel;
mod result;

pub use config::ScanConfig;
pub use engine::{EngineState, RgsEngine};
pub use kernel::ScanStrategy;
pub use result::ScanResult;
