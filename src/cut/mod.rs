//! Cuts.
//!
//! # Key Types
//!
//! - [`CutCode`]: closed set of cut kinds with their pass/fail semantics
//! - [`Threshold`]: one cut value, or a `[low, high]` range for box cuts
//! - [`CutTable`]: the cut-point matrix and the registry built from its header
//! - [`CutGrid`]: cut variables bound to codes over a [`CutTable`]
//!
//! A cut-point passes an event iff every bound cut passes (logical AND).
//! Per-variable decisions are pure, so evaluation order is free.

mod code;
mod grid;

pub use code::{CutCode, LadderDirection, Threshold};
pub use grid::{BoundCut, BoxColumns, CutGrid, CutSpec, CutTable, GridColumns};
