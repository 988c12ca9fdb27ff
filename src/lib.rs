//! Grid scan of combinatorial selection cuts.
//!
//! Evaluates a grid of candidate cut-points against one or more event data
//! sets and reports, per cut-point and per data set, the weighted count of
//! events passing every cut at once:
//!
//! - **Registry** ([`VariableRegistry`]): immutable name → index mapping built
//!   from the cut-table header and shared by every data set.
//! - **Cuts** ([`cut`]): the closed set of cut kinds (`>`, `<`, `>|`, `<|`,
//!   `==`, `<>`, ladder), the cut-point table, and the per-run binding of
//!   cut variables to cut kinds.
//! - **Data** ([`data`]): tables from a loader, projected by column name into
//!   weighted data sets.
//! - **Scan** ([`scan`]): the engine, its configuration, the counting kernels
//!   and the read-only result store.
//! - **I/O** ([`io`]): text tables, variables files and a pluggable result
//!   writer.
//! - **Sampling** ([`sampling`]): random cut grids drawn from event samples.
//!
//! # Example
//!
//! ```
//! use u_cutscan::cut::CutTable;
//! use u_cutscan::data::Table;
//! use u_cutscan::scan::RgsEngine;
//!
//! let cuts = Table::new(
//!     vec!["pt", "eta"],
//!     vec![vec![15.0, 2.0], vec![25.0, 2.0]],
//! ).unwrap();
//! let mut engine = RgsEngine::new(CutTable::new(cuts).unwrap());
//!
//! let events = Table::new(
//!     vec!["pt", "eta"],
//!     vec![vec![30.0, 3.0], vec![20.0, 0.5], vec![40.0, -1.0]],
//! ).unwrap();
//! engine.add("signal", &events, None).unwrap();
//!
//! let result = engine.run(&["pt", "eta"], &[">", "<|"]).unwrap();
//! assert_eq!(result.counts(0).unwrap(), &[2.0, 1.0]);
//! ```
//!
//! The engine logs through the `log` facade and never installs a logger.

pub mod cut;
pub mod data;
pub mod error;
pub mod io;
pub mod registry;
pub mod sampling;
pub mod scan;

pub use error::{Result, RgsError};
pub use registry::{Variable, VariableRegistry};
