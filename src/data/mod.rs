//! Event data.
//!
//! - [`Table`]: header + row-major matrix as delivered by a loader
//! - [`DataSet`]: a table projected onto a [`VariableRegistry`](crate::VariableRegistry),
//!   with per-event weights

mod dataset;
mod table;

pub use dataset::DataSet;
pub use table::{RowRange, Table};
