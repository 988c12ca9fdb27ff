//! Text I/O around the engine.
//!
//! - [`read_table`] / [`read_table_file`]: header + rows from text, with a row window
//! - [`read_cut_specs`] / [`read_cut_specs_file`]: `variable direction` lists for
//!   [`RgsEngine::run_specs`](crate::scan::RgsEngine::run_specs)
//! - [`ResultWriter`]: persistence capability; [`TextResultWriter`] implements it
//!
//! Other storage formats plug in by implementing [`ResultWriter`] and by
//! building a [`Table`](crate::data::Table) from their own reader.

mod text;
mod writer;

pub use text::{read_cut_specs, read_cut_specs_file, read_table, read_table_file};
pub use writer::{ResultWriter, TextResultWriter};
