//! Random cut grids.
//!
//! A random grid takes its cut-points from the events themselves: each
//! sampled (typically signal) event becomes one cut-point whose thresholds
//! are that event's values. Cut-points then follow the density of the
//! sample instead of a regular lattice.

use crate::cut::{BoxColumns, CutTable};
use crate::data::Table;
use crate::error::{Result, RgsError};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Draws `n` distinct rows of `table` uniformly, keeping their original order.
///
/// Returns every row when `n >= table.len()`. `seed = None` draws a random seed.
///
/// # Examples
///
/// ```
/// use u_cutscan::data::Table;
/// use u_cutscan::sampling::sample_rows;
///
/// let table = Table::new(vec!["x"], (0..100).map(|i| vec![i as f64]).collect()).unwrap();
/// let a = sample_rows(&table, 10, Some(7)).unwrap();
/// let b = sample_rows(&table, 10, Some(7)).unwrap();
/// assert_eq!(a.len(), 10);
/// assert_eq!(a, b);
/// ```
pub fn sample_rows(table: &Table, n: usize, seed: Option<u64>) -> Result<Table> {
    if n == 0 {
        return Err(RgsError::input("cannot sample zero rows"));
    }
    if n >= table.len() {
        return Ok(table.clone());
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    };
    let mut picked = rand::seq::index::sample(&mut rng, table.len(), n).into_vec();
    picked.sort_unstable();

    let rows = picked.into_iter().map(|i| table.rows()[i].clone()).collect();
    Table::new(table.header().to_vec(), rows)
}

/// Builds a cut table from `n` randomly sampled rows of `table`.
pub fn sample_cut_table(
    table: &Table,
    n: usize,
    seed: Option<u64>,
    boxes: &[BoxColumns],
) -> Result<CutTable> {
    CutTable::with_boxes(sample_rows(table, n, seed)?, boxes)
}
