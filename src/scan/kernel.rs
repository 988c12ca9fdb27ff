//! Per-dataset counting kernels and the plan that picks between them.
//!
//! Three kernels produce identical counts:
//!
//! - **Chain**: when the grid, walked loosest to tightest, tightens on every
//!   cut variable at every step, a single pass shrinks an active event set.
//!   A frontier into the events sorted by the driver variable only ever
//!   advances, and an event dropped from the active set is never tested again.
//! - **Pruned**: with a single-sided driver cut but no chain, each cut-point
//!   binary-searches the driver-sorted events and tests the remaining cuts on
//!   the passing suffix only.
//! - **Direct**: every cut-point against every event.
//!
//! When the driver is the only bound cut, both Chain and Pruned read counts
//! off suffix sums of the driver-sorted weights instead of visiting events.

use super::config::ScanConfig;
use crate::cut::{CutGrid, LadderDirection};
use crate::data::DataSet;
use log::trace;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Kernel used to count one data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScanStrategy {
    Chain,
    Pruned,
    Direct,
}

/// Single-sided cut used to sort events and cut-points.
#[derive(Debug, Clone, Copy)]
struct Driver {
    /// Position among the grid's bound cuts.
    cut: usize,
    /// Registry variable.
    var: usize,
    dir: LadderDirection,
}

impl Driver {
    /// Orders values so those failing the cut first come first.
    #[inline]
    fn cmp_values(&self, a: f64, b: f64) -> Ordering {
        match self.dir {
            LadderDirection::Above => a.total_cmp(&b),
            LadderDirection::Below => b.total_cmp(&a),
        }
    }

    /// Event indices sorted failing-first by the driver value.
    ///
    /// Events whose driver value is NaN fail every cut-point and are left out.
    fn sorted_events(&self, ds: &DataSet) -> Vec<usize> {
        let mut order: Vec<usize> = (0..ds.len())
            .filter(|&e| !ds.value(e, self.var).is_nan())
            .collect();
        order.sort_by(|&a, &b| self.cmp_values(ds.value(a, self.var), ds.value(b, self.var)));
        order
    }
}

/// `suffix[i]` is the total weight of `order[i..]`.
fn suffix_weights(order: &[usize], weights: &[f64]) -> Vec<f64> {
    let mut suffix = vec![0.0; order.len() + 1];
    for i in (0..order.len()).rev() {
        suffix[i] = suffix[i + 1] + weights[order[i]];
    }
    suffix
}

/// Grid-level decisions shared by every data set of a run.
#[derive(Debug, Clone)]
pub(crate) struct ScanPlan {
    driver: Option<Driver>,
    /// Cut-point indices, loosest first when a driver exists.
    walk: Vec<usize>,
    chain: bool,
}

impl ScanPlan {
    pub(crate) fn new(grid: &CutGrid, pruning: bool) -> Self {
        if !pruning {
            return Self {
                driver: None,
                walk: (0..grid.len()).collect(),
                chain: false,
            };
        }

        let cuts = grid.cuts();
        let pick = |want_ladder: bool| {
            cuts.iter().enumerate().find_map(|(k, cut)| {
                if want_ladder && !cut.code.is_ladder() {
                    return None;
                }
                cut.code.one_sided_direction().map(|dir| Driver {
                    cut: k,
                    var: cut.var,
                    dir,
                })
            })
        };
        let driver = pick(true).or_else(|| pick(false));

        let mut walk: Vec<usize> = (0..grid.len()).collect();
        if let Some(d) = driver {
            walk.sort_by(|&a, &b| {
                d.cmp_values(grid.point(a)[d.cut].value(), grid.point(b)[d.cut].value())
            });
        }

        let chain = walk.windows(2).all(|w| {
            let (prev, next) = (grid.point(w[0]), grid.point(w[1]));
            cuts.iter()
                .enumerate()
                .all(|(k, cut)| cut.code.at_least_as_tight(prev[k], next[k]))
        });

        Self {
            driver,
            walk,
            chain,
        }
    }

    pub(crate) fn strategy(&self) -> ScanStrategy {
        match (self.chain, self.driver) {
            (true, _) => ScanStrategy::Chain,
            (false, Some(_)) => ScanStrategy::Pruned,
            (false, None) => ScanStrategy::Direct,
        }
    }
}

/// Total and per-cut-point counts for one data set.
#[derive(Debug, Clone)]
pub(crate) struct DatasetScan {
    pub(crate) total: f64,
    pub(crate) counts: Vec<f64>,
}

pub(crate) fn scan_dataset(
    grid: &CutGrid,
    plan: &ScanPlan,
    ds: &DataSet,
    config: &ScanConfig,
) -> DatasetScan {
    let counts = match plan.strategy() {
        ScanStrategy::Chain => chain(grid, plan, ds, config),
        ScanStrategy::Pruned => pruned(grid, plan, ds, config.parallel),
        ScanStrategy::Direct => direct(grid, ds, config.parallel),
    };
    DatasetScan {
        total: ds.total_weight(),
        counts,
    }
}

fn chain(grid: &CutGrid, plan: &ScanPlan, ds: &DataSet, config: &ScanConfig) -> Vec<f64> {
    let weights = ds.weights();
    let mut counts = vec![0.0; grid.len()];
    let mut active = match plan.driver {
        Some(d) => d.sorted_events(ds),
        None => (0..ds.len()).collect(),
    };
    let mut front = 0usize;
    let suffix = match plan.driver {
        Some(_) if grid.num_cuts() == 1 => Some(suffix_weights(&active, weights)),
        _ => None,
    };

    for (step, &c) in plan.walk.iter().enumerate() {
        if let Some(d) = plan.driver {
            let t = grid.point(c)[d.cut].value();
            while front < active.len() && !d.dir.passes(ds.value(active[front], d.var), t) {
                front += 1;
            }
        }
        if let Some(suffix) = &suffix {
            counts[c] = suffix[front];
            continue;
        }

        // Compact the survivors in place, keeping the driver order.
        let mut keep = front;
        let mut sum = 0.0;
        for i in front..active.len() {
            let e = active[i];
            let row = ds.row_unchecked(e);
            let pass = match plan.driver {
                Some(d) => grid.passes_except(row, c, d.cut),
                None => grid.passes(row, c),
            };
            if pass {
                active[keep] = e;
                keep += 1;
                sum += weights[e];
            }
        }
        active.truncate(keep);
        counts[c] = sum;

        if config.progress_interval > 0 && (step + 1).is_multiple_of(config.progress_interval) {
            trace!(
                "{}: {}/{} cut-points, {} events active",
                ds.name(),
                step + 1,
                plan.walk.len(),
                keep - front
            );
        }
    }
    counts
}

fn pruned(grid: &CutGrid, plan: &ScanPlan, ds: &DataSet, parallel: bool) -> Vec<f64> {
    let Some(d) = plan.driver else {
        return direct(grid, ds, parallel);
    };
    let weights = ds.weights();
    let order = d.sorted_events(ds);
    let suffix = (grid.num_cuts() == 1).then(|| suffix_weights(&order, weights));

    let count_point = |c: usize| -> f64 {
        let t = grid.point(c)[d.cut].value();
        let start = order.partition_point(|&e| !d.dir.passes(ds.value(e, d.var), t));
        if let Some(suffix) = &suffix {
            return suffix[start];
        }
        order[start..]
            .iter()
            .filter(|&&e| grid.passes_except(ds.row_unchecked(e), c, d.cut))
            .map(|&e| weights[e])
            .sum()
    };

    if parallel {
        (0..grid.len()).into_par_iter().map(count_point).collect()
    } else {
        (0..grid.len()).map(count_point).collect()
    }
}

fn direct(grid: &CutGrid, ds: &DataSet, parallel: bool) -> Vec<f64> {
    let weights = ds.weights();
    let count_point = |c: usize| -> f64 {
        (0..ds.len())
            .filter(|&e| grid.passes(ds.row_unchecked(e), c))
            .map(|e| weights[e])
            .sum()
    };

    if parallel {
        (0..grid.len()).into_par_iter().map(count_point).collect()
    } else {
        (0..grid.len()).map(count_point).collect()
    }
}
