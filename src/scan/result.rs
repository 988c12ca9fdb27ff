//! Read-only result of a completed scan.

use super::kernel::{DatasetScan, ScanStrategy};
use crate::cut::{CutCode, CutGrid, CutTable};
use crate::data::DataSet;
use crate::error::{Result, RgsError};

/// Weighted pass counts per data set and cut-point, with totals.
///
/// Counts are stored flat, `counts[d * num_cutpoints + c]`. Every accessor
/// validates its indices and none recomputes anything. Counts are raw
/// weighted sums; a luminosity scale is applied only by a
/// [`ResultWriter`](crate::io::ResultWriter).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanResult {
    cut_variables: Vec<String>,
    cut_codes: Vec<CutCode>,
    value_labels: Vec<String>,
    cut_values: Vec<f64>,
    values_per_point: usize,
    dataset_names: Vec<String>,
    num_events: Vec<usize>,
    strategies: Vec<ScanStrategy>,
    totals: Vec<f64>,
    counts: Vec<f64>,
    points: usize,
}

impl ScanResult {
    pub(crate) fn assemble(
        table: &CutTable,
        grid: &CutGrid,
        datasets: &[DataSet],
        strategy: ScanStrategy,
        scans: Vec<DatasetScan>,
    ) -> Self {
        let points = grid.len();
        let value_labels = grid.value_labels(table);
        let values_per_point = value_labels.len();
        let mut cut_values = Vec::with_capacity(points * values_per_point);
        for c in 0..points {
            cut_values.extend(grid.values(c));
        }

        let mut totals = Vec::with_capacity(scans.len());
        let mut counts = Vec::with_capacity(scans.len() * points);
        for scan in scans {
            totals.push(scan.total);
            counts.extend(scan.counts);
        }

        Self {
            cut_variables: grid.cuts().iter().map(|c| c.name.clone()).collect(),
            cut_codes: grid.cuts().iter().map(|c| c.code).collect(),
            value_labels,
            cut_values,
            values_per_point,
            dataset_names: datasets.iter().map(|d| d.name().to_owned()).collect(),
            num_events: datasets.iter().map(DataSet::len).collect(),
            strategies: vec![strategy; datasets.len()],
            totals,
            counts,
            points,
        }
    }

    /// Number of data sets scanned.
    pub fn num_datasets(&self) -> usize {
        self.totals.len()
    }

    /// Number of cut-points.
    pub fn num_cutpoints(&self) -> usize {
        self.points
    }

    /// Sum of weights of every event in data set `d`.
    pub fn total(&self, d: usize) -> Result<f64> {
        RgsError::check_index("dataset", d, self.totals.len())?;
        Ok(self.totals[d])
    }

    pub fn totals(&self) -> &[f64] {
        &self.totals
    }

    /// Sum of weights of events in data set `d` passing cut-point `c`.
    pub fn count(&self, d: usize, c: usize) -> Result<f64> {
        RgsError::check_index("dataset", d, self.totals.len())?;
        RgsError::check_index("cut-point", c, self.points)?;
        Ok(self.counts[d * self.points + c])
    }

    /// Share of data set `d`'s total weight passing cut-point `c`.
    ///
    /// Zero when the data set's total weight is zero.
    pub fn fraction(&self, d: usize, c: usize) -> Result<f64> {
        let count = self.count(d, c)?;
        let total = self.totals[d];
        Ok(if total > 0.0 { count / total } else { 0.0 })
    }

    /// Counts of data set `d` for every cut-point.
    pub fn counts(&self, d: usize) -> Result<&[f64]> {
        RgsError::check_index("dataset", d, self.totals.len())?;
        Ok(&self.counts[d * self.points..(d + 1) * self.points])
    }

    /// Threshold values of cut-point `c`, laid out as [`cut_value_labels`](Self::cut_value_labels).
    pub fn cuts(&self, c: usize) -> Result<&[f64]> {
        RgsError::check_index("cut-point", c, self.points)?;
        let w = self.values_per_point;
        Ok(&self.cut_values[c * w..(c + 1) * w])
    }

    /// Names of the cut variables, in binding order.
    pub fn cut_variables(&self) -> &[String] {
        &self.cut_variables
    }

    pub fn cut_codes(&self) -> &[CutCode] {
        &self.cut_codes
    }

    /// One label per threshold value: the variable name, or the low and high
    /// column names for box cuts.
    pub fn cut_value_labels(&self) -> &[String] {
        &self.value_labels
    }

    pub fn dataset_names(&self) -> &[String] {
        &self.dataset_names
    }

    /// Number of events in data set `d` at scan time.
    pub fn num_events(&self, d: usize) -> Result<usize> {
        RgsError::check_index("dataset", d, self.num_events.len())?;
        Ok(self.num_events[d])
    }

    /// Kernel that produced the counts of data set `d`.
    pub fn strategy(&self, d: usize) -> Result<ScanStrategy> {
        RgsError::check_index("dataset", d, self.strategies.len())?;
        Ok(self.strategies[d])
    }
}
