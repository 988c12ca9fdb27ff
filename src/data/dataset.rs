//! A data set: one ingested table projected onto the registry's column order.

use super::table::Table;
use crate::error::{Result, RgsError};
use crate::registry::VariableRegistry;
use std::sync::Arc;

/// Event rows in registry column order, plus one weight per event.
///
/// Rows are stored flat (`values[e * width + v]`) so the scan kernels walk
/// contiguous memory. Columns of the source table that the registry does not
/// know are dropped at construction.
#[derive(Debug, Clone)]
pub struct DataSet {
    name: String,
    registry: Arc<VariableRegistry>,
    values: Vec<f64>,
    weights: Vec<f64>,
    weight_column: Option<String>,
}

impl DataSet {
    /// Projects `table` onto `registry`.
    ///
    /// Fails with a config error when the table lacks a registry variable or
    /// the named weight column, and with an input error when the table is
    /// empty or a weight is negative or not finite.
    pub fn new(
        name: impl Into<String>,
        registry: Arc<VariableRegistry>,
        table: &Table,
        weight_column: Option<&str>,
    ) -> Result<Self> {
        Self::from_tables(name, registry, std::slice::from_ref(table), weight_column)
    }

    /// Concatenates several tables into one data set.
    ///
    /// Each table is projected by name on its own, so their column orders
    /// may differ. Every table must carry the weight column when one is named.
    pub fn from_tables(
        name: impl Into<String>,
        registry: Arc<VariableRegistry>,
        tables: &[Table],
        weight_column: Option<&str>,
    ) -> Result<Self> {
        let name = name.into();
        let events: usize = tables.iter().map(Table::len).sum();
        if events == 0 {
            return Err(RgsError::input(format!("data set {name:?} has no events")));
        }

        let width = registry.len();
        let mut values = Vec::with_capacity(events * width);
        let mut weights = Vec::with_capacity(events);
        for table in tables {
            let columns = registry.project(table.header())?;
            let weight_index = weight_column.map(|w| table.column(w)).transpose()?;
            for row in table.rows() {
                values.extend(columns.iter().map(|&col| row[col]));
                let weight = weight_index.map_or(1.0, |col| row[col]);
                if !weight.is_finite() || weight < 0.0 {
                    return Err(RgsError::input(format!(
                        "data set {name:?}: event {} has invalid weight {weight}",
                        weights.len()
                    )));
                }
                weights.push(weight);
            }
        }

        Ok(Self {
            name,
            registry,
            values,
            weights,
            weight_column: weight_column.map(str::to_owned),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &Arc<VariableRegistry> {
        &self.registry
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Values per event (the registry size).
    pub fn width(&self) -> usize {
        self.registry.len()
    }

    pub fn weight_column(&self) -> Option<&str> {
        self.weight_column.as_deref()
    }

    /// Values of event `e` in registry order.
    pub fn row(&self, e: usize) -> Result<&[f64]> {
        RgsError::check_index("event", e, self.len())?;
        Ok(self.row_unchecked(e))
    }

    #[inline]
    pub(crate) fn row_unchecked(&self, e: usize) -> &[f64] {
        let width = self.width();
        &self.values[e * width..(e + 1) * width]
    }

    /// Value of registry variable `var` for event `e`.
    #[inline]
    pub(crate) fn value(&self, e: usize, var: usize) -> f64 {
        self.values[e * self.width() + var]
    }

    pub fn weight(&self, e: usize) -> Result<f64> {
        RgsError::check_index("event", e, self.len())?;
        Ok(self.weights[e])
    }

    pub(crate) fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all event weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }
}
