//! In-memory header + row-major matrix, as produced by a table loader.

use crate::error::{Result, RgsError};
use std::collections::HashSet;

/// Half-open window of rows: skip `start`, then keep at most `count`.
///
/// `count = None` keeps every remaining row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRange {
    pub start: usize,
    pub count: Option<usize>,
}

impl RowRange {
    /// Every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(start: usize, count: Option<usize>) -> Self {
        Self { start, count }
    }

    /// Whether the `i`-th row falls inside the window.
    pub fn contains(&self, i: usize) -> bool {
        i >= self.start && self.count.is_none_or(|n| i - self.start < n)
    }

    /// Whether no row past `i` can fall inside the window.
    pub fn exhausted_after(&self, i: usize) -> bool {
        self.count
            .is_some_and(|n| i.saturating_add(1) >= self.start.saturating_add(n))
    }
}

/// Named columns over a rectangular numeric matrix.
///
/// Every row has exactly `header.len()` values. A table may hold zero rows;
/// consumers that need events reject empty tables when they ingest them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Validates and wraps a header and its rows.
    ///
    /// Column names must be distinct: consumers look columns up by name.
    pub fn new<S: Into<String>>(header: Vec<S>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        if header.is_empty() {
            return Err(RgsError::input("table has no columns"));
        }
        let mut seen = HashSet::with_capacity(header.len());
        if let Some(dup) = header.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(RgsError::input(format!("duplicate column {dup:?} in table header")));
        }
        let width = header.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(RgsError::input(format!(
                "row {i} has {} values, header has {width} columns",
                row.len()
            )));
        }
        Ok(Self { header, rows })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Position of the column named `name`.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| RgsError::config(format!("table has no column {name:?}")))
    }

    /// Copy of the rows inside `range`.
    pub fn slice(&self, range: RowRange) -> Table {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| range.contains(*i))
            .map(|(_, r)| r.clone())
            .collect();
        Table {
            header: self.header.clone(),
            rows,
        }
    }

    /// Copy of the rows for which `keep(header, row)` holds.
    ///
    /// Stand-in for a loader-side selection expression.
    pub fn select<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[String], &[f64]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|r| keep(&self.header, r))
            .cloned()
            .collect();
        Table {
            header: self.header.clone(),
            rows,
        }
    }

    /// Consumes the table, returning its parts.
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<f64>>) {
        (self.header, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["x", "y"],
            vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0], vec![4.0, 40.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_new_validates_width() {
        let err = Table::new(vec!["x", "y"], vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, RgsError::Input(_)));
    }

    #[test]
    fn test_new_rejects_duplicate_columns() {
        let err = Table::new(vec!["pt", "eta", "pt"], vec![vec![10.0, 0.5, 20.0]]).unwrap_err();
        assert!(matches!(err, RgsError::Input(ref m) if m.contains("\"pt\"")));
    }

    #[test]
    fn test_new_rejects_no_columns() {
        assert!(Table::new(Vec::<String>::new(), vec![]).is_err());
    }

    #[test]
    fn test_column_lookup() {
        let t = sample();
        assert_eq!(t.column("y").unwrap(), 1);
        assert!(t.column("z").is_err());
    }

    #[test]
    fn test_slice() {
        let t = sample();
        let s = t.slice(RowRange::new(1, Some(2)));
        assert_eq!(s.rows(), &[vec![2.0, 20.0], vec![3.0, 30.0]]);
        assert_eq!(t.slice(RowRange::new(3, None)).len(), 1);
        assert_eq!(t.slice(RowRange::all()).len(), 4);
        assert!(t.slice(RowRange::new(10, None)).is_empty());
    }

    #[test]
    fn test_select() {
        let t = sample();
        let s = t.select(|_, row| row[0] > 2.0);
        assert_eq!(s.len(), 2);
        assert_eq!(s.header(), t.header());
    }

    #[test]
    fn test_row_range_exhausted() {
        let r = RowRange::new(2, Some(2));
        assert!(!r.contains(1));
        assert!(r.contains(2));
        assert!(r.contains(3));
        assert!(!r.contains(4));
        assert!(!r.exhausted_after(2));
        assert!(r.exhausted_after(3));
        assert!(!RowRange::all().exhausted_after(1_000_000));
    }

    #[test]
    fn test_row_range_near_usize_max() {
        let r = RowRange::new(usize::MAX, Some(1));
        assert!(!r.exhausted_after(0));
        assert!(r.exhausted_after(usize::MAX));
        assert!(r.contains(usize::MAX));
        assert!(!r.contains(5));
    }
}
