//! Cut tables (the threshold matrix) and cut grids (a run-time binding of
//! cut variables to cut codes over that matrix).

use super::code::{CutCode, LadderDirection, Threshold};
use crate::data::Table;
use crate::error::{Result, RgsError};
use crate::registry::VariableRegistry;
use std::collections::HashSet;
use std::sync::Arc;

/// Declares that box variable `variable` takes its bounds from two grid columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxColumns {
    pub variable: String,
    pub low: String,
    pub high: String,
}

impl BoxColumns {
    pub fn new(
        variable: impl Into<String>,
        low: impl Into<String>,
        high: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            low: low.into(),
            high: high.into(),
        }
    }

    /// Bounds read from `<variable>_low` and `<variable>_high`.
    pub fn suffixed(variable: impl Into<String>) -> Self {
        let variable = variable.into();
        let low = format!("{variable}_low");
        let high = format!("{variable}_high");
        Self {
            variable,
            low,
            high,
        }
    }
}

/// Where a registry variable's thresholds live in the cut table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridColumns {
    Single(usize),
    Pair { low: usize, high: usize },
}

/// The cut-point matrix plus the variable registry derived from its header.
///
/// Each row is one cut-point. Built once; the registry is shared with every
/// data set added to an engine.
///
/// # Examples
///
/// ```
/// use u_cutscan::cut::CutTable;
/// use u_cutscan::data::Table;
///
/// let table = Table::new(vec!["pt"], vec![vec![15.0], vec![25.0], vec![35.0]]).unwrap();
/// let cuts = CutTable::new(table).unwrap();
/// assert_eq!(cuts.len(), 3);
/// assert_eq!(cuts.registry().names(), vec!["pt"]);
/// ```
#[derive(Debug, Clone)]
pub struct CutTable {
    registry: Arc<VariableRegistry>,
    header: Vec<String>,
    values: Vec<f64>,
    columns: Vec<GridColumns>,
    rows: usize,
}

impl CutTable {
    /// Every column is a single-threshold variable.
    pub fn new(table: Table) -> Result<Self> {
        Self::with_boxes(table, &[])
    }

    /// Concatenates several cut tables into one grid, in order.
    ///
    /// Every table must carry the same column names as the first; column
    /// order may differ and is normalized to the first table's.
    pub fn from_tables(tables: Vec<Table>, boxes: &[BoxColumns]) -> Result<Self> {
        let mut tables = tables.into_iter();
        let Some(first) = tables.next() else {
            return Err(RgsError::input("no cut tables given"));
        };
        let (header, mut rows) = first.into_parts();
        for (i, table) in tables.enumerate() {
            if table.width() != header.len() {
                return Err(RgsError::config(format!(
                    "cut table {}: {} columns, first table has {}",
                    i + 1,
                    table.width(),
                    header.len()
                )));
            }
            let columns = header
                .iter()
                .map(|name| table.column(name))
                .collect::<Result<Vec<usize>>>()?;
            rows.extend(
                table
                    .rows()
                    .iter()
                    .map(|row| columns.iter().map(|&col| row[col]).collect::<Vec<f64>>()),
            );
        }
        Self::with_boxes(Table::new(header, rows)?, boxes)
    }

    /// Like [`new`](Self::new), pairing columns into box variables.
    ///
    /// A box variable appears in the registry at the position of its low
    /// column; its high column does not appear at all.
    pub fn with_boxes(table: Table, boxes: &[BoxColumns]) -> Result<Self> {
        if table.is_empty() {
            return Err(RgsError::input("cut table has no cut-points"));
        }

        let mut used = HashSet::new();
        let mut pairs = Vec::with_capacity(boxes.len());
        for b in boxes {
            let low = table.column(&b.low)?;
            let high = table.column(&b.high)?;
            if low == high {
                return Err(RgsError::config(format!(
                    "box {:?}: low and high columns are the same",
                    b.variable
                )));
            }
            for col in [low, high] {
                if !used.insert(col) {
                    return Err(RgsError::config(format!(
                        "column {:?} used by more than one box",
                        table.header()[col]
                    )));
                }
            }
            pairs.push((b.variable.as_str(), low, high));
        }

        let mut names = Vec::new();
        let mut columns = Vec::new();
        for (col, name) in table.header().iter().enumerate() {
            if let Some(&(var, low, high)) = pairs.iter().find(|(_, low, _)| *low == col) {
                names.push(var.to_owned());
                columns.push(GridColumns::Pair { low, high });
            } else if !used.contains(&col) {
                names.push(name.clone());
                columns.push(GridColumns::Single(col));
            }
        }
        let registry = Arc::new(VariableRegistry::new(names)?);

        let rows = table.len();
        let (header, matrix) = table.into_parts();
        if let Some(i) = matrix.iter().position(|r| r.iter().any(|v| v.is_nan())) {
            return Err(RgsError::input(format!("cut-point {i} contains NaN")));
        }
        for (var, cols) in columns.iter().enumerate() {
            if let GridColumns::Pair { low, high } = *cols {
                if let Some(i) = matrix.iter().position(|r| r[low] > r[high]) {
                    return Err(RgsError::config(format!(
                        "box {:?}: cut-point {i} has low {} > high {}",
                        registry.variables()[var].name,
                        matrix[i][low],
                        matrix[i][high]
                    )));
                }
            }
        }

        Ok(Self {
            registry,
            header,
            values: matrix.into_iter().flatten().collect(),
            columns,
            rows,
        })
    }

    pub fn registry(&self) -> &Arc<VariableRegistry> {
        &self.registry
    }

    /// Number of cut-points.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Raw column names of the source table.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Grid columns backing registry variable `var`.
    pub fn columns(&self, var: usize) -> Result<GridColumns> {
        RgsError::check_index("variable", var, self.columns.len())?;
        Ok(self.columns[var])
    }

    /// Raw values of cut-point `c` in source column order.
    pub fn row(&self, c: usize) -> Result<&[f64]> {
        RgsError::check_index("cut-point", c, self.rows)?;
        let width = self.header.len();
        Ok(&self.values[c * width..(c + 1) * width])
    }

    fn threshold(&self, c: usize, var: usize) -> Threshold {
        let row = &self.values[c * self.header.len()..];
        match self.columns[var] {
            GridColumns::Single(col) => Threshold::Single(row[col]),
            GridColumns::Pair { low, high } => Threshold::Range(row[low], row[high]),
        }
    }
}

/// One requested cut: a registry variable and the code applied to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutSpec {
    pub variable: String,
    pub code: CutCode,
}

impl CutSpec {
    pub fn new(variable: impl Into<String>, code: CutCode) -> Self {
        Self {
            variable: variable.into(),
            code,
        }
    }

    /// Parses a direction token such as `">"` or `"<>"` for `variable`.
    pub fn parse(
        variable: impl Into<String>,
        direction: &str,
        ladder_default: Option<LadderDirection>,
    ) -> Result<Self> {
        Ok(Self::new(variable, CutCode::parse_with(direction, ladder_default)?))
    }
}

/// A cut variable bound to its registry index and code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundCut {
    pub name: String,
    pub var: usize,
    pub code: CutCode,
}

/// Cut-points restricted to the bound cut variables, ready for scanning.
///
/// Thresholds are stored flat: `thresholds[c * num_cuts + k]` is the
/// threshold of bound cut `k` at cut-point `c`.
#[derive(Debug, Clone)]
pub struct CutGrid {
    cuts: Vec<BoundCut>,
    thresholds: Vec<Threshold>,
    points: usize,
}

impl CutGrid {
    /// Binds `specs` against `table`.
    ///
    /// Rejects an empty spec list, unknown or repeated variables, a box code
    /// on a single-column variable and a non-box code on a box variable.
    pub fn bind(table: &CutTable, specs: &[CutSpec]) -> Result<Self> {
        if specs.is_empty() {
            return Err(RgsError::config("no cut variables given"));
        }
        let registry = table.registry();
        let mut seen = HashSet::new();
        let mut cuts = Vec::with_capacity(specs.len());
        for spec in specs {
            let var = registry.resolve(&spec.variable)?;
            if !seen.insert(var) {
                return Err(RgsError::config(format!(
                    "variable {:?} cut more than once",
                    spec.variable
                )));
            }
            match (table.columns[var], spec.code.is_box()) {
                (GridColumns::Pair { .. }, false) => {
                    return Err(RgsError::config(format!(
                        "variable {:?} has box bounds but cut code {}",
                        spec.variable, spec.code
                    )));
                }
                (GridColumns::Single(_), true) => {
                    return Err(RgsError::config(format!(
                        "box cut on {:?} needs a low/high column pair",
                        spec.variable
                    )));
                }
                _ => {}
            }
            cuts.push(BoundCut {
                name: spec.variable.clone(),
                var,
                code: spec.code,
            });
        }

        let points = table.len();
        let mut thresholds = Vec::with_capacity(points * cuts.len());
        for c in 0..points {
            thresholds.extend(cuts.iter().map(|cut| table.threshold(c, cut.var)));
        }

        Ok(Self {
            cuts,
            thresholds,
            points,
        })
    }

    /// Number of cut-points.
    pub fn len(&self) -> usize {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points == 0
    }

    /// Number of bound cut variables.
    pub fn num_cuts(&self) -> usize {
        self.cuts.len()
    }

    pub fn cuts(&self) -> &[BoundCut] {
        &self.cuts
    }

    /// Thresholds of cut-point `c`, one per bound cut.
    #[inline]
    pub fn point(&self, c: usize) -> &[Threshold] {
        let n = self.cuts.len();
        &self.thresholds[c * n..(c + 1) * n]
    }

    /// Whether an event row (registry order) passes every cut of cut-point `c`.
    #[inline]
    pub fn passes(&self, row: &[f64], c: usize) -> bool {
        self.cuts
            .iter()
            .zip(self.point(c))
            .all(|(cut, &t)| cut.code.passes(row[cut.var], t))
    }

    /// Like [`passes`](Self::passes) but ignores bound cut `skip`.
    #[inline]
    pub fn passes_except(&self, row: &[f64], c: usize, skip: usize) -> bool {
        self.cuts
            .iter()
            .zip(self.point(c))
            .enumerate()
            .all(|(k, (cut, &t))| k == skip || cut.code.passes(row[cut.var], t))
    }

    /// Flat threshold numbers of cut-point `c`, two for box cuts.
    pub fn values(&self, c: usize) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.cuts.len() * 2);
        for &t in self.point(c) {
            t.extend_into(&mut out);
        }
        out
    }

    /// Column labels matching [`values`](Self::values).
    pub fn value_labels(&self, table: &CutTable) -> Vec<String> {
        let mut labels = Vec::new();
        for cut in &self.cuts {
            match table.columns[cut.var] {
                GridColumns::Single(_) => labels.push(cut.name.clone()),
                GridColumns::Pair { low, high } => {
                    labels.push(table.header[low].clone());
                    labels.push(table.header[high].clone());
                }
            }
        }
        labels
    }
}
