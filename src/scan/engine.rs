//! The scan engine: data set registration and cut-grid runs.

use super::config::ScanConfig;
use super::kernel::{scan_dataset, DatasetScan, ScanPlan};
use super::result::ScanResult;
use crate::cut::{CutGrid, CutSpec, CutTable};
use crate::data::{DataSet, Table};
use crate::error::{Result, RgsError};
use crate::io::ResultWriter;
use crate::registry::VariableRegistry;
use log::{debug, info};
use rayon::prelude::*;
use std::sync::Arc;

/// Lifecycle of an [`RgsEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No data set added yet.
    Empty,
    /// Data sets added; no result reflects all of them.
    Loaded,
    /// The last run covers every added data set.
    Scanned,
}

/// Counts, for each data set, the weighted events passing each cut-point of a
/// cut table.
///
/// Validation happens when the engine is built, when a data set is added and
/// when cut variables are bound. A failed `add` or `run` leaves the engine
/// exactly as it was, including any previous result.
///
/// # Usage
///
/// ```
/// use u_cutscan::cut::CutTable;
/// use u_cutscan::data::Table;
/// use u_cutscan::scan::RgsEngine;
///
/// let cuts = Table::new(vec!["pt"], vec![vec![15.0], vec![25.0], vec![35.0]]).unwrap();
/// let mut engine = RgsEngine::new(CutTable::new(cuts).unwrap());
///
/// let events = Table::new(vec!["pt"], vec![vec![10.0], vec![20.0], vec![30.0], vec![40.0]]).unwrap();
/// engine.add("signal", &events, None).unwrap();
///
/// let result = engine.run(&["pt"], &[">"]).unwrap();
/// assert_eq!(result.counts(0).unwrap(), &[3.0, 2.0, 1.0]);
/// assert_eq!(result.total(0).unwrap(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct RgsEngine {
    cut_table: CutTable,
    config: ScanConfig,
    datasets: Vec<DataSet>,
    grid: Option<CutGrid>,
    result: Option<ScanResult>,
    state: EngineState,
}

impl RgsEngine {
    /// Creates an engine over `cut_table` with the default configuration.
    pub fn new(cut_table: CutTable) -> Self {
        Self {
            cut_table,
            config: ScanConfig::default(),
            datasets: Vec::new(),
            grid: None,
            result: None,
            state: EngineState::Empty,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn cut_table(&self) -> &CutTable {
        &self.cut_table
    }

    pub fn registry(&self) -> &Arc<VariableRegistry> {
        self.cut_table.registry()
    }

    /// Registry variable names, in canonical order.
    pub fn variables(&self) -> Vec<&str> {
        self.registry().names()
    }

    /// Number of cut-points in the cut table.
    pub fn num_cutpoints(&self) -> usize {
        self.cut_table.len()
    }

    pub fn num_datasets(&self) -> usize {
        self.datasets.len()
    }

    /// Grid bound by the last successful run.
    pub fn grid(&self) -> Option<&CutGrid> {
        self.grid.as_ref()
    }

    /// Adds one table as a data set and returns its index.
    ///
    /// `weight_column` names a column of `table` holding per-event weights;
    /// `None` weights every event 1.0.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        table: &Table,
        weight_column: Option<&str>,
    ) -> Result<usize> {
        self.add_tables(name, std::slice::from_ref(table), weight_column)
    }

    /// Adds several tables concatenated into one data set and returns its index.
    pub fn add_tables(
        &mut self,
        name: impl Into<String>,
        tables: &[Table],
        weight_column: Option<&str>,
    ) -> Result<usize> {
        let ds = DataSet::from_tables(name, self.registry().clone(), tables, weight_column)?;
        debug!("added data set {:?}: {} events", ds.name(), ds.len());
        self.datasets.push(ds);
        self.state = EngineState::Loaded;
        Ok(self.datasets.len() - 1)
    }

    /// Binds cut variables to direction tokens and scans every data set.
    ///
    /// Tokens are those accepted by [`CutCode`](crate::cut::CutCode); a bare
    /// `ladder` takes [`ScanConfig::ladder_direction`].
    pub fn run<V, D>(&mut self, cut_variables: &[V], cut_directions: &[D]) -> Result<&ScanResult>
    where
        V: AsRef<str>,
        D: AsRef<str>,
    {
        if cut_variables.len() != cut_directions.len() {
            return Err(RgsError::config(format!(
                "{} cut variables but {} cut directions",
                cut_variables.len(),
                cut_directions.len()
            )));
        }
        let specs = cut_variables
            .iter()
            .zip(cut_directions)
            .map(|(v, d)| CutSpec::parse(v.as_ref(), d.as_ref(), self.config.ladder_direction))
            .collect::<Result<Vec<_>>>()?;
        self.run_specs(&specs)
    }

    /// Scans every data set against the cut table bound to `specs`.
    ///
    /// The previous result is replaced only when the whole scan succeeds.
    pub fn run_specs(&mut self, specs: &[CutSpec]) -> Result<&ScanResult> {
        if self.datasets.is_empty() {
            return Err(RgsError::config("run called before any data set was added"));
        }
        let grid = CutGrid::bind(&self.cut_table, specs)?;
        let plan = ScanPlan::new(&grid, self.config.pruning);
        let strategy = plan.strategy();

        info!(
            "scanning {} data set(s) over {} cut-point(s), {} cut variable(s), {:?} kernel",
            self.datasets.len(),
            grid.len(),
            grid.num_cuts(),
            strategy
        );

        let config = &self.config;
        let scan = |ds: &DataSet| -> DatasetScan {
            let out = scan_dataset(&grid, &plan, ds, config);
            debug!("{}: total {} over {} events", ds.name(), out.total, ds.len());
            out
        };
        let scans: Vec<DatasetScan> = if config.parallel {
            self.datasets.par_iter().map(scan).collect()
        } else {
            self.datasets.iter().map(scan).collect()
        };

        let result = ScanResult::assemble(&self.cut_table, &grid, &self.datasets, strategy, scans);
        info!("scan finished");

        self.grid = Some(grid);
        self.state = EngineState::Scanned;
        Ok(&*self.result.insert(result))
    }

    /// Result of the last successful run.
    pub fn result(&self) -> Result<&ScanResult> {
        self.result
            .as_ref()
            .ok_or_else(|| RgsError::config("no completed scan"))
    }

    /// Weighted total of data set `d` from the last run.
    pub fn total(&self, d: usize) -> Result<f64> {
        self.result()?.total(d)
    }

    /// Weighted count of data set `d` at cut-point `c` from the last run.
    pub fn count(&self, d: usize, c: usize) -> Result<f64> {
        self.result()?.count(d, c)
    }

    /// Threshold values of cut-point `c` from the last run.
    pub fn cuts(&self, c: usize) -> Result<&[f64]> {
        self.result()?.cuts(c)
    }

    /// Cut variable names from the last run.
    pub fn cut_variables(&self) -> Result<&[String]> {
        Ok(self.result()?.cut_variables())
    }

    /// Number of events in added data set `d`.
    pub fn num_events(&self, d: usize) -> Result<usize> {
        RgsError::check_index("dataset", d, self.datasets.len())?;
        Ok(self.datasets[d].len())
    }

    /// Projected values of event `e` in data set `d`, in registry order.
    pub fn row(&self, d: usize, e: usize) -> Result<&[f64]> {
        RgsError::check_index("dataset", d, self.datasets.len())?;
        self.datasets[d].row(e)
    }

    pub fn dataset(&self, d: usize) -> Result<&DataSet> {
        RgsError::check_index("dataset", d, self.datasets.len())?;
        Ok(&self.datasets[d])
    }

    /// Hands the last result to `writer` with a luminosity scale.
    ///
    /// The scale must be finite and positive; stored counts are never scaled.
    pub fn save<W: ResultWriter + ?Sized>(&self, writer: &mut W, luminosity: f64) -> Result<()> {
        if !luminosity.is_finite() || luminosity <= 0.0 {
            return Err(RgsError::config(format!(
                "luminosity must be finite and positive, got {luminosity}"
            )));
        }
        writer.write(self.result()?, luminosity)
    }
}
