//! Scan configuration.

use crate::cut::LadderDirection;

/// Configuration for [`RgsEngine`](super::RgsEngine) runs.
///
/// # Defaults
///
/// ```
/// use u_cutscan::scan::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert!(config.parallel);
/// assert!(config.pruning);
/// assert_eq!(config.ladder_direction, None);
/// assert_eq!(config.progress_interval, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_cutscan::cut::LadderDirection;
/// use u_cutscan::scan::ScanConfig;
///
/// let config = ScanConfig::default()
///     .with_parallel(false)
///     .with_ladder_direction(LadderDirection::Above)
///     .with_progress_interval(0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanConfig {
    /// Whether to scan data sets, and cut-points within the pruned and
    /// direct kernels, in parallel using rayon.
    pub parallel: bool,

    /// Whether to use the sorted-frontier and shrinking-active-set kernels.
    ///
    /// When `false`, every cut-point is evaluated against every event.
    /// Counts are identical either way.
    pub pruning: bool,

    /// Direction given to a bare `ladder` direction token.
    ///
    /// `None` makes a bare `ladder` a configuration error; the tokens
    /// `ladder>` and `ladder<` are always accepted.
    pub ladder_direction: Option<LadderDirection>,

    /// Log a progress line every this many cut-points of a ladder walk.
    ///
    /// Set to 0 to disable.
    pub progress_interval: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            pruning: true,
            ladder_direction: None,
            progress_interval: 500,
        }
    }
}

impl ScanConfig {
    /// Enables or disables parallel scanning.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enables or disables the pruning kernels.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Sets the direction used for bare `ladder` tokens.
    pub fn with_ladder_direction(mut self, direction: LadderDirection) -> Self {
        self.ladder_direction = Some(direction);
        self
    }

    pub fn with_progress_interval(mut self, n: usize) -> Self {
        self.progress_interval = n;
        self
    }

    /// Sequential, unpruned evaluation: the reference behaviour the
    /// optimized kernels must reproduce.
    pub fn reference() -> Self {
        Self {
            parallel: false,
            pruning: false,
            ..Self::default()
        }
    }
}
