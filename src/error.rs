//! Error taxonomy shared by every component.

use thiserror::Error;

/// Errors raised while building cut tables, adding data sets, binding cuts,
/// reading results or moving data through the I/O helpers.
#[derive(Error, Debug)]
pub enum RgsError {
    /// Inconsistent configuration: unknown variable, unknown cut code,
    /// mismatched column counts, inverted box bounds or engine misuse.
    #[error("configuration error: {0}")]
    Config(String),

    /// Dataset, cut-point, event or variable index out of range.
    #[error("{what} index {index} out of range (len {len})")]
    Index {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Empty or malformed input table.
    #[error("input error: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RgsError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        RgsError::Config(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        RgsError::Input(msg.into())
    }

    /// Returns `Ok(index)` when `index < len`, otherwise an [`RgsError::Index`].
    pub(crate) fn check_index(what: &'static str, index: usize, len: usize) -> Result<usize> {
        if index < len {
            Ok(index)
        } else {
            Err(RgsError::Index { what, index, len })
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RgsError>;
