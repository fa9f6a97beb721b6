use std::fmt;

use thiserror::Error;

/// Which extent of a matrix an index was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("matrix inner dimensions must agree: [{a_rows}x{a_cols}] * [{b_rows}x{b_cols}]")]
    DimensionMismatch {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },
    #[error("{axis} index {index} out of range for extent {bound}")]
    IndexOutOfRange { index: usize, bound: usize, axis: Axis },
    #[error("shape mismatch: expected {expected} elements, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("shape {rows}x{cols} overflows the addressable element count")]
    ShapeOverflow { rows: usize, cols: usize },
    #[error("worker for partition {partition} failed: {message}")]
    WorkerFailure { partition: usize, message: String },
    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),
    #[error("invalid configuration value for {key}: {value:?}")]
    InvalidConfig { key: String, value: String },
    #[error("backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, MatrixError>;
