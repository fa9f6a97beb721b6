use std::fmt::Debug;

use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

/// Trait for interchangeable multiplication strategies (sequential, parallel,
/// accelerated, etc.).
///
/// Every implementation honours the same contract: given `a` of shape [m, k]
/// and `b` of shape [k, n] it returns a freshly allocated [m, n] product and
/// never mutates its inputs. Incompatible operands fail with
/// `MatrixError::DimensionMismatch` before any work is done. Callers pick a
/// strategy; implementations never pick one another.
pub trait MatrixMultiplier: Send + Sync + Debug {
    /// Returns the name of this strategy (e.g., "sequential", "parallel").
    fn name(&self) -> &str;

    /// Matrix multiplication: C = A * B.
    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix>;
}

/// Checks the shared precondition `a.cols() == b.rows()`.
pub fn check_dimensions(a: &Matrix, b: &Matrix) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(MatrixError::DimensionMismatch {
            a_rows: a.rows(),
            a_cols: a.cols(),
            b_rows: b.rows(),
            b_cols: b.cols(),
        });
    }
    Ok(())
}
