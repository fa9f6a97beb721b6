use ndarray::{Array2, ArrayView2};
use pm_matrix::{check_dimensions, Matrix, MatrixError, MatrixMultiplier, Result};
use tracing::debug;

/// Accelerated strategy backed by `ndarray::linalg` matrix products.
#[derive(Debug, Clone, Default)]
pub struct NdarrayMultiplier;

impl NdarrayMultiplier {
    pub fn new() -> Self {
        NdarrayMultiplier
    }
}

fn view(m: &Matrix) -> Result<ArrayView2<'_, f64>> {
    ArrayView2::from_shape(m.shape(), m.as_slice())
        .map_err(|e| MatrixError::Backend(e.to_string()))
}

impl MatrixMultiplier for NdarrayMultiplier {
    fn name(&self) -> &str {
        "ndarray"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        check_dimensions(a, b)?;
        Matrix::checked_len(a.rows(), b.cols())?;
        debug!(m = a.rows(), k = a.cols(), n = b.cols(), "ndarray gemm");

        let product: Array2<f64> = view(a)?.dot(&view(b)?);
        let (m, n) = product.dim();
        // `dot` may hand back a column-major array; `iter` always walks in logical order.
        Matrix::from_vec(m, n, product.iter().copied().collect())
    }
}
