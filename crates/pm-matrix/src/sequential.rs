use crate::error::Result;
use crate::matrix::Matrix;
use crate::strategy::{check_dimensions, MatrixMultiplier};

/// Single-threaded reference strategy.
///
/// A straightforward triple loop optimized for correctness rather than peak
/// performance. Each output element is accumulated left-to-right from `0.0`,
/// the same order the parallel kernel uses, so the two agree bit for bit.
#[derive(Debug, Clone)]
pub struct SequentialMultiplier;

impl SequentialMultiplier {
    pub fn new() -> Self {
        SequentialMultiplier
    }
}

impl Default for SequentialMultiplier {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixMultiplier for SequentialMultiplier {
    fn name(&self) -> &str {
        "sequential"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        check_dimensions(a, b)?;

        let (m, k) = a.shape();
        let n = b.cols();
        let a_data = a.as_slice();
        let b_data = b.as_slice();

        let mut out = Matrix::try_new(m, n)?;
        let c = out.as_mut_slice();
        for i in 0..m {
            for j in 0..n {
                let mut sum = 0.0f64;
                for p in 0..k {
                    sum += a_data[i * k + p] * b_data[p * n + j];
                }
                c[i * n + j] = sum;
            }
        }
        Ok(out)
    }
}
