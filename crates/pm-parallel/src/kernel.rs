use pm_matrix::{Matrix, Result};

use crate::partition::Partition;

/// The slice of the output computed by one worker.
///
/// Holds `rows x partition.len()` values in row-major order, so row `i` of the
/// block maps onto columns `partition.start..=partition.end` of output row `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBlock {
    pub(crate) partition: Partition,
    pub(crate) rows: usize,
    pub(crate) data: Vec<f64>,
}

impl ColumnBlock {
    pub fn partition(&self) -> Partition {
        self.partition
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The block's values in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn width(&self) -> usize {
        self.partition.len()
    }

    /// Row `i` of the block.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        let w = self.width();
        &self.data[i * w..(i + 1) * w]
    }

    /// Copy this block into its columns of `out`.
    ///
    /// # Panics
    /// Panics if `out` has fewer than `rows()` rows or fewer than
    /// `partition.end + 1` columns.
    pub(crate) fn scatter_into(&self, out: &mut Matrix) {
        let cols = out.cols();
        assert!(
            out.rows() >= self.rows && self.partition.end < cols,
            "block {} with {} rows does not fit a {}x{} output",
            self.partition,
            self.rows,
            out.rows(),
            cols
        );
        let (start, end) = (self.partition.start, self.partition.end);
        let dst = out.as_mut_slice();
        for i in 0..self.rows {
            dst[i * cols + start..=i * cols + end].copy_from_slice(self.row(i));
        }
    }
}

/// Compute `A * B` restricted to the output columns of `partition`.
///
/// Each column of `b` is extracted once into a contiguous buffer, then dotted
/// against every row of `a`. Products are accumulated left-to-right from
/// `0.0`, matching `SequentialMultiplier`.
///
/// # Errors
/// Returns `IndexOutOfRange` if the partition reaches past `b.cols()`.
pub fn compute_partition(a: &Matrix, b: &Matrix, partition: Partition) -> Result<ColumnBlock> {
    let rows = a.rows();
    let width = partition.len();
    let mut data = vec![0.0f64; rows * width];

    for (offset, k) in partition.columns().enumerate() {
        let column = b.column(k)?;
        for i in 0..rows {
            let mut sum = 0.0f64;
            for (x, y) in a.row(i).iter().zip(column.iter()) {
                sum += x * y;
            }
            data[i * width + offset] = sum;
        }
    }

    Ok(ColumnBlock {
        partition,
        rows,
        data,
    })
}
