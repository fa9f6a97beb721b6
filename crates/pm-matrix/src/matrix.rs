use crate::error::{Axis, MatrixError, Result};
use std::fmt;

/// A dense, row-major matrix of f64 values.
///
/// The row and column counts are fixed for the lifetime of the matrix. Element
/// `(i, j)` lives at `data[i * cols + j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a zero-filled matrix with the given extents.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows `usize`. Use `try_new` for extents
    /// that are not known to fit.
    pub fn new(rows: usize, cols: usize) -> Self {
        match Self::try_new(rows, cols) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create a zero-filled matrix, failing with `ShapeOverflow` if
    /// `rows * cols` overflows `usize`.
    pub fn try_new(rows: usize, cols: usize) -> Result<Self> {
        let len = Self::checked_len(rows, cols)?;
        Ok(Matrix {
            rows,
            cols,
            data: vec![0.0; len],
        })
    }

    /// Number of elements in a `rows x cols` matrix.
    pub fn checked_len(rows: usize, cols: usize) -> Result<usize> {
        rows.checked_mul(cols)
            .ok_or(MatrixError::ShapeOverflow { rows, cols })
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `ShapeOverflow` if `rows * cols` overflows `usize`, and
    /// `ShapeMismatch` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = Self::checked_len(rows, cols)?;
        if data.len() != expected {
            return Err(MatrixError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Create a matrix from nested rows.
    ///
    /// An empty slice produces a 0x0 matrix. Every row must have the same
    /// length as the first one.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(MatrixError::ShapeMismatch {
                    expected: cols,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Create an `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::new(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns true if the matrix has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read element `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        let idx = self.index(i, j)?;
        Ok(self.data[idx])
    }

    /// Write element `(i, j)`.
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        let idx = self.index(i, j)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Copy column `j` into a contiguous vector of length `rows()`.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if `j >= cols()`.
    pub fn column(&self, j: usize) -> Result<Vec<f64>> {
        if j >= self.cols {
            return Err(MatrixError::IndexOutOfRange {
                index: j,
                bound: self.cols,
                axis: Axis::Column,
            });
        }
        Ok(self
            .data
            .iter()
            .skip(j)
            .step_by(self.cols)
            .copied()
            .collect())
    }

    /// Borrow row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "row {} out of range for {} rows", i, self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Returns the underlying row-major data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the underlying row-major data for in-place writes.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the matrix, returning its row-major data.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Copy the matrix out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    fn index(&self, i: usize, j: usize) -> Result<usize> {
        if i >= self.rows {
            return Err(MatrixError::IndexOutOfRange {
                index: i,
                bound: self.rows,
                axis: Axis::Row,
            });
        }
        if j >= self.cols {
            return Err(MatrixError::IndexOutOfRange {
                index: j,
                bound: self.cols,
                axis: Axis::Column,
            });
        }
        Ok(i * self.cols + j)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, "[")?;
            for (j, v) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
