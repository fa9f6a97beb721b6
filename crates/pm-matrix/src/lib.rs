//! `pm-matrix` - Dense matrix model and multiplication strategies for parallel-matmul.
//!
//! This crate provides:
//! - A row-major `Matrix` of f64 values with fixed row/column extents
//! - A `MatrixMultiplier` trait so CPU and accelerated strategies are interchangeable
//! - A reference `SequentialMultiplier` implementation
//! - The shared error taxonomy (`MatrixError`)

pub mod error;
pub mod matrix;
pub mod sequential;
pub mod strategy;

// Re-export primary types at the crate root for convenience.
pub use error::{Axis, MatrixError, Result};
pub use matrix::Matrix;
pub use sequential::SequentialMultiplier;
pub use strategy::{check_dimensions, MatrixMultiplier};
