//! `pm-ndarray` - Packed-GEMM multiplication strategy.
//!
//! `NdarrayMultiplier` hands the product to `ndarray`'s cache-blocked GEMM. It
//! satisfies the same `MatrixMultiplier` contract as the CPU-partitioned
//! strategy, but its kernels may sum in a different order, so results agree
//! with the other strategies only within floating-point tolerance.

mod gemm;

pub use gemm::NdarrayMultiplier;
