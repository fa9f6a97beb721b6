//! `pm-parallel` - Column-partitioned parallel matrix multiplication.
//!
//! The output's column range is split into disjoint partitions, one worker per
//! partition runs on a bounded pool created for the call, and the caller blocks
//! until every worker has finished. Workers share the inputs read-only and each
//! produces a private block for its own columns, so no locking is needed.

pub mod config;
pub mod kernel;
pub mod multiplier;
pub mod partition;

pub use config::ParallelConfig;
pub use kernel::{compute_partition, ColumnBlock};
pub use multiplier::ParallelMultiplier;
pub use partition::{plan_partitions, Partition};
