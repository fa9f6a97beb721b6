use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use pm_matrix::{check_dimensions, Matrix, MatrixError, MatrixMultiplier, Result};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, trace, warn};

use crate::config::ParallelConfig;
use crate::kernel::{compute_partition, ColumnBlock};
use crate::partition::{plan_partitions, Partition};

/// Multiplies on the CPU by splitting the output columns across a worker pool.
///
/// A pool with one thread per partition (never more than
/// `config.parallelism`) is built for each call and torn down before the call
/// returns. Inputs are shared read-only; every worker fills a private
/// `ColumnBlock` which is copied into its disjoint columns of the output after
/// all workers have been joined. Peak memory is therefore about twice the
/// output size: the output plus the blocks.
#[derive(Debug, Clone, Default)]
pub struct ParallelMultiplier {
    config: ParallelConfig,
}

impl ParallelMultiplier {
    pub fn new(config: ParallelConfig) -> Self {
        ParallelMultiplier { config }
    }

    /// Shorthand for a default config with a fixed worker count.
    pub fn with_parallelism(parallelism: usize) -> Self {
        Self::new(ParallelConfig::new().with_parallelism(parallelism))
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// The partitions a product with `columns` output columns would be split into.
    pub fn plan(&self, columns: usize) -> Vec<Partition> {
        plan_partitions(
            columns,
            self.config.parallelism,
            self.config.min_columns_per_worker,
        )
    }

    /// Run `unit` once per partition on a fresh pool and assemble the output.
    ///
    /// Every unit is awaited before any result is inspected. If one or more
    /// units fail, the failure of the lowest-indexed partition is returned and
    /// no matrix is produced. A panicking unit becomes `WorkerFailure`.
    fn execute<F>(&self, a: &Matrix, b: &Matrix, unit: F) -> Result<Matrix>
    where
        F: Fn(&Matrix, &Matrix, Partition) -> Result<ColumnBlock> + Sync,
    {
        self.execute_on(a, b, unit, |builder| builder)
    }

    /// `execute` with a hook applied to the pool builder before the pool is built.
    fn execute_on<F, H>(&self, a: &Matrix, b: &Matrix, unit: F, customize: H) -> Result<Matrix>
    where
        F: Fn(&Matrix, &Matrix, Partition) -> Result<ColumnBlock> + Sync,
        H: FnOnce(ThreadPoolBuilder) -> ThreadPoolBuilder,
    {
        check_dimensions(a, b)?;
        self.config.validate()?;

        let partitions = self.plan(b.cols());
        debug!(
            rows = a.rows(),
            inner = a.cols(),
            cols = b.cols(),
            workers = partitions.len(),
            "planned column partitions"
        );

        let mut out = Matrix::try_new(a.rows(), b.cols())?;
        if partitions.is_empty() {
            return Ok(out);
        }

        let prefix = self.config.thread_name_prefix.clone();
        let builder = ThreadPoolBuilder::new()
            .num_threads(partitions.len())
            .thread_name(move |i| format!("{}-{}", prefix, i));
        let pool = customize(builder)
            .build()
            .map_err(|e| MatrixError::PoolBuild(e.to_string()))?;

        let outcomes: Vec<Result<ColumnBlock>> = pool.install(|| {
            partitions
                .par_iter()
                .enumerate()
                .map(|(index, &partition)| run_unit(index, partition, || unit(a, b, partition)))
                .collect()
        });
        drop(pool);

        let mut blocks = Vec::with_capacity(outcomes.len());
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(block) => blocks.push(block),
                Err(e) => {
                    warn!(partition = index, error = %e, "worker failed");
                    return Err(e);
                }
            }
        }

        for block in &blocks {
            block.scatter_into(&mut out);
        }
        Ok(out)
    }
}

impl MatrixMultiplier for ParallelMultiplier {
    fn name(&self) -> &str {
        "parallel"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        self.execute(a, b, compute_partition)
    }
}

fn run_unit<F>(index: usize, partition: Partition, f: F) -> Result<ColumnBlock>
where
    F: FnOnce() -> Result<ColumnBlock>,
{
    trace!(partition = index, columns = %partition, "worker started");
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(MatrixError::WorkerFailure {
            partition: index,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
