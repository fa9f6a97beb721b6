use std::env;

use pm_matrix::{MatrixError, Result};

/// Default minimum number of output columns per worker before splitting pays off.
pub const DEFAULT_MIN_COLUMNS_PER_WORKER: usize = 4;

pub const ENV_PARALLELISM: &str = "PM_PARALLELISM";
pub const ENV_MIN_COLUMNS_PER_WORKER: &str = "PM_MIN_COLUMNS_PER_WORKER";

/// Configuration for a `ParallelMultiplier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of execution units to partition across.
    pub parallelism: usize,
    /// Below `parallelism * min_columns_per_worker` output columns the work
    /// runs as a single unit.
    pub min_columns_per_worker: usize,
    /// Prefix for worker thread names (`{prefix}-{index}`).
    pub thread_name_prefix: String,
}

impl ParallelConfig {
    /// Config sized to the logical CPU count of this machine.
    pub fn new() -> Self {
        ParallelConfig {
            parallelism: num_cpus::get().max(1),
            min_columns_per_worker: DEFAULT_MIN_COLUMNS_PER_WORKER,
            thread_name_prefix: "pm-worker".to_string(),
        }
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_min_columns_per_worker(mut self, min_columns: usize) -> Self {
        self.min_columns_per_worker = min_columns;
        self
    }

    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Build a config from the process environment.
    ///
    /// Reads the following variables, keeping the default for any that are unset:
    /// - `PM_PARALLELISM` -> parallelism
    /// - `PM_MIN_COLUMNS_PER_WORKER` -> min_columns_per_worker
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup` instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        if let Some(value) = lookup(ENV_PARALLELISM) {
            config.parallelism = parse_positive(ENV_PARALLELISM, &value)?;
        }
        if let Some(value) = lookup(ENV_MIN_COLUMNS_PER_WORKER) {
            config.min_columns_per_worker = parse_positive(ENV_MIN_COLUMNS_PER_WORKER, &value)?;
        }
        Ok(config)
    }

    /// Both `parallelism` and `min_columns_per_worker` must be at least 1.
    pub fn validate(&self) -> Result<()> {
        if self.parallelism == 0 {
            return Err(invalid("parallelism", "0"));
        }
        if self.min_columns_per_worker == 0 {
            return Err(invalid("min_columns_per_worker", "0"));
        }
        Ok(())
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> MatrixError {
    MatrixError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}
