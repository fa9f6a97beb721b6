use std::fmt;
use std::ops::RangeInclusive;

/// An inclusive range `[start, end]` of output columns owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub end: usize,
}

// A partition always holds at least one column.
#[allow(clippy::len_without_is_empty)]
impl Partition {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "empty partition [{}, {}]", start, end);
        Partition { start, end }
    }

    /// Number of columns in this partition.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn columns(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Split `columns` output columns across at most `parallelism` workers.
///
/// - Fewer than `parallelism * min_columns_per_worker` columns: one partition
///   covering everything.
/// - Otherwise the base stride is `columns / parallelism`, and each partition
///   spans `[i, i + stride - 1]`. The last slot, or any slot that would run
///   past the final column, is widened to `[i, columns - 1]` and planning
///   stops there. The last partition therefore absorbs the remainder.
///
/// Zero columns yields an empty plan. Zero `parallelism` or
/// `min_columns_per_worker` are treated as 1.
pub fn plan_partitions(
    columns: usize,
    parallelism: usize,
    min_columns_per_worker: usize,
) -> Vec<Partition> {
    if columns == 0 {
        return Vec::new();
    }
    let parallelism = parallelism.max(1);
    let min_columns = min_columns_per_worker.max(1);
    let last = columns - 1;

    if columns < parallelism.saturating_mul(min_columns) {
        return vec![Partition::new(0, last)];
    }

    // columns >= parallelism here, so this cannot underflow.
    let size = columns / parallelism - 1;
    let mut partitions = Vec::with_capacity(parallelism);
    let mut start = 0;
    while partitions.len() < parallelism {
        let last_slot = partitions.len() + 1 == parallelism;
        if start + size < columns && !last_slot {
            partitions.push(Partition::new(start, start + size));
            start += size + 1;
        } else {
            partitions.push(Partition::new(start, last));
            break;
        }
    }
    partitions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(partitions: &[Partition]) -> Vec<(usize, usize)> {
        partitions.iter().map(|p| (p.start, p.end)).collect()
    }

    #[test]
    fn test_partition_len() {
        let p = Partition::new(4, 7);
        assert_eq!(p.len(), 4);
        assert_eq!(p.columns().collect::<Vec<_>>(), vec![4, 5, 6, 7]);
        assert_eq!(p.to_string(), "[4, 7]");
    }

    #[test]
    fn test_small_problem_single_partition() {
        // 7 < 2 * 4
        assert_eq!(spans(&plan_partitions(7, 2, 4)), vec![(0, 6)]);
        assert_eq!(spans(&plan_partitions(1, 8, 4)), vec![(0, 0)]);
    }

    #[test]
    fn test_even_split() {
        assert_eq!(
            spans(&plan_partitions(16, 4, 4)),
            vec![(0, 3), (4, 7), (8, 11), (12, 15)]
        );
    }

    #[test]
    fn test_remainder_goes_to_last() {
        assert_eq!(
            spans(&plan_partitions(19, 4, 4)),
            vec![(0, 3), (4, 7), (8, 11), (12, 18)]
        );
        assert_eq!(spans(&plan_partitions(11, 3, 1)), vec![(0, 2), (3, 5), (6, 10)]);
    }

    #[test]
    fn test_threshold_boundary() {
        // Exactly parallelism * min columns is enough to split.
        assert_eq!(spans(&plan_partitions(8, 2, 4)), vec![(0, 3), (4, 7)]);
    }

    #[test]
    fn test_one_column_per_worker() {
        assert_eq!(
            spans(&plan_partitions(3, 3, 1)),
            vec![(0, 0), (1, 1), (2, 2)]
        );
    }

    #[test]
    fn test_single_worker() {
        assert_eq!(spans(&plan_partitions(100, 1, 4)), vec![(0, 99)]);
    }

    #[test]
    fn test_zero_columns() {
        assert!(plan_partitions(0, 4, 4).is_empty());
    }

    #[test]
    fn test_zero_parameters_treated_as_one() {
        assert_eq!(spans(&plan_partitions(5, 0, 0)), vec![(0, 4)]);
        assert_eq!(spans(&plan_partitions(2, 2, 0)), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_coverage_is_exact() {
        for columns in 0..200 {
            for parallelism in 1..17 {
                for min_columns in 1..6 {
                    let plan = plan_partitions(columns, parallelism, min_columns);
                    assert!(plan.len() <= parallelism);

                    let mut next = 0;
                    for p in &plan {
                        assert_eq!(
                            p.start, next,
                            "gap or overlap for columns={} p={} min={}",
                            columns, parallelism, min_columns
                        );
                        assert!(p.end >= p.start);
                        next = p.end + 1;
                    }
                    assert_eq!(next, columns);

                    if columns > 0 && columns < parallelism * min_columns {
                        assert_eq!(plan.len(), 1);
                    }
                }
            }
        }
    }
}
