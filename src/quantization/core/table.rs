//! DpTable — dynamic-programming tables for optimal bucketing.
//!
//! Purpose
//! -------
//! Hold the value table `dp[b][j]` (best total log-likelihood of covering
//! observations `[0, j]` with exactly `b` buckets) and the parallel split
//! table (start index of the last bucket in that optimum), fill them for a
//! given [`PrefixSums`], and walk the split table backwards to recover the
//! optimal partition.
//!
//! Key behaviors
//! -------------
//! - Base layer: `dp[1][j] = ll(0, j)` for every `j`.
//! - Layer `b ≥ 2`, cell `j ≥ b − 1`:
//!   `dp[b][j] = max_{i ∈ [b−1, j]} dp[b−1][i−1] + ll(i, j)`; the running
//!   best is replaced only on a strictly greater value, so among equal
//!   candidates the lowest `i` is kept.
//! - Cells with `j < b − 1` keep the `−∞` sentinel and are never read by a
//!   valid recurrence or by recovery.
//! - [`DpTable::recover`] returns inclusive index ranges in ascending bucket
//!   order, or `QuantError::Infeasible` if the table does not describe a
//!   complete partition.
//!
//! Invariants & assumptions
//! ------------------------
//! - `1 ≤ bucket_count ≤ n` (checked by the optimizer before filling).
//! - Tables are written once per cell and never mutated after `fill`.
//! - With `Parallelism::Parallel(_)`, the cells of one layer are distributed
//!   across rayon workers. Each cell's inner loop over `i` is still
//!   sequential and only reads the previous layer, so the result is
//!   bit-identical to the sequential fill.
//!
//! Conventions
//! -----------
//! - Public accessors take the bucket count `b` 1-based (as in the
//!   recurrence); storage row `b − 1` holds layer `b`.
//! - Split entries that were never written are 0.
//!
//! Performance
//! -----------
//! - O(bucket_count · n²) time, O(bucket_count · n) memory for both tables.
//!
//! Testing notes
//! -------------
//! - Unit tests check the base layer, the sentinel region, the lowest-index
//!   tie-break, parallel/sequential equality, recovery, and the
//!   `Infeasible` path on a corrupted table.
use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;

use crate::quantization::{
    core::{
        likelihood::range_log_likelihood,
        parallelism::{MIN_CELLS_PER_THREAD, Parallelism},
        prefix::PrefixSums,
    },
    errors::{QuantError, QuantResult},
};

/// Value and split tables of one optimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct DpTable {
    values: Array2<f64>,
    splits: Array2<usize>,
}

impl DpTable {
    /// Fill the tables for `bucket_count` buckets over `prefix`.
    ///
    /// Builds the pool for `parallelism` itself and fills sequentially if
    /// that fails; use [`fill_with`](Self::fill_with) to handle the pool
    /// error.
    pub fn fill(prefix: &PrefixSums, bucket_count: usize, parallelism: Parallelism) -> Self {
        let pool = parallelism.thread_pool().unwrap_or(None);
        Self::fill_with(prefix, bucket_count, parallelism, pool.as_ref(), |_, _| {})
    }

    /// Fill the tables and call `on_layer(b, dp[b][·])` after each layer.
    ///
    /// Parameters
    /// ----------
    /// - `prefix`: `&PrefixSums`
    ///   Cumulative event counts of the sorted observations; `n = prefix.len()`.
    /// - `bucket_count`: `usize`
    ///   Number of layers; must satisfy `1 ≤ bucket_count ≤ n`.
    /// - `parallelism`: [`Parallelism`]
    ///   Hint for spreading layer cells over rayon workers.
    /// - `pool`: `Option<&rayon::ThreadPool>`
    ///   Workers for parallel layers (see [`Parallelism::thread_pool`]);
    ///   `None` fills every layer sequentially.
    /// - `on_layer`: `FnMut(usize, ArrayView1<f64>)`
    ///   Progress hook, used by the slog observer.
    ///
    /// Panics
    /// ------
    /// - Panics if `prefix` is empty or `bucket_count == 0`; the optimizer
    ///   validates both before calling.
    pub fn fill_with<F>(
        prefix: &PrefixSums, bucket_count: usize, parallelism: Parallelism,
        pool: Option<&rayon::ThreadPool>, mut on_layer: F,
    ) -> Self
    where
        F: FnMut(usize, ArrayView1<'_, f64>),
    {
        let n = prefix.len();
        let mut values = Array2::from_elem((bucket_count, n), f64::NEG_INFINITY);
        let mut splits = Array2::<usize>::zeros((bucket_count, n));

        for j in 0..n {
            values[[0, j]] = range_log_likelihood(prefix, 0, j);
        }
        on_layer(1, values.row(0));

        for b in 2..=bucket_count {
            let cells: Vec<(f64, usize)> = {
                let prev = values.row(b - 2);
                let hint = parallelism.correct_for_workload(n - (b - 1), MIN_CELLS_PER_THREAD);
                match (pool, hint.allows_parallel()) {
                    (Some(pool), true) => pool.install(|| {
                        ((b - 1)..n)
                            .into_par_iter()
                            .map(|j| best_last_bucket(prev, prefix, b, j))
                            .collect::<Vec<_>>()
                    }),
                    _ => ((b - 1)..n)
                        .map(|j| best_last_bucket(prev, prefix, b, j))
                        .collect::<Vec<_>>(),
                }
            };

            for (offset, (value, split)) in cells.into_iter().enumerate() {
                let j = b - 1 + offset;
                values[[b - 1, j]] = value;
                splits[[b - 1, j]] = split;
            }
            on_layer(b, values.row(b - 1));
        }

        DpTable { values, splits }
    }

    /// Number of layers (the bucket count the table was filled for).
    pub fn bucket_count(&self) -> usize {
        self.values.nrows()
    }

    /// Number of observations covered.
    pub fn n_obs(&self) -> usize {
        self.values.ncols()
    }

    /// `dp[b][j]`; `b` is 1-based.
    pub fn value(&self, b: usize, j: usize) -> f64 {
        self.values[[b - 1, j]]
    }

    /// `split[b][j]`; `b` is 1-based.
    pub fn split(&self, b: usize, j: usize) -> usize {
        self.splits[[b - 1, j]]
    }

    /// Layer `b` of the value table; `b` is 1-based.
    pub fn layer(&self, b: usize) -> ArrayView1<'_, f64> {
        self.values.row(b - 1)
    }

    /// Best total log-likelihood with all buckets over all observations.
    pub fn optimum(&self) -> f64 {
        self.values[[self.bucket_count() - 1, self.n_obs() - 1]]
    }

    /// Walk the split table back from `(bucket_count, n − 1)`.
    ///
    /// Returns
    /// -------
    /// `QuantResult<Vec<(usize, usize)>>`
    ///   Inclusive index ranges `(start, end)`, one per bucket, in ascending
    ///   order. Ranges are contiguous and cover `[0, n − 1]`.
    ///
    /// Errors
    /// ------
    /// - `QuantError::Infeasible` when the optimum is not finite, or a split
    ///   entry falls outside `[b − 1, j]`, or the walk does not end at
    ///   index 0.
    pub fn recover(&self) -> QuantResult<Vec<(usize, usize)>> {
        let bucket_count = self.bucket_count();
        let n = self.n_obs();
        let infeasible = QuantError::Infeasible { bucket_count, n };

        if !self.optimum().is_finite() {
            return Err(infeasible);
        }

        let mut ranges = Vec::with_capacity(bucket_count);
        let mut j = n - 1;
        for b in (1..=bucket_count).rev() {
            let i = self.split(b, j);
            if i > j || i < b - 1 || !self.value(b, j).is_finite() {
                return Err(infeasible);
            }
            ranges.push((i, j));
            if b == 1 {
                if i != 0 {
                    return Err(infeasible);
                }
            } else {
                j = i - 1;
            }
        }

        ranges.reverse();
        Ok(ranges)
    }

    #[cfg(test)]
    pub(crate) fn corrupt_split(&mut self, b: usize, j: usize, split: usize) {
        self.splits[[b - 1, j]] = split;
    }
}

// ---- Helpers ----

/// Best `(dp[b][j], split[b][j])` given layer `b − 1` in `prev`.
#[inline]
fn best_last_bucket(
    prev: ArrayView1<'_, f64>, prefix: &PrefixSums, b: usize, j: usize,
) -> (f64, usize) {
    let mut best = f64::NEG_INFINITY;
    let mut best_i = 0;
    for i in (b - 1)..=j {
        let candidate = prev[i - 1] + range_log_likelihood(prefix, i, j);
        if candidate > best {
            best = candidate;
            best_i = i;
        }
    }
    (best, best_i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantization::core::likelihood::bucket_log_likelihood;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Base layer and sentinel cells.
    // - The lowest-index tie-break on a dataset with an exact tie.
    // - Sequential vs parallel fill equality.
    // - Recovery of contiguous ranges and the Infeasible path.
    //
    // They intentionally DO NOT cover:
    // - Mapping ranges to feature values (see `rating_map` and `optimizer`).
    // -------------------------------------------------------------------------

    fn reference_prefix() -> PrefixSums {
        PrefixSums::new(array![true, false, false, true, false, false, true].view())
    }

    #[test]
    // Purpose
    // -------
    // Layer 1 equals ll(0, j) and cells with j < b − 1 stay at −∞.
    //
    // Given
    // -----
    // - Outcomes [1, 0, 0, 1, 0, 0, 1], bucket_count = 3.
    //
    // Expect
    // ------
    // - dp[1][j] == ll(0, j) for all j.
    // - dp[2][0], dp[3][0], dp[3][1] are −∞.
    fn fill_sets_base_layer_and_keeps_sentinels() {
        let prefix = reference_prefix();

        let table = DpTable::fill(&prefix, 3, Parallelism::Sequential);

        for j in 0..7 {
            assert_eq!(table.value(1, j), range_log_likelihood(&prefix, 0, j));
        }
        assert_eq!(table.value(2, 0), f64::NEG_INFINITY);
        assert_eq!(table.value(3, 0), f64::NEG_INFINITY);
        assert_eq!(table.value(3, 1), f64::NEG_INFINITY);
        assert!(table.value(3, 2).is_finite());
    }

    #[test]
    // Purpose
    // -------
    // On an exact tie the lowest split index wins.
    //
    // Given
    // -----
    // - Outcomes [1, 0, 0, 1, 0, 0, 1], bucket_count = 2. Splitting at
    //   i = 1 and at i = 6 both give ll(2 events in 6) + 0.0.
    //
    // Expect
    // ------
    // - split[2][6] == 1 and dp[2][6] == ll(6, 2).
    fn fill_breaks_ties_toward_lowest_split_index() {
        let prefix = reference_prefix();

        let table = DpTable::fill(&prefix, 2, Parallelism::Sequential);

        assert_eq!(table.split(2, 6), 1);
        assert_eq!(table.optimum(), bucket_log_likelihood(6, 2));
    }

    #[test]
    // Purpose
    // -------
    // The parallel fill produces identical tables.
    //
    // Given
    // -----
    // - 400 alternating-block outcomes, bucket_count = 4, four workers.
    //
    // Expect
    // ------
    // - Value and split tables are equal element-wise.
    fn parallel_fill_matches_sequential_fill() {
        let outcomes: Array1<bool> = (0..400).map(|i| (i / 7) % 3 == 0 || i % 11 == 0).collect();
        let prefix = PrefixSums::new(outcomes.view());

        let sequential = DpTable::fill(&prefix, 4, Parallelism::Sequential);
        let parallel = DpTable::fill(&prefix, 4, Parallelism::Parallel(4));

        assert_eq!(sequential, parallel);
    }

    #[test]
    // Purpose
    // -------
    // Recovery yields contiguous ascending ranges covering every index.
    //
    // Given
    // -----
    // - Reference outcomes, bucket_count = 3.
    //
    // Expect
    // ------
    // - 3 ranges, first starts at 0, last ends at 6, each starts one past
    //   the previous end.
    fn recover_returns_contiguous_ranges() {
        let table = DpTable::fill(&reference_prefix(), 3, Parallelism::Sequential);

        let ranges = table.recover().unwrap();

        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0].0, 0);
        assert_eq!(ranges[2].1, 6);
        for pair in ranges.windows(2) {
            assert_eq!(pair[1].0, pair[0].1 + 1);
        }
    }

    #[test]
    // Purpose
    // -------
    // A corrupted split entry is reported as Infeasible, not as a map.
    //
    // Given
    // -----
    // - A valid 2-bucket table whose split[2][6] is overwritten with 0
    //   (outside [b − 1, j]).
    //
    // Expect
    // ------
    // - `Err(QuantError::Infeasible { bucket_count: 2, n: 7 })`.
    fn recover_reports_infeasible_on_corrupted_split() {
        let mut table = DpTable::fill(&reference_prefix(), 2, Parallelism::Sequential);
        table.corrupt_split(2, 6, 0);

        assert_eq!(table.recover(), Err(QuantError::Infeasible { bucket_count: 2, n: 7 }));
    }

    #[test]
    // Purpose
    // -------
    // With all outcomes zero, every reachable cell is exactly 0.0.
    //
    // Given
    // -----
    // - 12 zero outcomes, bucket_count = 4.
    //
    // Expect
    // ------
    // - For b in 1..=4 and j ≥ b − 1: dp[b][j] == 0.0 and not NaN.
    fn all_zero_outcomes_give_exact_zero_cells() {
        let prefix = PrefixSums::new(Array1::from_elem(12, false).view());

        let table = DpTable::fill(&prefix, 4, Parallelism::Sequential);

        for b in 1..=4 {
            for j in (b - 1)..12 {
                let value = table.value(b, j);
                assert!(!value.is_nan());
                assert_eq!(value, 0.0, "dp[{b}][{j}]");
            }
        }
    }
}
