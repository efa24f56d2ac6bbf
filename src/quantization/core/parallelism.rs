//! Parallelism hint for the dynamic-program fill.
//!
//! A [`Parallelism`] value tells the table filler whether it may spread the
//! cells of one bucket layer across rayon workers. It is a hint: small
//! layers are downgraded to sequential execution by
//! [`Parallelism::correct_for_workload`].
//!
//! A `Parallel(n)` run builds its own rayon pool of `n` workers through
//! [`Parallelism::thread_pool`]; the pool lives for one optimizer call. If
//! rayon cannot start the workers, the fill runs sequentially instead. The
//! result is identical, and with `obs_slog` + `verbose` the fallback is
//! logged as a warning.

/// Minimum number of cells per worker before a layer is split.
pub const MIN_CELLS_PER_THREAD: usize = 64;

/// Execution strategy for filling one DP layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// Strictly sequential, no thread pool involvement.
    #[default]
    Sequential,
    /// Up to `n` rayon workers. `n <= 1` behaves like `Sequential`.
    Parallel(usize),
}

impl Parallelism {
    /// Create a hint from a thread count.
    ///
    /// - `0` → rayon's current thread count
    /// - `1` → sequential
    /// - `n > 1` → parallel with `n` threads
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        match n_threads {
            0 => Self::Parallel(rayon::current_num_threads()),
            1 => Self::Sequential,
            n => Self::Parallel(n),
        }
    }

    /// `true` if parallel execution is allowed.
    #[inline]
    pub fn allows_parallel(self) -> bool {
        matches!(self, Self::Parallel(n) if n > 1)
    }

    /// Thread count hint (1 for sequential).
    #[inline]
    pub fn n_threads(self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Parallel(n) => n.max(1),
        }
    }

    /// Downgrade to sequential when a layer has too few cells to share.
    #[inline]
    pub fn correct_for_workload(self, n_items: usize, min_items_per_thread: usize) -> Self {
        match self {
            Self::Sequential => Self::Sequential,
            Self::Parallel(n) => {
                let effective = n.min(n_items / min_items_per_thread.max(1)).max(1);
                if effective <= 1 { Self::Sequential } else { Self::Parallel(effective) }
            }
        }
    }

    /// Dedicated pool sized to the hint.
    ///
    /// Returns
    /// -------
    /// - `Ok(None)` when the hint does not allow parallel work.
    /// - `Ok(Some(pool))` with `n_threads()` workers otherwise.
    ///
    /// Errors
    /// ------
    /// - `rayon::ThreadPoolBuildError` when the workers cannot be spawned;
    ///   callers fall back to a sequential fill.
    pub fn thread_pool(self) -> Result<Option<rayon::ThreadPool>, rayon::ThreadPoolBuildError> {
        if !self.allows_parallel() {
            return Ok(None);
        }
        rayon::ThreadPoolBuilder::new().num_threads(self.n_threads()).build().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_threads_maps_zero_one_and_many() {
        assert_eq!(Parallelism::from_threads(1), Parallelism::Sequential);
        assert_eq!(Parallelism::from_threads(4), Parallelism::Parallel(4));
        assert!(Parallelism::from_threads(0).n_threads() >= 1);
    }

    #[test]
    fn small_layers_fall_back_to_sequential() {
        let hint = Parallelism::Parallel(8);

        assert_eq!(hint.correct_for_workload(100, MIN_CELLS_PER_THREAD), Parallelism::Sequential);
        assert_eq!(hint.correct_for_workload(10_000, MIN_CELLS_PER_THREAD), Parallelism::Parallel(8));
        assert_eq!(hint.correct_for_workload(256, MIN_CELLS_PER_THREAD), Parallelism::Parallel(4));
        assert!(!Parallelism::Parallel(1).allows_parallel());
    }

    #[test]
    fn thread_pool_is_sized_to_parallel_hints_only() {
        assert!(Parallelism::Sequential.thread_pool().unwrap().is_none());
        assert!(Parallelism::Parallel(1).thread_pool().unwrap().is_none());

        let pool = Parallelism::Parallel(2).thread_pool().unwrap().unwrap();
        assert_eq!(pool.current_num_threads(), 2);
    }
}
