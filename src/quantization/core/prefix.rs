//! Cumulative event counts for O(1) range queries.
//!
//! [`PrefixSums`] is built once per optimizer run from the sorted outcome
//! column and answers `range(i, j) → (n_ij, k_ij)` for any inclusive index
//! range. The observation count up to `i` is just `i`, so only events are
//! stored.
use ndarray::{Array1, ArrayView1};

/// Cumulative event counts over a sorted observation set.
///
/// `events[i]` holds the number of events in `[0, i)`; the array has length
/// `n + 1` with `events[0] == 0` and is non-decreasing.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixSums {
    events: Array1<u64>,
}

impl PrefixSums {
    pub fn new(outcomes: ArrayView1<'_, bool>) -> Self {
        let mut events = Array1::<u64>::zeros(outcomes.len() + 1);
        let mut running = 0_u64;
        for (idx, &outcome) in outcomes.iter().enumerate() {
            running += u64::from(outcome);
            events[idx + 1] = running;
        }
        PrefixSums { events }
    }

    /// Number of observations covered.
    pub fn len(&self) -> usize {
        self.events.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Observations in `[0, i)`.
    #[inline]
    pub fn count(&self, i: usize) -> usize {
        debug_assert!(i <= self.len());
        i
    }

    /// Events in `[0, i)`.
    #[inline]
    pub fn events(&self, i: usize) -> u64 {
        self.events[i]
    }

    /// `(n_ij, k_ij)` for the inclusive range `[i, j]`.
    ///
    /// Panics if `i > j` or `j >= len()`; callers stay within the table
    /// bounds.
    #[inline]
    pub fn range(&self, i: usize, j: usize) -> (u64, u64) {
        debug_assert!(i <= j && j < self.len());
        let n = (self.count(j + 1) - self.count(i)) as u64;
        let k = self.events[j + 1] - self.events[i];
        (n, k)
    }
}
