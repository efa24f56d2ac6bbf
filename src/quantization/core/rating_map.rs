//! RatingMap — ordered bucket boundaries and feature lookup.
//!
//! Purpose
//! -------
//! Represent the result of an optimizer run: an ordered, fixed-size sequence
//! of [`Boundary`] values indexed by rating `1..=bucket_count`, plus the
//! optimal total log-likelihood, and map query feature values to ratings.
//!
//! Key behaviors
//! -------------
//! - [`RatingMap::classify`] scans ratings in ascending order and returns the
//!   first whose inclusive `[min_feature, max_feature]` contains the value.
//! - Values above every bucket get the highest rating.
//! - Values below every bucket follow the map's [`LowerTailPolicy`].
//! - Values inside the training range that fall between two buckets
//!   (after `boundary[r].max_feature` and before `boundary[r + 1].min_feature`)
//!   follow the map's [`GapPolicy`]: the highest rating by default, or `r`.
//! - `NaN` matches nothing and gets the highest rating.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least one boundary; ratings are `1, 2, …` in storage order.
//! - `boundary[r].max_feature ≤ boundary[r + 1].min_feature`.
//! - Boundary values are observed feature values, never interpolated.
//! - Immutable after construction; only the optimizer creates maps.
//!
//! Testing notes
//! -------------
//! - Unit tests cover containment, ties on shared edges, both tails under
//!   both lower-tail policies, gap values under both gap policies, and NaN.
use crate::quantization::core::options::{GapPolicy, LowerTailPolicy};

/// Boundary — one bucket of a rating map.
///
/// Fields
/// ------
/// - `rating`: `usize`
///   1-based bucket index.
/// - `min_feature`, `max_feature`: `f64`
///   Inclusive feature range; both are observed values.
/// - `n_obs`: `usize`
///   Training observations in the bucket.
/// - `n_events`: `usize`
///   Training events (outcome 1) in the bucket.
/// - `log_likelihood`: `f64`
///   The bucket's Bernoulli log-likelihood (0.0 for pure buckets).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub rating: usize,
    pub min_feature: f64,
    pub max_feature: f64,
    pub n_obs: usize,
    pub n_events: usize,
    pub log_likelihood: f64,
}

impl Boundary {
    /// Observed event rate `n_events / n_obs`.
    pub fn event_rate(&self) -> f64 {
        self.n_events as f64 / self.n_obs as f64
    }

    /// `true` if `value` lies in `[min_feature, max_feature]`.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min_feature <= value && value <= self.max_feature
    }
}

/// RatingMap — optimal bucket boundaries for one dataset.
///
/// Fields
/// ------
/// - `boundaries`: `Vec<Boundary>`
///   Buckets in ascending rating order.
/// - `total_log_likelihood`: `f64`
///   `dp[bucket_count][n − 1]` of the run that produced the map.
/// - `n_obs`: `usize`
///   Size of the training set.
/// - `lower_tail`: [`LowerTailPolicy`]
///   Lookup policy for values below the first bucket.
/// - `gap`: [`GapPolicy`]
///   Lookup policy for values between two buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMap {
    boundaries: Vec<Boundary>,
    total_log_likelihood: f64,
    n_obs: usize,
    lower_tail: LowerTailPolicy,
    gap: GapPolicy,
}

impl RatingMap {
    pub(crate) fn new(
        boundaries: Vec<Boundary>, total_log_likelihood: f64, n_obs: usize,
        lower_tail: LowerTailPolicy, gap: GapPolicy,
    ) -> Self {
        debug_assert!(!boundaries.is_empty());
        RatingMap { boundaries, total_log_likelihood, n_obs, lower_tail, gap }
    }

    /// Rating of a feature value.
    ///
    /// Returns
    /// -------
    /// `usize` in `1..=len()`:
    /// - the first rating whose range contains `value`;
    /// - otherwise the highest rating if `value` exceeds every bucket or is
    ///   `NaN`;
    /// - otherwise, below the first bucket, rating 1 or the highest rating
    ///   per [`LowerTailPolicy`];
    /// - otherwise (a gap between buckets `r` and `r + 1`) the highest rating
    ///   or `r` per [`GapPolicy`].
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_quantization::quantization::prelude::*;
    /// let set = ObservationSet::new(vec![
    ///     Observation::new(500.0, true),
    ///     Observation::new(550.0, true),
    ///     Observation::new(700.0, false),
    ///     Observation::new(750.0, false),
    /// ])
    /// .unwrap();
    /// let map = optimize(&set, 2).unwrap();
    /// assert_eq!(map.classify(520.0), 1);
    /// assert_eq!(map.classify(720.0), 2);
    /// assert_eq!(map.classify(900.0), 2);
    /// ```
    pub fn classify(&self, value: f64) -> usize {
        let highest = self.boundaries.len();

        if let Some(bucket) = self.boundaries.iter().find(|b| b.contains(value)) {
            return bucket.rating;
        }
        if value.is_nan() {
            return highest;
        }

        let first = &self.boundaries[0];
        if value < first.min_feature {
            return match self.lower_tail {
                LowerTailPolicy::HighestBucket => highest,
                LowerTailPolicy::LowestBucket => first.rating,
            };
        }

        let last = &self.boundaries[highest - 1];
        if value > last.max_feature {
            return highest;
        }

        match self.gap {
            GapPolicy::HighestBucket => highest,
            GapPolicy::LowerBucket => self
                .boundaries
                .iter()
                .rev()
                .find(|b| b.max_feature < value)
                .map_or(highest, |b| b.rating),
        }
    }

    /// Buckets in ascending rating order.
    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    /// Bucket for a 1-based `rating`.
    pub fn get(&self, rating: usize) -> Option<&Boundary> {
        rating.checked_sub(1).and_then(|idx| self.boundaries.get(idx))
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Highest rating (equal to [`len`](Self::len)).
    pub fn highest_rating(&self) -> usize {
        self.boundaries.len()
    }

    /// Optimal total log-likelihood of the training data under this map.
    pub fn total_log_likelihood(&self) -> f64 {
        self.total_log_likelihood
    }

    /// Number of training observations.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    pub fn lower_tail(&self) -> LowerTailPolicy {
        self.lower_tail
    }

    pub fn gap(&self) -> GapPolicy {
        self.gap
    }

    /// `(rating, min_feature, max_feature)` triples in rating order.
    pub fn to_rows(&self) -> Vec<(usize, f64, f64)> {
        self.boundaries.iter().map(|b| (b.rating, b.min_feature, b.max_feature)).collect()
    }
}

/// Free-function form of [`RatingMap::classify`].
pub fn classify(rating_map: &RatingMap, value: f64) -> usize {
    rating_map.classify(value)
}
