//! quantization::optimizer — maximum-likelihood bucketing entry points.
//!
//! Purpose
//! -------
//! Turn a validated [`ObservationSet`] and a bucket count into the
//! log-likelihood-optimal [`RatingMap`]: the partition of the sorted feature
//! axis into contiguous buckets that maximizes the summed Bernoulli
//! log-likelihood of the outcomes, each bucket with its own event rate.
//!
//! Key behaviors
//! -------------
//! - [`optimize`] runs with default options for a given bucket count.
//! - [`optimize_with`] takes a full [`QuantizeOptions`] (order check,
//!   parallelism, lower-tail policy, verbosity).
//! - Each run builds [`PrefixSums`], fills a [`DpTable`], recovers the
//!   optimal ranges, and converts them to boundaries at observed feature
//!   values. The tables are dropped before the map is returned.
//!
//! Invariants & assumptions
//! ------------------------
//! - Preconditions `1 ≤ bucket_count ≤ n` and ascending features are checked
//!   before any table is allocated.
//! - On success the map has exactly `bucket_count` contiguous buckets that
//!   together cover every observation; on failure no map exists.
//! - Given the same observations and bucket count, the boundaries are
//!   bit-identical across runs and across parallelism settings.
//!
//! Downstream usage
//! ----------------
//! - Build the map once from training data and keep it for the lifetime of
//!   all lookups via [`RatingMap::classify`].
//!
//! Testing notes
//! -------------
//! - Unit tests here cover the documented scenario with its exact tie, the
//!   `bucket_count = 1` and `bucket_count = n` extremes, error paths, and the
//!   per-bucket statistics. Randomized properties (monotonicity in the
//!   bucket count, brute-force agreement, lookup of training points) live in
//!   `tests/integration_rating_pipeline.rs`.
use crate::quantization::{
    core::{
        data::ObservationSet,
        likelihood::bucket_log_likelihood,
        options::QuantizeOptions,
        prefix::PrefixSums,
        rating_map::{Boundary, RatingMap},
        table::DpTable,
        validation::{validate_bucket_count, validate_features},
    },
    errors::QuantResult,
};

#[cfg(feature = "obs_slog")]
use crate::quantization::observer::SlogObserver;

/// Build the optimal rating map with `bucket_count` buckets.
///
/// Equivalent to [`optimize_with`] with `QuantizeOptions::default()` and the
/// given bucket count.
///
/// Errors
/// ------
/// - `QuantError::InvalidBucketCount` when `bucket_count == 0` or
///   `bucket_count > observations.len()`.
/// - `QuantError::UnsortedFeatures` if the set's order does not hold.
/// - `QuantError::Infeasible` if the tables do not describe a complete
///   partition.
///
/// Examples
/// --------
/// ```rust
/// # use rust_quantization::quantization::prelude::*;
/// let rows = [(500.0, 1), (550.0, 0), (600.0, 0), (650.0, 1), (700.0, 0), (750.0, 0), (800.0, 1)];
/// let set = ObservationSet::new(
///     rows.iter().map(|&(f, y)| Observation::new(f, y == 1)).collect(),
/// )
/// .unwrap();
///
/// let map = optimize(&set, 2).unwrap();
/// assert_eq!(map.to_rows(), vec![(1, 500.0, 500.0), (2, 550.0, 800.0)]);
/// ```
pub fn optimize(observations: &ObservationSet, bucket_count: usize) -> QuantResult<RatingMap> {
    let opts = QuantizeOptions { bucket_count, ..QuantizeOptions::default() };
    optimize_with(observations, &opts)
}

/// Build the optimal rating map under explicit options.
///
/// Parameters
/// ----------
/// - `observations`: `&ObservationSet`
///   Training data, sorted ascending by feature.
/// - `opts`: `&QuantizeOptions`
///   Bucket count plus run settings. `opts.lower_tail` and `opts.gap` are
///   stored on the returned map.
///
/// Returns
/// -------
/// `QuantResult<RatingMap>`
///   Buckets in ascending rating order with per-bucket counts and
///   log-likelihoods, and the optimal total log-likelihood.
///
/// Errors
/// ------
/// - See [`optimize`].
///
/// Panics
/// ------
/// - Never panics on invalid input; all precondition failures are errors.
pub fn optimize_with(
    observations: &ObservationSet, opts: &QuantizeOptions,
) -> QuantResult<RatingMap> {
    let n = observations.len();
    validate_bucket_count(opts.bucket_count, n)?;

    let features = observations.features();
    if opts.validate_sorted {
        match features.as_slice() {
            Some(slice) => validate_features(slice, true)?,
            None => validate_features(&features.to_vec(), true)?,
        }
    }

    let prefix = PrefixSums::new(observations.outcomes());

    #[cfg(feature = "obs_slog")]
    let observer = opts.verbose.then(SlogObserver::term_noblock);
    #[cfg(feature = "obs_slog")]
    if let Some(observer) = &observer {
        observer.on_start(n, opts.bucket_count, observations.event_count());
    }

    // A pool that cannot be built degrades to a sequential fill.
    let pool = match opts.parallelism.thread_pool() {
        Ok(pool) => pool,
        Err(_err) => {
            #[cfg(feature = "obs_slog")]
            if let Some(observer) = &observer {
                observer.on_sequential_fallback(opts.parallelism.n_threads(), &_err);
            }
            None
        }
    };

    let table = DpTable::fill_with(
        &prefix,
        opts.bucket_count,
        opts.parallelism,
        pool.as_ref(),
        |b, layer| {
            #[cfg(feature = "obs_slog")]
            if let Some(observer) = &observer {
                observer.on_layer(b, layer);
            }
            #[cfg(not(feature = "obs_slog"))]
            let _ = (b, layer);
        },
    );

    let ranges = table.recover()?;
    let total_log_likelihood = table.optimum();
    drop(table);

    let boundaries: Vec<Boundary> = ranges
        .iter()
        .enumerate()
        .map(|(idx, &(start, end))| {
            let (n_obs, n_events) = prefix.range(start, end);
            Boundary {
                rating: idx + 1,
                min_feature: features[start],
                max_feature: features[end],
                n_obs: n_obs as usize,
                n_events: n_events as usize,
                log_likelihood: bucket_log_likelihood(n_obs, n_events),
            }
        })
        .collect();

    let rating_map = RatingMap::new(boundaries, total_log_likelihood, n, opts.lower_tail, opts.gap);

    #[cfg(feature = "obs_slog")]
    if let Some(observer) = &observer {
        observer.on_finish(&rating_map);
    }

    Ok(rating_map)
}
