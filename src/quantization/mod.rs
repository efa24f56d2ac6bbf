//! quantization — optimal supervised bucketing of a continuous feature.
//!
//! Purpose
//! -------
//! Partition a continuous feature (e.g. a FICO score) into a fixed number of
//! contiguous, ordered buckets so that the total Bernoulli log-likelihood of
//! a binary outcome (e.g. default) is maximized, each bucket carrying its
//! own constant event rate. The result is a rating map used to assign a
//! rating to any feature value.
//!
//! Key behaviors
//! -------------
//! - [`optimize`] / [`optimize_with`] solve the bucketing exactly with an
//!   O(bucket_count · n²) dynamic program over prefix sums and return a
//!   [`RatingMap`].
//! - [`RatingMap::classify`] maps a feature value to its rating, with an
//!   explicit policy for values outside the training range.
//! - Errors from every stage are reported as [`QuantError`] via
//!   [`QuantResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Input is a validated [`ObservationSet`]: non-empty, finite features,
//!   sorted ascending.
//! - `1 ≤ bucket_count ≤ n`.
//! - Equal-likelihood alternatives resolve to the lowest split index, so
//!   boundaries are deterministic.
//! - No state persists between runs.
//!
//! Conventions
//! -----------
//! - Outcome `true` is the event; ratings are 1-based and increase with the
//!   feature.
//! - Log-likelihoods use the natural logarithm and are ≤ 0.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_quantization::quantization::prelude::*;
//!
//!   let set = ObservationSet::from_unsorted(vec![
//!       Observation::new(720.0, false),
//!       Observation::new(580.0, true),
//!       Observation::new(650.0, false),
//!   ])?;
//!   let map = optimize(&set, 2)?;
//!   let rating = map.classify(600.0);
//!   # assert!(rating >= 1);
//!   # Ok::<(), QuantError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; end-to-end properties are in
//!   `tests/integration_rating_pipeline.rs`.

pub mod core;
pub mod errors;
#[cfg(feature = "obs_slog")]
pub mod observer;
pub mod optimizer;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    Boundary, GapPolicy, LowerTailPolicy, Observation, ObservationSet, Parallelism,
    QuantizeOptions, RatingMap, classify,
};
pub use self::errors::{QuantError, QuantErrorKind, QuantResult};
pub use self::optimizer::{optimize, optimize_with};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_quantization::quantization::prelude::*;
//
// to import the main quantization surface in a single line.

pub mod prelude {
    pub use super::core::{
        Boundary, GapPolicy, LowerTailPolicy, Observation, ObservationSet, Parallelism,
        QuantizeOptions, RatingMap, classify,
    };
    pub use super::errors::{QuantError, QuantErrorKind, QuantResult};
    pub use super::optimizer::{optimize, optimize_with};
}
