//! quantization::core — data, tables and lookup for optimal bucketing.
//!
//! Purpose
//! -------
//! Hold the building blocks of a rating-map build: validated observation
//! sets, run options, prefix sums, the bucket likelihood, the
//! dynamic-programming tables, and the resulting [`RatingMap`].
//!
//! Key behaviors
//! -------------
//! - [`data`]: [`Observation`] and the feature-sorted [`ObservationSet`].
//! - [`options`]: [`QuantizeOptions`], [`LowerTailPolicy`] and [`GapPolicy`].
//! - [`parallelism`]: the [`Parallelism`] hint for the table fill.
//! - [`prefix`]: O(1) range counts via [`PrefixSums`].
//! - [`likelihood`]: pure-bucket-safe Bernoulli log-likelihood.
//! - [`table`]: [`DpTable`] fill and boundary recovery.
//! - [`rating_map`]: [`Boundary`], [`RatingMap`] and [`classify`].
//! - [`validation`]: shared precondition guards.
//!
//! Conventions
//! -----------
//! - Observation indices are 0-based in sorted order; ratings and the
//!   bucket-count axis of the tables are 1-based.
//!
//! Testing notes
//! -------------
//! - Each submodule carries its own unit tests; the optimizer module and the
//!   integration tests exercise them together.

pub mod data;
pub mod likelihood;
pub mod options;
pub mod parallelism;
pub mod prefix;
pub mod rating_map;
pub mod table;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{Observation, ObservationSet};
pub use self::likelihood::{bucket_log_likelihood, range_log_likelihood};
pub use self::options::{DEFAULT_BUCKET_COUNT, GapPolicy, LowerTailPolicy, QuantizeOptions};
pub use self::parallelism::Parallelism;
pub use self::prefix::PrefixSums;
pub use self::rating_map::{Boundary, RatingMap, classify};
pub use self::table::DpTable;
