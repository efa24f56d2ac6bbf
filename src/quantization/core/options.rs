//! Quantization options — configuration for one optimizer run.
//!
//! Purpose
//! -------
//! Collect the knobs of a rating-map build in one value: the bucket count,
//! whether the optimizer re-checks feature order, the parallelism hint for
//! the table fill, the lookup policies for queries below the training range
//! or between two buckets, and verbosity.
//!
//! Key behaviors
//! -------------
//! - [`QuantizeOptions::new`] rejects a zero bucket count up front; the
//!   upper bound (`bucket_count ≤ n`) depends on the data and is enforced by
//!   the optimizer.
//! - `with_*` builders adjust single fields of an existing value.
//! - [`LowerTailPolicy`] and [`GapPolicy`] parse from case-insensitive
//!   strings so they can be set from Python.
//!
//! Conventions
//! -----------
//! - The default bucket count is [`DEFAULT_BUCKET_COUNT`] (5 ratings).
//! - `verbose` only has an effect with the `obs_slog` feature.
//!
//! Testing notes
//! -------------
//! - Unit tests check defaults, constructor validation, builder methods and
//!   policy parsing. Behavioral effects are tested where the options are
//!   consumed (optimizer and rating map).
use std::str::FromStr;

use crate::quantization::{
    core::parallelism::Parallelism,
    errors::{QuantError, QuantResult},
};

/// Default number of ratings in a rating map.
pub const DEFAULT_BUCKET_COUNT: usize = 5;

/// LowerTailPolicy — lookup result for values below every bucket.
///
/// Variants
/// --------
/// - `HighestBucket`
///   Below-range queries fall through to the same fallback as above-range
///   queries and receive the highest rating. This reproduces the behavior
///   of the established rating procedure and is the default.
/// - `LowestBucket`
///   Below-range queries receive rating 1, the bucket nearest to them on
///   the feature axis.
///
/// Parsing
/// -------
/// `"highest"` / `"lowest"` (case-insensitive); anything else returns
/// `QuantError::InvalidLowerTail`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LowerTailPolicy {
    #[default]
    HighestBucket,
    LowestBucket,
}

impl FromStr for LowerTailPolicy {
    type Err = QuantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highest" => Ok(LowerTailPolicy::HighestBucket),
            "lowest" => Ok(LowerTailPolicy::LowestBucket),
            _ => Err(QuantError::InvalidLowerTail { name: s.to_string() }),
        }
    }
}

/// GapPolicy — lookup result for values that fall between two buckets.
///
/// Boundaries are observed feature values, so a query inside the training
/// range can land after `boundary[r].max_feature` and before
/// `boundary[r + 1].min_feature`.
///
/// Variants
/// --------
/// - `HighestBucket`
///   Gap queries fall through to the highest rating, like every other value
///   no bucket contains. Default.
/// - `LowerBucket`
///   Gap queries receive rating `r`, the bucket that ends below them.
///
/// Parsing
/// -------
/// `"highest"` / `"lower"` (case-insensitive); anything else returns
/// `QuantError::InvalidGapPolicy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GapPolicy {
    #[default]
    HighestBucket,
    LowerBucket,
}

impl FromStr for GapPolicy {
    type Err = QuantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highest" => Ok(GapPolicy::HighestBucket),
            "lower" => Ok(GapPolicy::LowerBucket),
            _ => Err(QuantError::InvalidGapPolicy { name: s.to_string() }),
        }
    }
}

/// QuantizeOptions — configuration for [`optimize_with`](crate::quantization::optimizer::optimize_with).
///
/// Fields
/// ------
/// - `bucket_count`: `usize`
///   Number of buckets (ratings) to produce. Must be ≥ 1 and ≤ the number
///   of observations at optimization time.
/// - `validate_sorted`: `bool`
///   Re-scan the feature column for ascending order before filling the
///   tables. Default `true`.
/// - `parallelism`: [`Parallelism`]
///   Hint for spreading each DP layer over rayon workers. Default
///   `Sequential`.
/// - `lower_tail`: [`LowerTailPolicy`]
///   Stored on the resulting rating map and used by `classify`.
/// - `gap`: [`GapPolicy`]
///   Likewise, for values between two buckets.
/// - `verbose`: `bool`
///   Emit progress through the slog observer (feature `obs_slog`).
///
/// Invariants
/// ----------
/// - `bucket_count ≥ 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeOptions {
    pub bucket_count: usize,
    pub validate_sorted: bool,
    pub parallelism: Parallelism,
    pub lower_tail: LowerTailPolicy,
    pub gap: GapPolicy,
    pub verbose: bool,
}

impl QuantizeOptions {
    /// Create options for `bucket_count` buckets with default settings
    /// otherwise.
    ///
    /// Errors
    /// ------
    /// - `QuantError::InvalidBucketCount` when `bucket_count == 0`. The
    ///   reported `n` is 0 because the dataset is not known yet.
    pub fn new(bucket_count: usize) -> QuantResult<Self> {
        if bucket_count == 0 {
            return Err(QuantError::InvalidBucketCount {
                bucket_count,
                n: 0,
                reason: "Bucket count must be at least 1.",
            });
        }
        Ok(QuantizeOptions { bucket_count, ..Self::default() })
    }

    pub fn with_validate_sorted(mut self, validate_sorted: bool) -> Self {
        self.validate_sorted = validate_sorted;
        self
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_lower_tail(mut self, lower_tail: LowerTailPolicy) -> Self {
        self.lower_tail = lower_tail;
        self
    }

    pub fn with_gap(mut self, gap: GapPolicy) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        QuantizeOptions {
            bucket_count: DEFAULT_BUCKET_COUNT,
            validate_sorted: true,
            parallelism: Parallelism::Sequential,
            lower_tail: LowerTailPolicy::HighestBucket,
            gap: GapPolicy::HighestBucket,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Defaults match the documented values.
    //
    // Expect
    // ------
    // - 5 buckets, order validation on, sequential, highest-bucket lower
    //   tail and gap fallback, quiet.
    fn quantize_options_default_matches_documentation() {
        let opts = QuantizeOptions::default();

        assert_eq!(opts.bucket_count, DEFAULT_BUCKET_COUNT);
        assert!(opts.validate_sorted);
        assert_eq!(opts.parallelism, Parallelism::Sequential);
        assert_eq!(opts.lower_tail, LowerTailPolicy::HighestBucket);
        assert_eq!(opts.gap, GapPolicy::HighestBucket);
        assert!(!opts.verbose);
    }

    #[test]
    // Purpose
    // -------
    // `new` rejects zero buckets and builders update single fields.
    //
    // Given
    // -----
    // - `new(0)` and `new(3)` followed by every builder.
    //
    // Expect
    // ------
    // - `InvalidBucketCount` for zero; the builder chain sets each field.
    fn quantize_options_new_validates_and_builders_apply() {
        assert!(matches!(
            QuantizeOptions::new(0),
            Err(QuantError::InvalidBucketCount { bucket_count: 0, .. })
        ));

        let opts = QuantizeOptions::new(3)
            .unwrap()
            .with_validate_sorted(false)
            .with_parallelism(Parallelism::Parallel(4))
            .with_lower_tail(LowerTailPolicy::LowestBucket)
            .with_gap(GapPolicy::LowerBucket)
            .with_verbose(true);

        assert_eq!(opts.bucket_count, 3);
        assert!(!opts.validate_sorted);
        assert_eq!(opts.parallelism, Parallelism::Parallel(4));
        assert_eq!(opts.lower_tail, LowerTailPolicy::LowestBucket);
        assert_eq!(opts.gap, GapPolicy::LowerBucket);
        assert!(opts.verbose);
    }

    #[test]
    // Purpose
    // -------
    // Policy parsing is case-insensitive and rejects unknown names.
    fn lower_tail_policy_parses_case_insensitively() {
        assert_eq!("Highest".parse::<LowerTailPolicy>(), Ok(LowerTailPolicy::HighestBucket));
        assert_eq!("LOWEST".parse::<LowerTailPolicy>(), Ok(LowerTailPolicy::LowestBucket));
        assert_eq!(
            "middle".parse::<LowerTailPolicy>(),
            Err(QuantError::InvalidLowerTail { name: "middle".to_string() })
        );
    }

    #[test]
    // Purpose
    // -------
    // Gap policy parsing mirrors the lower-tail parser.
    fn gap_policy_parses_case_insensitively() {
        assert_eq!("HIGHEST".parse::<GapPolicy>(), Ok(GapPolicy::HighestBucket));
        assert_eq!("Lower".parse::<GapPolicy>(), Ok(GapPolicy::LowerBucket));
        assert_eq!(
            "lowest".parse::<GapPolicy>(),
            Err(QuantError::InvalidGapPolicy { name: "lowest".to_string() })
        );
    }
}
