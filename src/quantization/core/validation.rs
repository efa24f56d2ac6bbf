//! quantization::core::validation — shared input guards.
//!
//! Purpose
//! -------
//! Centralize the precondition checks used by observation-set construction,
//! option validation and the optimizer entry point, so every path reports
//! the same [`QuantError`] variant for the same violation.
//!
//! Key behaviors
//! -------------
//! - [`validate_features`] checks finiteness and, optionally, ascending
//!   order of a feature column.
//! - [`validate_outcomes`] maps a `u8` column onto booleans, rejecting any
//!   value outside {0, 1}.
//! - [`validate_bucket_count`] enforces `1 ≤ bucket_count ≤ n`.
//!
//! Conventions
//! -----------
//! - Checks stop at the first offending element and report its 0-based index.
//! - Nothing here allocates except [`validate_outcomes`], which returns the
//!   converted column.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch plus a success path for each guard.
use crate::quantization::errors::{QuantError, QuantResult};

/// Check that every feature is finite and, when `check_sorted` is set, that
/// the column is non-decreasing.
///
/// Parameters
/// ----------
/// - `features`: `&[f64]`
///   Feature column in the order the caller intends to optimize over.
/// - `check_sorted`: `bool`
///   When `false`, only emptiness and finiteness are checked.
///
/// Errors
/// ------
/// - `QuantError::EmptyDataset` when `features` is empty.
/// - `QuantError::NonFiniteFeature { index, value }` for the first NaN/±∞.
/// - `QuantError::UnsortedFeatures { index, previous, value }` for the first
///   descent, when `check_sorted` is set.
///
/// Notes
/// -----
/// - Ties are allowed; only strict descents are rejected.
pub fn validate_features(features: &[f64], check_sorted: bool) -> QuantResult<()> {
    if features.is_empty() {
        return Err(QuantError::EmptyDataset);
    }

    let mut previous = f64::NEG_INFINITY;
    for (index, &value) in features.iter().enumerate() {
        if !value.is_finite() {
            return Err(QuantError::NonFiniteFeature { index, value });
        }
        if check_sorted && value < previous {
            return Err(QuantError::UnsortedFeatures { index, previous, value });
        }
        previous = value;
    }

    Ok(())
}

/// Convert a binary `u8` outcome column into booleans.
///
/// Errors
/// ------
/// - `QuantError::InvalidOutcome { index, value }` for the first entry that
///   is neither 0 nor 1.
pub fn validate_outcomes(outcomes: &[u8]) -> QuantResult<Vec<bool>> {
    outcomes
        .iter()
        .enumerate()
        .map(|(index, &value)| match value {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(QuantError::InvalidOutcome { index, value }),
        })
        .collect()
}

/// Enforce `1 ≤ bucket_count ≤ n`.
///
/// Errors
/// ------
/// - `QuantError::EmptyDataset` when `n == 0`.
/// - `QuantError::InvalidBucketCount` when `bucket_count == 0` or
///   `bucket_count > n`.
pub fn validate_bucket_count(bucket_count: usize, n: usize) -> QuantResult<()> {
    if n == 0 {
        return Err(QuantError::EmptyDataset);
    }
    if bucket_count == 0 {
        return Err(QuantError::InvalidBucketCount {
            bucket_count,
            n,
            reason: "Bucket count must be at least 1.",
        });
    }
    if bucket_count > n {
        return Err(QuantError::InvalidBucketCount {
            bucket_count,
            n,
            reason: "Bucket count cannot exceed the number of observations.",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `validate_features`: empty, non-finite, unsorted, ties, and the
    //   unchecked-order path.
    // - `validate_outcomes`: 0/1 mapping and rejection of other values.
    // - `validate_bucket_count`: zero, too large, boundary values.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Accept a sorted, finite column that contains ties.
    //
    // Given
    // -----
    // - features = [500, 550, 550, 600].
    //
    // Expect
    // ------
    // - `Ok(())`.
    fn validate_features_accepts_sorted_column_with_ties() {
        let features = [500.0, 550.0, 550.0, 600.0];

        assert!(validate_features(&features, true).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Reject an empty column.
    //
    // Expect
    // ------
    // - `Err(QuantError::EmptyDataset)`.
    fn validate_features_rejects_empty_column() {
        assert_eq!(validate_features(&[], true), Err(QuantError::EmptyDataset));
    }

    #[test]
    // Purpose
    // -------
    // Report the first non-finite feature with its index.
    //
    // Given
    // -----
    // - features = [500, NaN, +∞].
    //
    // Expect
    // ------
    // - `NonFiniteFeature { index: 1, .. }` whose value is NaN.
    fn validate_features_reports_first_non_finite_value() {
        let features = [500.0, f64::NAN, f64::INFINITY];

        match validate_features(&features, true) {
            Err(QuantError::NonFiniteFeature { index, value }) => {
                assert_eq!(index, 1);
                assert!(value.is_nan());
            }
            other => panic!("expected NonFiniteFeature, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Report the first descent when order checking is on, and ignore it
    // when order checking is off.
    //
    // Given
    // -----
    // - features = [500, 650, 600].
    //
    // Expect
    // ------
    // - Checked: `UnsortedFeatures { index: 2, previous: 650, value: 600 }`.
    // - Unchecked: `Ok(())`.
    fn validate_features_detects_descent_only_when_checking_order() {
        let features = [500.0, 650.0, 600.0];

        assert_eq!(
            validate_features(&features, true),
            Err(QuantError::UnsortedFeatures { index: 2, previous: 650.0, value: 600.0 })
        );
        assert!(validate_features(&features, false).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Map 0/1 to booleans and reject anything else.
    //
    // Given
    // -----
    // - [1, 0, 1] and [0, 2].
    //
    // Expect
    // ------
    // - [true, false, true] and `InvalidOutcome { index: 1, value: 2 }`.
    fn validate_outcomes_maps_binary_values_and_rejects_others() {
        assert_eq!(validate_outcomes(&[1, 0, 1]), Ok(vec![true, false, true]));
        assert_eq!(
            validate_outcomes(&[0, 2]),
            Err(QuantError::InvalidOutcome { index: 1, value: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Exercise the bucket-count bounds.
    //
    // Given
    // -----
    // - n = 7 with bucket counts 0, 1, 7, 8; and n = 0.
    //
    // Expect
    // ------
    // - 1 and 7 succeed; 0 and 8 fail with `InvalidBucketCount`;
    //   n = 0 fails with `EmptyDataset`.
    fn validate_bucket_count_enforces_inclusive_bounds() {
        assert!(validate_bucket_count(1, 7).is_ok());
        assert!(validate_bucket_count(7, 7).is_ok());
        assert!(matches!(
            validate_bucket_count(0, 7),
            Err(QuantError::InvalidBucketCount { bucket_count: 0, n: 7, .. })
        ));
        assert!(matches!(
            validate_bucket_count(8, 7),
            Err(QuantError::InvalidBucketCount { bucket_count: 8, n: 7, .. })
        ));
        assert_eq!(validate_bucket_count(3, 0), Err(QuantError::EmptyDataset));
    }
}
