//! quantization::errors — error surface for rating-map construction and lookup.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by observation-set
//! construction, option validation, the bucket optimizer, and the Python
//! bridge. Every failure the quantization stack can report is a variant of
//! [`QuantError`]; callers that only care about the coarse category use
//! [`QuantError::kind`].
//!
//! Key behaviors
//! -------------
//! - Define [`QuantResult`] and [`QuantError`] as the canonical result and
//!   error types for the quantization subtree.
//! - Attach human-readable `Display` messages that embed the offending
//!   payload (index, value, bucket count) so logs are useful on their own.
//! - Project every variant onto [`QuantErrorKind`], which distinguishes
//!   invalid caller input from an infeasible dynamic program.
//! - Implement `From<QuantError> for PyErr` (feature `python-bindings`) so
//!   Python callers receive a `ValueError` carrying the Rust message.
//!
//! Invariants & assumptions
//! ------------------------
//! - Errors are returned synchronously and never retried internally; the
//!   optimizer is deterministic.
//! - A returned error means no rating map exists. Partial maps are never
//!   handed out.
//! - `Infeasible` is unreachable under validated preconditions and signals
//!   a broken table rather than bad data.
//!
//! Conventions
//! -----------
//! - Indices are 0-based positions in the sorted observation set.
//! - Messages are phrased in domain terms ("bucket count", "feature",
//!   "outcome") rather than table coordinates.
//!
//! Testing notes
//! -------------
//! - Unit tests verify `Display` payload embedding and the kind projection.
//!   Construction paths are exercised in `core::data`, `core::options`, and
//!   the optimizer tests.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for quantization operations.
pub type QuantResult<T> = Result<T, QuantError>;

/// QuantErrorKind — coarse classification of [`QuantError`] values.
///
/// Variants
/// --------
/// - `InvalidInput`
///   The caller supplied data or configuration that violates a documented
///   precondition (empty dataset, bad bucket count, unsorted or non-finite
///   features, non-binary outcomes).
/// - `Infeasible`
///   The dynamic program could not reach a complete partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantErrorKind {
    InvalidInput,
    Infeasible,
}

/// QuantError — failures raised while building or querying a rating map.
///
/// Variants
/// --------
/// - `EmptyDataset`
///   No observations were supplied.
/// - `InvalidBucketCount { bucket_count, n, reason }`
///   The requested bucket count is zero or exceeds the number of
///   observations `n`.
/// - `NonFiniteFeature { index, value }`
///   A feature value is NaN or ±∞.
/// - `UnsortedFeatures { index, previous, value }`
///   `feature[index] < feature[index - 1]` in input declared as sorted.
/// - `InvalidOutcome { index, value }`
///   A binary outcome column contains something other than 0 or 1.
/// - `LengthMismatch { features, outcomes }`
///   Column inputs have different lengths.
/// - `InvalidLowerTail { name }`
///   A lower-tail policy name could not be parsed.
/// - `InvalidGapPolicy { name }`
///   A gap policy name could not be parsed.
/// - `Infeasible { bucket_count, n }`
///   No valid partition of `n` observations into `bucket_count` buckets was
///   recorded in the tables.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantError {
    // ---- Data validation ----
    EmptyDataset,
    NonFiniteFeature { index: usize, value: f64 },
    UnsortedFeatures { index: usize, previous: f64, value: f64 },
    InvalidOutcome { index: usize, value: u8 },
    LengthMismatch { features: usize, outcomes: usize },

    // ---- Options ----
    InvalidBucketCount { bucket_count: usize, n: usize, reason: &'static str },
    InvalidLowerTail { name: String },
    InvalidGapPolicy { name: String },

    // ---- Optimizer ----
    Infeasible { bucket_count: usize, n: usize },
}

impl QuantError {
    /// Coarse category of this error.
    pub fn kind(&self) -> QuantErrorKind {
        match self {
            QuantError::Infeasible { .. } => QuantErrorKind::Infeasible,
            _ => QuantErrorKind::InvalidInput,
        }
    }
}

impl std::error::Error for QuantError {}

impl std::fmt::Display for QuantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Data validation ----
            QuantError::EmptyDataset => {
                write!(f, "Observation set is empty; at least one observation is required.")
            }
            QuantError::NonFiniteFeature { index, value } => {
                write!(f, "Feature at index {index} is non-finite: {value}")
            }
            QuantError::UnsortedFeatures { index, previous, value } => {
                write!(
                    f,
                    "Features must be sorted ascending; feature at index {index} ({value}) is \
                     below its predecessor ({previous})."
                )
            }
            QuantError::InvalidOutcome { index, value } => {
                write!(f, "Outcome at index {index} must be 0 or 1, got {value}")
            }
            QuantError::LengthMismatch { features, outcomes } => {
                write!(
                    f,
                    "Feature and outcome columns differ in length: {features} features, \
                     {outcomes} outcomes."
                )
            }
            // ---- Options ----
            QuantError::InvalidBucketCount { bucket_count, n, reason } => {
                write!(f, "Invalid bucket count {bucket_count} for {n} observations. {reason}")
            }
            QuantError::InvalidLowerTail { name } => {
                write!(f, "Unknown lower-tail policy '{name}'; expected 'highest' or 'lowest'.")
            }
            QuantError::InvalidGapPolicy { name } => {
                write!(f, "Unknown gap policy '{name}'; expected 'highest' or 'lower'.")
            }
            // ---- Optimizer ----
            QuantError::Infeasible { bucket_count, n } => {
                write!(
                    f,
                    "No feasible partition of {n} observations into {bucket_count} buckets was \
                     found."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<QuantError> for PyErr {
    fn from(err: QuantError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
