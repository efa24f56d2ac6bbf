//! Observation containers for supervised quantization.
//!
//! Purpose
//! -------
//! Provide the validated dataset type consumed by the bucket optimizer: a
//! column-wise set of `(feature, outcome)` pairs sorted ascending by feature.
//! Construction is the only place where raw caller data is checked, so the
//! optimizer and the prefix-sum layer can rely on the invariants below.
//!
//! Key behaviors
//! -------------
//! - [`Observation`] is a plain `(feature, outcome)` value, convertible from
//!   `(f64, bool)` and, with a 0/1 check, from `(f64, u8)`.
//! - [`ObservationSet`] enforces non-emptiness, finite features and
//!   ascending order, with constructors for already-sorted rows, unsorted
//!   rows (stable sort by feature) and column input with `u8` outcomes.
//!
//! Invariants & assumptions
//! ------------------------
//! - `len() ≥ 1`.
//! - Every feature is finite.
//! - Features are non-decreasing unless the set was built through
//!   [`ObservationSet::new_unchecked_order`], in which case the caller
//!   vouches for the order.
//! - Ties in feature keep the relative order they were supplied in.
//!
//! Conventions
//! -----------
//! - Outcome `true` is the event (e.g. a loan default); `false` is no event.
//! - Indexing is 0-based and refers to the sorted order.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each constructor's happy path and failure branches and
//!   the stability of [`ObservationSet::from_unsorted`] on tied features.
use crate::quantization::{
    core::validation::{validate_features, validate_outcomes},
    errors::{QuantError, QuantResult},
};
use ndarray::{Array1, ArrayView1};

/// A single `(feature, outcome)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Continuous feature value (e.g. a FICO score).
    pub feature: f64,
    /// Binary outcome; `true` marks the event.
    pub outcome: bool,
}

impl Observation {
    pub fn new(feature: f64, outcome: bool) -> Self {
        Observation { feature, outcome }
    }
}

impl From<(f64, bool)> for Observation {
    fn from((feature, outcome): (f64, bool)) -> Self {
        Observation { feature, outcome }
    }
}

/// Integer-coded outcome; only 0 and 1 are accepted.
///
/// Errors
/// ------
/// - `QuantError::InvalidOutcome { index: 0, value }` for any other value.
impl TryFrom<(f64, u8)> for Observation {
    type Error = QuantError;

    fn try_from((feature, outcome): (f64, u8)) -> QuantResult<Self> {
        let outcome = validate_outcomes(&[outcome])?[0];
        Ok(Observation { feature, outcome })
    }
}

/// `ObservationSet` — validated, feature-sorted dataset.
///
/// Purpose
/// -------
/// Own the feature and outcome columns for one optimization run and
/// guarantee the ordering and finiteness preconditions of the optimizer.
///
/// Fields
/// ------
/// - `features`: `Array1<f64>`
///   Feature column, ascending.
/// - `outcomes`: `Array1<bool>`
///   Outcome column aligned with `features`.
///
/// Invariants
/// ----------
/// - `features.len() == outcomes.len() ≥ 1`.
/// - All features are finite and (checked constructors) non-decreasing.
///
/// Performance
/// -----------
/// - Construction is O(n), or O(n log n) for [`ObservationSet::from_unsorted`].
/// - Accessors hand out views; nothing is copied after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    features: Array1<f64>,
    outcomes: Array1<bool>,
}

impl ObservationSet {
    /// Build a set from rows that are already sorted by feature.
    ///
    /// Errors
    /// ------
    /// - `QuantError::EmptyDataset` when `observations` is empty.
    /// - `QuantError::NonFiniteFeature` for NaN/±∞ features.
    /// - `QuantError::UnsortedFeatures` for the first descent.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_quantization::quantization::core::data::{Observation, ObservationSet};
    /// let set = ObservationSet::new(vec![
    ///     Observation::new(580.0, true),
    ///     Observation::new(640.0, false),
    /// ])
    /// .unwrap();
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn new(observations: Vec<Observation>) -> QuantResult<Self> {
        Self::build(observations, true)
    }

    /// Build a set without scanning for ascending order.
    ///
    /// Emptiness and finiteness are still checked. Use only when the caller
    /// already guarantees the sort; the optimizer's boundaries are
    /// meaningless on unsorted input.
    pub fn new_unchecked_order(observations: Vec<Observation>) -> QuantResult<Self> {
        Self::build(observations, false)
    }

    /// Sort rows by feature (stable, `f64::total_cmp`) and build a set.
    ///
    /// Errors
    /// ------
    /// - `QuantError::EmptyDataset` when `observations` is empty.
    /// - `QuantError::NonFiniteFeature` for NaN/±∞ features; the index refers
    ///   to the sorted position.
    pub fn from_unsorted(mut observations: Vec<Observation>) -> QuantResult<Self> {
        observations.sort_by(|a, b| a.feature.total_cmp(&b.feature));
        Self::build(observations, true)
    }

    /// Build a set from a feature column and a binary `u8` outcome column.
    ///
    /// Errors
    /// ------
    /// - `QuantError::LengthMismatch` when the columns differ in length.
    /// - `QuantError::InvalidOutcome` for outcomes outside {0, 1}.
    /// - Any error of [`ObservationSet::new`].
    pub fn from_columns(features: Array1<f64>, outcomes: &[u8]) -> QuantResult<Self> {
        if features.len() != outcomes.len() {
            return Err(QuantError::LengthMismatch {
                features: features.len(),
                outcomes: outcomes.len(),
            });
        }
        let outcomes = validate_outcomes(outcomes)?;
        match features.as_slice() {
            Some(slice) => validate_features(slice, true)?,
            None => validate_features(&features.to_vec(), true)?,
        }
        Ok(ObservationSet { features, outcomes: Array1::from(outcomes) })
    }

    fn build(observations: Vec<Observation>, check_sorted: bool) -> QuantResult<Self> {
        let (features, outcomes): (Vec<f64>, Vec<bool>) =
            observations.into_iter().map(|obs| (obs.feature, obs.outcome)).unzip();
        validate_features(&features, check_sorted)?;
        Ok(ObservationSet { features: Array1::from(features), outcomes: Array1::from(outcomes) })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Always `false` for a constructed set; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Sorted feature column.
    pub fn features(&self) -> ArrayView1<'_, f64> {
        self.features.view()
    }

    /// Outcome column aligned with [`features`](Self::features).
    pub fn outcomes(&self) -> ArrayView1<'_, bool> {
        self.outcomes.view()
    }

    /// Observation at sorted position `index`, if any.
    pub fn get(&self, index: usize) -> Option<Observation> {
        let feature = *self.features.get(index)?;
        let outcome = *self.outcomes.get(index)?;
        Some(Observation { feature, outcome })
    }

    /// Iterate observations in ascending feature order.
    pub fn iter(&self) -> impl Iterator<Item = Observation> + '_ {
        self.features
            .iter()
            .zip(self.outcomes.iter())
            .map(|(&feature, &outcome)| Observation { feature, outcome })
    }

    /// Total number of events in the set.
    pub fn event_count(&self) -> usize {
        self.outcomes.iter().filter(|&&o| o).count()
    }

    /// Smallest and largest feature value.
    pub fn feature_range(&self) -> (f64, f64) {
        let n = self.features.len();
        (self.features[0], self.features[n - 1])
    }
}
