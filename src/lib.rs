//! rust_quantization — optimal supervised quantization with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the rating-map optimizer to Python via the `_rust_quantization` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing class and function used by the `rust_quantization`
//! package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`quantization`) as the public crate
//!   surface.
//! - Define the `RatingMap` `#[pyclass]` wrapper, the `build_rating_map`
//!   `#[pyfunction]`, and the `#[pymodule]` initializer for the
//!   `_rust_quantization` Python extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in [`quantization`]; this file
//!   performs only FFI glue, input extraction, and error mapping.
//! - Python inputs are converted into a validated
//!   [`ObservationSet`](quantization::ObservationSet) before any optimizer
//!   work starts.
//!
//! Conventions
//! -----------
//! - Ratings are 1-based on both sides of the boundary.
//! - Errors from core Rust code are propagated as [`quantization::QuantError`]
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`quantization`] directly and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_rust_quantization` and wraps it in
//!   user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_rating_pipeline.rs`; the PyO3 layer is exercised from
//!   Python.

pub mod quantization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::{
    quantization::{
        core::{options::QuantizeOptions, rating_map::RatingMap},
        optimizer::optimize_with,
    },
    utils::build_observation_set,
};

/// RatingMap — Python-facing view of an optimized rating map.
///
/// Purpose
/// -------
/// Hold the result of [`build_rating_map`] and answer rating lookups from
/// Python.
///
/// Notes
/// -----
/// - Instances are created only by `build_rating_map`; there is no Python
///   constructor.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "RatingMap", module = "rust_quantization", frozen)]
pub struct PyRatingMap {
    inner: RatingMap,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyRatingMap {
    /// `(rating, min_feature, max_feature)` tuples in ascending rating order.
    #[getter]
    pub fn boundaries(&self) -> Vec<(usize, f64, f64)> {
        self.inner.to_rows()
    }

    /// Optimal total log-likelihood of the training data.
    #[getter]
    pub fn total_log_likelihood(&self) -> f64 {
        self.inner.total_log_likelihood()
    }

    /// Per-rating event rates observed in training.
    #[getter]
    pub fn event_rates(&self) -> Vec<f64> {
        self.inner.boundaries().iter().map(|b| b.event_rate()).collect()
    }

    #[getter]
    pub fn n_obs(&self) -> usize {
        self.inner.n_obs()
    }

    /// Rating of one feature value.
    #[pyo3(text_signature = "(self, value, /)")]
    pub fn rating(&self, value: f64) -> usize {
        self.inner.classify(value)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "RatingMap(ratings={}, total_log_likelihood={:.6})",
            self.inner.len(),
            self.inner.total_log_likelihood()
        )
    }
}

/// Build the optimal rating map for a feature/outcome pair.
///
/// Parameters
/// ----------
/// - `features`: numpy array, pandas Series or sequence of float64.
/// - `outcomes`: matching 0/1 (or bool) column.
/// - `n_buckets`: number of ratings; defaults to 5.
/// - `sort`: sort rows by feature first; when `False` the features must
///   already be ascending.
/// - `lower_tail`: `"highest"` (default) or `"lowest"`, the rating for
///   values below the training range.
/// - `gap`: `"highest"` (default) or `"lower"`, the rating for values
///   between two buckets.
///
/// Errors
/// ------
/// - `ValueError` for empty input, non-finite or unsorted features, invalid
///   outcomes, mismatched lengths, an invalid bucket count or policy name.
/// - `TypeError` when an input cannot be read as a 1-D column.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    text_signature = "(features, outcomes, /, n_buckets=5, sort=True, lower_tail='highest', \
                      gap='highest')",
    signature = (
        features, outcomes, n_buckets = 5, sort = true, lower_tail = "highest", gap = "highest"
    )
)]
pub fn build_rating_map<'py>(
    py: Python<'py>, features: &Bound<'py, PyAny>, outcomes: &Bound<'py, PyAny>,
    n_buckets: usize, sort: bool, lower_tail: &str, gap: &str,
) -> PyResult<PyRatingMap> {
    let observations = build_observation_set(py, features, outcomes, sort)?;
    let opts = QuantizeOptions::new(n_buckets)?
        .with_lower_tail(lower_tail.parse()?)
        .with_gap(gap.parse()?);

    let inner = py.allow_threads(|| optimize_with(&observations, &opts))?;
    Ok(PyRatingMap { inner })
}

/// Module initializer for the `_rust_quantization` extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_quantization<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PyRatingMap>()?;
    m.add_function(wrap_pyfunction!(build_rating_map, m)?)?;
    Ok(())
}
