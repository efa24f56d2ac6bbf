//! Python-input extraction helpers for the PyO3 bindings.
//!
//! Accept numpy arrays, pandas Series (via `to_numpy`) or plain sequences and
//! turn them into validated Rust inputs. Everything here is compiled only
//! with the `python-bindings` feature.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::quantization::{
    core::{
        data::{Observation, ObservationSet},
        validation::validate_outcomes,
    },
    errors::QuantError,
};

/// `obj.to_numpy()` for pandas-like objects, `None` for anything else.
///
/// Called without arguments: pandas' first positional parameter is `dtype`.
#[cfg(feature = "python-bindings")]
fn series_values<'py>(raw_data: &Bound<'py, PyAny>) -> Option<Bound<'py, PyAny>> {
    raw_data.call_method0("to_numpy").ok()
}

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Some(obj) = series_values(raw_data) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Binary outcome column as `u8`.
///
/// Accepts bool or integer numpy arrays, pandas Series and sequences of
/// ints/bools. Integers outside `0..=255` are rejected here; the {0, 1}
/// check itself happens in the core validation so the error names the row.
#[cfg(feature = "python-bindings")]
pub fn extract_outcomes<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Vec<u8>> {
    let source = series_values(raw_data).unwrap_or_else(|| raw_data.clone());

    if let Ok(arr) = source.extract::<PyReadonlyArray1<bool>>() {
        return Ok(arr.as_array().iter().map(|&flag| u8::from(flag)).collect());
    }
    if let Ok(arr) = source.extract::<PyReadonlyArray1<u8>>() {
        return Ok(arr.as_array().to_vec());
    }

    let values: Vec<i64> = match source.extract::<PyReadonlyArray1<i64>>() {
        Ok(arr) => arr.as_array().to_vec(),
        Err(_) => source.extract().map_err(|_| {
            PyTypeError::new_err(
                "outcomes must be a 1-D numpy.ndarray, pandas.Series, or sequence of 0/1 values",
            )
        })?,
    };
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            u8::try_from(value).map_err(|_| {
                PyValueError::new_err(format!(
                    "outcome at index {index} is {value}; outcomes must be 0 or 1"
                ))
            })
        })
        .collect()
}

/// Build an [`ObservationSet`] from Python feature and outcome columns.
///
/// With `sort = true` the rows are sorted by feature first; otherwise the
/// features must already be ascending.
#[cfg(feature = "python-bindings")]
pub fn build_observation_set<'py>(
    py: Python<'py>, features: &Bound<'py, PyAny>, outcomes: &Bound<'py, PyAny>, sort: bool,
) -> PyResult<ObservationSet> {
    let feat_arr = extract_f64_array(py, features)?;
    let feat_slice = feat_arr.as_slice().map_err(|_| {
        PyValueError::new_err("features must be a 1-D contiguous float64 array or sequence")
    })?;
    let outcome_vec = extract_outcomes(outcomes)?;

    if !sort {
        return Ok(ObservationSet::from_columns(Array1::from(feat_slice.to_vec()), &outcome_vec)?);
    }

    if feat_slice.len() != outcome_vec.len() {
        return Err(QuantError::LengthMismatch {
            features: feat_slice.len(),
            outcomes: outcome_vec.len(),
        }
        .into());
    }
    let rows: Vec<Observation> = feat_slice
        .iter()
        .zip(validate_outcomes(&outcome_vec)?)
        .map(|(&feature, outcome)| Observation::new(feature, outcome))
        .collect();
    Ok(ObservationSet::from_unsorted(rows)?)
}

#[cfg(all(test, feature = "python-bindings"))]
mod tests {
    use super::*;
    use pyo3::types::PyDict;

    const SERIES_LIKE: &std::ffi::CStr = c"
class Series:
    def __init__(self, values):
        self._values = list(values)

    def to_numpy(self, *args, **kwargs):
        if args:
            raise TypeError('to_numpy got a positional dtype')
        return self._values
";

    #[test]
    // Purpose
    // -------
    // Pandas-like inputs are read through a bare `to_numpy()` call.
    //
    // Given
    // -----
    // - An object that is not a sequence itself and whose `to_numpy` rejects
    //   positional arguments (pandas' first positional is `dtype`).
    //
    // Expect
    // ------
    // - `extract_outcomes` returns the 0/1 values instead of a TypeError.
    fn extract_outcomes_reads_series_like_objects() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let scope = PyDict::new(py);
            py.run(SERIES_LIKE, None, Some(&scope)).unwrap();
            let series = py.eval(c"Series([1, 0, True])", None, Some(&scope)).unwrap();

            assert!(series_values(&series).is_some());
            assert_eq!(extract_outcomes(&series).unwrap(), vec![1, 0, 1]);
        });
    }
}
