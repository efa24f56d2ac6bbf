//! Bernoulli log-likelihood of a bucket.
//!
//! Purpose
//! -------
//! Evaluate the maximized Bernoulli log-likelihood of the outcomes inside
//! one contiguous bucket, using the bucket's own event rate as the
//! probability estimate.
//!
//! Key behaviors
//! -------------
//! - [`bucket_log_likelihood`] works on raw `(n, k)` counts.
//! - [`range_log_likelihood`] resolves an inclusive index range through
//!   [`PrefixSums`] in O(1).
//!
//! Invariants & assumptions
//! ------------------------
//! - A pure bucket (`k == 0` or `k == n`, which includes every singleton)
//!   contributes exactly `0.0`. The MLE rate is 0 or 1 there and the terms
//!   `k·ln(p)` / `(n−k)·ln(1−p)` are taken as zero instead of `0·(−∞)`.
//! - Otherwise `p = k / n` and the value is
//!   `k·ln(p) + (n−k)·ln(1−p)`, which is finite and strictly negative.
//! - The evaluation order of the two terms is fixed; the optimizer relies on
//!   identical inputs producing bit-identical outputs to break ties.
use crate::quantization::core::prefix::PrefixSums;

/// Maximized Bernoulli log-likelihood of `k` events among `n` observations.
///
/// Returns `0.0` for `n == 0` and for pure buckets.
///
/// Examples
/// --------
/// ```rust
/// # use rust_quantization::quantization::core::likelihood::bucket_log_likelihood;
/// assert_eq!(bucket_log_likelihood(5, 0), 0.0);
/// assert_eq!(bucket_log_likelihood(5, 5), 0.0);
/// let ll = bucket_log_likelihood(4, 2);
/// assert!((ll - 4.0 * 0.5_f64.ln()).abs() < 1e-12);
/// ```
#[inline]
pub fn bucket_log_likelihood(n: u64, k: u64) -> f64 {
    if k == 0 || k == n {
        return 0.0;
    }
    let n_f = n as f64;
    let k_f = k as f64;
    let p = k_f / n_f;
    k_f * p.ln() + (n_f - k_f) * (1.0 - p).ln()
}

/// Log-likelihood of the inclusive observation range `[i, j]`.
#[inline]
pub fn range_log_likelihood(prefix: &PrefixSums, i: usize, j: usize) -> f64 {
    let (n, k) = prefix.range(i, j);
    bucket_log_likelihood(n, k)
}
