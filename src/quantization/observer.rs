//! Terminal progress logging for optimizer runs (feature `obs_slog`).
//!
//! When `QuantizeOptions::verbose` is set, the optimizer attaches a
//! [`SlogObserver`] that reports the run size, each filled DP layer, and the
//! resulting map, plus a warning when a parallel fill has to run
//! sequentially. Records go through an asynchronous `slog` drain to the
//! terminal; the drain is flushed when the observer is dropped at the end of
//! the run.
use ndarray::ArrayView1;
use slog::{Drain, Logger, info, o, warn};

use crate::quantization::core::rating_map::RatingMap;

/// Structured logger for one optimizer run.
pub struct SlogObserver {
    logger: Logger,
}

impl SlogObserver {
    /// Non-blocking terminal logger (async drain over `slog-term`).
    pub fn term_noblock() -> Self {
        let decorator = slog_term::TermDecorator::new().build();
        let drain = slog_term::FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        SlogObserver { logger: Logger::root(drain, o!("component" => "rating_quantizer")) }
    }

    /// Wrap an existing logger, e.g. a child of the caller's root logger.
    pub fn from_logger(logger: Logger) -> Self {
        SlogObserver { logger }
    }

    pub fn on_start(&self, n_obs: usize, bucket_count: usize, n_events: usize) {
        info!(self.logger, "filling rating tables";
            "n_obs" => n_obs, "bucket_count" => bucket_count, "n_events" => n_events);
    }

    /// Report layer `b`: its reachable cell count and the value at the last
    /// observation.
    pub fn on_layer(&self, b: usize, layer: ArrayView1<'_, f64>) {
        let reachable = layer.iter().filter(|v| v.is_finite()).count();
        let last = layer.last().copied().unwrap_or(f64::NEG_INFINITY);
        info!(self.logger, "dp layer filled";
            "buckets" => b, "reachable_cells" => reachable, "ll_full_range" => last);
    }

    /// The requested worker pool could not be built; the fill runs
    /// sequentially with identical results.
    pub fn on_sequential_fallback(&self, requested_threads: usize, err: &dyn std::fmt::Display) {
        warn!(self.logger, "thread pool unavailable, filling sequentially";
            "requested_threads" => requested_threads, "error" => %err);
    }

    pub fn on_finish(&self, rating_map: &RatingMap) {
        info!(self.logger, "rating map built";
            "ratings" => rating_map.len(),
            "total_log_likelihood" => rating_map.total_log_likelihood());
        for bucket in rating_map.boundaries() {
            info!(self.logger, "rating";
                "rating" => bucket.rating,
                "min_feature" => bucket.min_feature,
                "max_feature" => bucket.max_feature,
                "n_obs" => bucket.n_obs,
                "event_rate" => bucket.event_rate());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantization::{
        core::data::{Observation, ObservationSet},
        optimizer::optimize,
    };
    use ndarray::array;

    fn discarding_observer() -> SlogObserver {
        SlogObserver::from_logger(Logger::root(slog::Discard, o!()))
    }

    #[test]
    // Purpose
    // -------
    // The observer accepts layers with sentinel cells without panicking
    // when backed by a discarding logger.
    fn observer_handles_layers_with_sentinels() {
        let observer = discarding_observer();

        observer.on_start(3, 2, 1);
        observer.on_layer(2, array![f64::NEG_INFINITY, -1.2, -1.9].view());
    }

    #[test]
    // Purpose
    // -------
    // `on_finish` walks every bucket of a map produced by the optimizer,
    // including a pure bucket with event rate 0.
    //
    // Given
    // -----
    // - Rows [(500, 1), (550, 1), (600, 0), (650, 0)] optimized into 2
    //   buckets; a discarding logger.
    //
    // Expect
    // ------
    // - No panic; the map logged is the one returned.
    fn observer_reports_finished_map() {
        let set = ObservationSet::new(vec![
            Observation::new(500.0, true),
            Observation::new(550.0, true),
            Observation::new(600.0, false),
            Observation::new(650.0, false),
        ])
        .unwrap();
        let map = optimize(&set, 2).unwrap();
        let observer = discarding_observer();

        observer.on_finish(&map);
        observer.on_sequential_fallback(4, &"workers could not be spawned");

        assert_eq!(map.len(), 2);
    }
}
