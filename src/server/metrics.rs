//! Prometheus metrics definitions.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, HistogramVec,
    IntCounterVec, IntGauge,
};

/// Record files seen by the most recent list.
pub static FILES_LISTED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "relicdex_files_listed",
        "Number of record files returned by the last list"
    )
    .unwrap()
});

/// Request counter.
pub static REQUEST_COUNT: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "relicdex_requests_total",
        "Total number of API requests",
        &["endpoint", "status"]
    )
    .unwrap()
});

/// Search latency histogram.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "relicdex_search_duration_seconds",
        "Full-scan search latency in seconds",
        &["mode"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .unwrap()
});

/// Records returned by searches.
pub static SEARCH_MATCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "relicdex_search_matches_total",
        "Total number of records returned by searches",
        &["mode"]
    )
    .unwrap()
});

/// Initialize all metrics (call once at startup).
pub fn init_metrics() {
    // Access lazy statics to register them
    let _ = &*FILES_LISTED;
    let _ = &*REQUEST_COUNT;
    let _ = &*SEARCH_DURATION;
    let _ = &*SEARCH_MATCHES;

    tracing::debug!("Prometheus metrics initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_init() {
        init_metrics();

        FILES_LISTED.set(12);
        assert_eq!(FILES_LISTED.get(), 12);

        let before = REQUEST_COUNT.with_label_values(&["test", "200"]).get();
        REQUEST_COUNT.with_label_values(&["test", "200"]).inc();
        assert_eq!(REQUEST_COUNT.with_label_values(&["test", "200"]).get(), before + 1);
    }
}
