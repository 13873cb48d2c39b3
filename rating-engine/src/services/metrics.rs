//! Metrics module for the rating engine.
//! Provides Prometheus metrics for rating operations and monetary tracking.

use once_cell::sync::Lazy;
use prometheus::{
    histogram_opts, opts, register_histogram_vec, register_int_counter, register_int_counter_vec,
    Encoder, HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;

/// Rating duration histogram by pricing model
pub static RATING_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        histogram_opts!("rating_duration_seconds", "Rating computation duration"),
        &["pricing_model"]
    )
    .expect("Failed to register RATING_DURATION")
});

/// Ratings counter by pricing model and status
pub static RATINGS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Rated amount counter by currency and pricing model (monetary tracking)
pub static RATED_AMOUNT_TOTAL: OnceLock<prometheus::CounterVec> = OnceLock::new();

/// Package-group optimistic write conflicts
pub static STATE_CONFLICTS_TOTAL: OnceLock<IntCounter> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    RATINGS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "rating_charges_rated_total",
                "Total charges rated by pricing model and status"
            ),
            &["pricing_model", "status"]
        )
        .expect("Failed to register RATINGS_TOTAL")
    });

    RATED_AMOUNT_TOTAL.get_or_init(|| {
        prometheus::register_counter_vec!(
            prometheus::opts!(
                "rating_amount_total",
                "Total rated amount by currency and pricing model"
            ),
            &["currency", "pricing_model"]
        )
        .expect("Failed to register RATED_AMOUNT_TOTAL")
    });

    STATE_CONFLICTS_TOTAL.get_or_init(|| {
        register_int_counter!(opts!(
            "rating_package_group_state_conflicts_total",
            "Package-group state version conflicts requiring a retry"
        ))
        .expect("Failed to register STATE_CONFLICTS_TOTAL")
    });

    // Force initialization of lazy statics
    let _ = &*RATING_DURATION;
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}

/// Record a completed rating.
pub fn record_rating(pricing_model: &str, status: &str) {
    if let Some(counter) = RATINGS_TOTAL.get() {
        counter.with_label_values(&[pricing_model, status]).inc();
    }
}

/// Record a rated amount for monetary tracking.
pub fn record_rated_amount(currency: &str, pricing_model: &str, amount: f64) {
    if let Some(counter) = RATED_AMOUNT_TOTAL.get() {
        counter
            .with_label_values(&[currency, pricing_model])
            .inc_by(amount.abs());
    }
}

/// Record a package-group state conflict.
pub fn record_state_conflict() {
    if let Some(counter) = STATE_CONFLICTS_TOTAL.get() {
        counter.inc();
    }
}
