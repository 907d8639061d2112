//! Prometheus metrics for the extraction pipeline.
//!
//! Exposes:
//! - `knowledge_extractor_documents_total` (counter by pipeline mode)
//! - `knowledge_extractor_stage_duration_seconds` (histogram by stage)
//! - `knowledge_extractor_stage_failures_total` (counter by stage)

use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};
use tracing::error;

static DOCUMENTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "knowledge_extractor_documents_total",
        "Processed documents by pipeline mode",
        &["mode"]
    )
    .expect("failed to register documents counter")
});

static STAGE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    // Exponential buckets from 0.1ms up to ~1.6s.
    let buckets =
        prometheus::exponential_buckets(0.0001, 2.0, 15).expect("failed to create histogram buckets");
    register_histogram_vec!(
        "knowledge_extractor_stage_duration_seconds",
        "Pipeline stage duration in seconds",
        &["stage"],
        buckets
    )
    .expect("failed to register stage duration histogram")
});

static STAGE_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "knowledge_extractor_stage_failures_total",
        "Pipeline stages that degraded to an empty result",
        &["stage"]
    )
    .expect("failed to register stage failure counter")
});

/// Count one processed document.
pub fn record_document(mode: &'static str) {
    DOCUMENTS_TOTAL.with_label_values(&[mode]).inc();
}

/// Record a stage run with its duration and outcome.
pub fn record_stage(stage: &'static str, duration: Duration, success: bool) {
    STAGE_DURATION
        .with_label_values(&[stage])
        .observe(duration.as_secs_f64());
    if !success {
        STAGE_FAILURES.with_label_values(&[stage]).inc();
    }
}

/// Current metrics in the Prometheus text format.
pub fn render() -> String {
    Lazy::force(&DOCUMENTS_TOTAL);
    Lazy::force(&STAGE_DURATION);
    Lazy::force(&STAGE_FAILURES);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", err);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}
