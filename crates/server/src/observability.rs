use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static BOAT_MUTATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "marina_boat_mutations_total",
        "Boats created, updated or deleted"
    )
    .expect("register boat_mutations_total")
});

pub static PARKING_MUTATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "marina_parking_mutations_total",
        "Parking slots created, updated or deleted"
    )
    .expect("register parking_mutations_total")
});

pub static CONCURRENCY_CONFLICTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "marina_concurrency_conflicts_total",
        "Updates rejected because the row changed underneath"
    )
    .expect("register concurrency_conflicts_total")
});

/// Touch every counter so it shows up in `/metrics` before its first event.
pub fn init_metrics() {
    Lazy::force(&BOAT_MUTATIONS_TOTAL);
    Lazy::force(&PARKING_MUTATIONS_TOTAL);
    Lazy::force(&CONCURRENCY_CONFLICTS_TOTAL);
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
