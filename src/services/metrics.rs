use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_gauge, CounterVec, Gauge};

lazy_static! {
    pub static ref MUTATIONS_COUNTER: CounterVec = register_counter_vec!(
        "announcement_mutations_total",
        "Announcement writes by operation and outcome",
        &["operation", "status"]
    ).unwrap();

    pub static ref AUTH_FAILURES_COUNTER: CounterVec = register_counter_vec!(
        "announcement_auth_failures_total",
        "Rejected management requests by reason",
        &["reason"]
    ).unwrap();

    pub static ref ACTIVE_GAUGE: Gauge = register_gauge!(
        "announcements_active",
        "Announcements active at the last public listing"
    ).unwrap();
}

/// Count a write attempt under `operation` ("create", "update", "delete").
pub fn record_mutation<T, E>(operation: &str, result: &Result<T, E>) {
    let status = if result.is_ok() { "ok" } else { "error" };
    MUTATIONS_COUNTER
        .with_label_values(&[operation, status])
        .inc();
}
