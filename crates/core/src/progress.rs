//! Progress percentage derived from a client's steps and service status.

use crate::client::{ClientRecord, ServiceStatus};

/// Extra slot on top of the process steps, filled only when the service
/// itself is completed.
pub const SERVICE_COMPLETION_SLOTS: usize = 1;

/// Completion percentage of a record, rounded to the nearest integer.
///
/// Only the steps of the record's client type count. Finishing every step
/// does not fill the service slot; only a `Completed` service status does.
pub fn progress(record: &ClientRecord) -> u8 {
    let steps = record.client_type.steps();
    let mut done = steps
        .iter()
        .filter(|step| record.step(**step).is_done())
        .count();
    if record.service_status == ServiceStatus::Completed {
        done += SERVICE_COMPLETION_SLOTS;
    }
    percent(done, steps.len() + SERVICE_COMPLETION_SLOTS)
}

/// `round(100 * done / total)`, clamped to `[0, 100]`; zero when `total` is zero.
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (done as f64 * 100.0 / total as f64).round();
    pct.clamp(0.0, 100.0) as u8
}
