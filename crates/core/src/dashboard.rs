//! Dashboard summary: metric tiles, distributions, and the progress series.
//!
//! Metric tiles describe the whole store; distributions and the progress
//! series describe the filtered rows, matching what the table shows.

use serde::Serialize;

use crate::client::{CellValue, ClientRecord, ClientType, Completion, ServiceStatus};
use crate::filter::ClientFilter;
use crate::progress::progress;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Count of records holding one domain value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub value: &'static str,
    pub label: &'static str,
    pub count: usize,
}

/// One bar of the per-client progress chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressPoint {
    pub client_name: String,
    pub progress_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_clients: usize,
    pub new_clients: usize,
    pub ongoing_clients: usize,
    pub average_progress: f64,
    pub filtered_clients: usize,
    pub by_client_type: Vec<Bucket>,
    pub by_service_status: Vec<Bucket>,
    pub by_first_invoice: Vec<Bucket>,
    pub by_second_invoice: Vec<Bucket>,
    /// Ascending by progress; ties keep store order.
    pub progress: Vec<ProgressPoint>,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Count every domain value of `T`, including zero counts.
fn distribution<T, F>(records: &[&ClientRecord], field: F) -> Vec<Bucket>
where
    T: CellValue,
    F: Fn(&ClientRecord) -> T,
{
    T::VALUES
        .iter()
        .map(|value| Bucket {
            value: value.token(),
            label: value.label(),
            count: records.iter().filter(|r| field(r) == *value).count(),
        })
        .collect()
}

/// Mean progress over `records`, rounded to two decimals; zero when empty.
pub fn average_progress(records: &[ClientRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: u64 = records.iter().map(|r| u64::from(progress(r))).sum();
    let mean = sum as f64 / records.len() as f64;
    (mean * 100.0).round() / 100.0
}

/// Build the dashboard summary for `records` under `filter`.
pub fn summarize(records: &[ClientRecord], filter: &ClientFilter) -> DashboardSummary {
    let filtered = filter.apply(records);

    let mut series: Vec<ProgressPoint> = filtered
        .iter()
        .map(|r| ProgressPoint {
            client_name: r.client_name.clone(),
            progress_percent: progress(r),
        })
        .collect();
    series.sort_by_key(|p| p.progress_percent);

    let count_type = |t: ClientType| records.iter().filter(|r| r.client_type == t).count();

    DashboardSummary {
        total_clients: records.len(),
        new_clients: count_type(ClientType::New),
        ongoing_clients: count_type(ClientType::Ongoing),
        average_progress: average_progress(records),
        filtered_clients: filtered.len(),
        by_client_type: distribution::<ClientType, _>(&filtered, |r| r.client_type),
        by_service_status: distribution::<ServiceStatus, _>(&filtered, |r| r.service_status),
        by_first_invoice: distribution::<Completion, _>(&filtered, |r| r.invoice_1),
        by_second_invoice: distribution::<Completion, _>(&filtered, |r| r.invoice_2),
        progress: series,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
