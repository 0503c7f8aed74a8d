//! Row filtering for the dashboard table and charts.

use crate::client::{CellValue, ClientRecord, ClientType, Completion, ServiceStatus};
use crate::error::CoreError;

/// Selection of client types, service statuses, and invoice statuses.
///
/// An empty selection means "all values". A record matches when its type
/// and service status are selected and *either* of its invoices is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub client_types: Vec<ClientType>,
    pub service_statuses: Vec<ServiceStatus>,
    pub invoice_statuses: Vec<Completion>,
}

fn selected<T: CellValue>(selection: &[T], value: T) -> bool {
    selection.is_empty() || selection.contains(&value)
}

impl ClientFilter {
    /// Build a filter from comma-separated selections.
    ///
    /// Unlike stored cells, selections are not coerced: an unknown value is
    /// a validation error.
    pub fn parse(
        client_types: Option<&str>,
        service_statuses: Option<&str>,
        invoice_statuses: Option<&str>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            client_types: parse_selection(client_types, "client_type")?,
            service_statuses: parse_selection(service_statuses, "service_status")?,
            invoice_statuses: parse_selection(invoice_statuses, "invoice")?,
        })
    }

    pub fn matches(&self, record: &ClientRecord) -> bool {
        selected(&self.client_types, record.client_type)
            && selected(&self.service_statuses, record.service_status)
            && (selected(&self.invoice_statuses, record.invoice_1)
                || selected(&self.invoice_statuses, record.invoice_2))
    }

    /// The matching records, in store order.
    pub fn apply<'a>(&self, records: &'a [ClientRecord]) -> Vec<&'a ClientRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Parse a comma-separated list of labels or tokens. `None` and blank
/// input select everything.
pub fn parse_selection<T: CellValue>(raw: Option<&str>, label: &str) -> Result<Vec<T>, CoreError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            T::decode(s).ok_or_else(|| {
                let valid: Vec<_> = T::VALUES.iter().map(|v| v.token()).collect();
                CoreError::Validation(format!(
                    "Invalid {label} '{s}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
        })
        .collect()
}
