//! Turning table bytes into canonical records.
//!
//! Both the store file and uploaded tables go through the same pipeline:
//! decode, normalize with a coercion report, collapse duplicate names.
//! Uploads additionally must carry the mandatory columns.

use serde::Serialize;

use clientdesk_core::client::ClientRecord;
use clientdesk_core::columns::MANDATORY_COLUMNS;
use clientdesk_core::normalize::{normalize_with_report, NormalizeReport};
use clientdesk_core::reconcile::dedupe_by_name;

use crate::codec::{decode_table, Table};
use crate::error::StoreError;

/// Records decoded from a table, with everything that was adjusted on the way.
#[derive(Debug, Clone, Default)]
pub struct DecodedRecords {
    pub records: Vec<ClientRecord>,
    pub report: NormalizeReport,
    /// Rows dropped for having a blank client name.
    pub unnamed_dropped: usize,
    /// Rows merged into an earlier row with the same name.
    pub duplicates_merged: usize,
    pub ignored_headers: Vec<String>,
}

/// Counts returned to the caller of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub coerced: usize,
    pub unnamed_dropped: usize,
    pub duplicates_merged: usize,
    pub ignored_headers: Vec<String>,
}

impl From<&DecodedRecords> for ImportSummary {
    fn from(decoded: &DecodedRecords) -> Self {
        Self {
            imported: decoded.records.len(),
            coerced: decoded.report.len(),
            unnamed_dropped: decoded.unnamed_dropped,
            duplicates_merged: decoded.duplicates_merged,
            ignored_headers: decoded.ignored_headers.clone(),
        }
    }
}

/// Fail with [`StoreError::Schema`] on the first mandatory column the
/// table lacks.
pub fn check_mandatory_columns(table: &Table) -> Result<(), StoreError> {
    match MANDATORY_COLUMNS.iter().find(|c| !table.has_column(**c)) {
        Some(missing) => Err(StoreError::Schema {
            column: missing.header(),
        }),
        None => Ok(()),
    }
}

/// Normalize a decoded table into unique, named records.
pub fn records_from_table(table: Table) -> DecodedRecords {
    let row_count = table.rows.len();
    let (records, report) = normalize_with_report(&table.rows);

    for warning in &report.coercions {
        tracing::warn!(
            row = warning.row,
            client = %warning.client_name,
            column = %warning.column,
            original = %warning.original,
            coerced_to = warning.coerced_to,
            "Coerced out-of-domain cell to default"
        );
    }

    let (records, unnamed_dropped) = dedupe_by_name(records);
    let duplicates_merged = row_count - unnamed_dropped - records.len();

    if unnamed_dropped > 0 {
        tracing::warn!(unnamed_dropped, "Dropped rows without a client name");
    }
    if duplicates_merged > 0 {
        tracing::warn!(duplicates_merged, "Merged rows sharing a client name");
    }

    DecodedRecords {
        records,
        report,
        unnamed_dropped,
        duplicates_merged,
        ignored_headers: table.ignored_headers,
    }
}

/// Decode stored table bytes. Missing columns are tolerated.
pub fn load_table(bytes: &[u8]) -> Result<DecodedRecords, StoreError> {
    Ok(records_from_table(decode_table(bytes)?))
}

/// Decode an uploaded table, rejecting it when a mandatory column is absent.
pub fn import_table(bytes: &[u8]) -> Result<DecodedRecords, StoreError> {
    let table = decode_table(bytes)?;
    check_mandatory_columns(&table)?;
    Ok(records_from_table(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clientdesk_core::client::{ClientType, ServiceStatus};

    #[test]
    fn missing_service_status_column_is_a_schema_error() {
        let csv = "اسم العميل,نوع العميل\nAcme,جديد\n";
        let err = import_table(csv.as_bytes()).unwrap_err();
        assert_matches!(err, StoreError::Schema { column: "حالة الخدمة" });
    }

    #[test]
    fn missing_name_column_is_a_schema_error() {
        let csv = "client_type,service_status\nnew,completed\n";
        assert_matches!(
            import_table(csv.as_bytes()),
            Err(StoreError::Schema { column: "اسم العميل" })
        );
    }

    #[test]
    fn load_tolerates_missing_mandatory_columns() {
        let csv = "client_name\nAcme\n";
        let decoded = load_table(csv.as_bytes()).unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.records[0].service_status, ServiceStatus::NotStarted);
    }

    #[test]
    fn import_fills_optional_columns_and_reports_coercions() {
        let csv = "client_name,client_type,service_status\nAcme,ongoing,stalled\nBeta,new,completed\n";
        let decoded = import_table(csv.as_bytes()).unwrap();
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[0].client_type, ClientType::Ongoing);
        assert_eq!(decoded.records[0].service_status, ServiceStatus::NotStarted);
        assert_eq!(decoded.records[0].notes, "");
        assert_eq!(decoded.report.len(), 1);
        assert_eq!(decoded.report.coercions[0].original, "stalled");
    }

    #[test]
    fn duplicates_and_unnamed_rows_are_counted() {
        let csv = "client_name,client_type,service_status,notes\n\
                   Acme,new,,one\n\
                   ,new,,ghost\n\
                   Acme,ongoing,,two\n";
        let decoded = import_table(csv.as_bytes()).unwrap();
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.records[0].notes, "two");
        assert_eq!(decoded.unnamed_dropped, 1);
        assert_eq!(decoded.duplicates_merged, 1);

        let summary = ImportSummary::from(&decoded);
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.coerced, 0);
    }
}
