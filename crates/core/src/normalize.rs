//! Schema normalization: raw string rows to typed client records.
//!
//! Normalization is total. Missing columns read as empty, enumerated cells
//! outside their domain fall back to the domain default, and free text is
//! carried through. Because the output is typed, running a normalized
//! record back through [`encode_row`] and [`normalize_row`] yields the same
//! record.

use serde::Serialize;

use crate::client::{CellValue, ClientRecord, ClientType, Completion, ProcessStep, ServiceStatus};
use crate::columns::{Column, RawRow};
use crate::progress::progress;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// A non-empty cell that was outside its domain and got replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercionWarning {
    /// Zero-based index of the row in the input.
    pub row: usize,
    pub client_name: String,
    pub column: String,
    pub original: String,
    /// The store label the cell was coerced to.
    pub coerced_to: &'static str,
}

/// Every coercion applied during one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub coercions: Vec<CoercionWarning>,
}

impl NormalizeReport {
    pub fn is_clean(&self) -> bool {
        self.coercions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.coercions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coercions.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

fn cell(row: &RawRow, column: Column) -> &str {
    row.get(&column).map(String::as_str).unwrap_or("")
}

/// Decode an enumerated cell, recording a warning when a non-empty value is
/// replaced by the default.
fn coerce<T: CellValue>(
    row: &RawRow,
    column: Column,
    index: usize,
    client_name: &str,
    report: &mut Option<&mut NormalizeReport>,
) -> T {
    let raw = cell(row, column);
    match T::decode(raw) {
        Some(value) => value,
        None => {
            let value = T::default();
            if let Some(report) = report.as_deref_mut() {
                if !raw.trim().is_empty() {
                    report.coercions.push(CoercionWarning {
                        row: index,
                        client_name: client_name.to_string(),
                        column: column.key().to_string(),
                        original: raw.to_string(),
                        coerced_to: value.label(),
                    });
                }
            }
            value
        }
    }
}

fn normalize_indexed(
    row: &RawRow,
    index: usize,
    mut report: Option<&mut NormalizeReport>,
) -> ClientRecord {
    let client_name = cell(row, Column::ClientName).trim().to_string();

    let client_type: ClientType =
        coerce(row, Column::ClientType, index, &client_name, &mut report);
    let service_status: ServiceStatus =
        coerce(row, Column::ServiceStatus, index, &client_name, &mut report);

    let process_steps = ProcessStep::ALL
        .iter()
        .map(|step| {
            let completion: Completion =
                coerce(row, Column::Step(*step), index, &client_name, &mut report);
            (*step, completion)
        })
        .collect();

    let invoice_1 = coerce(row, Column::FirstInvoice, index, &client_name, &mut report);
    let invoice_2 = coerce(row, Column::SecondInvoice, index, &client_name, &mut report);

    ClientRecord {
        client_type,
        process_steps,
        service_status,
        invoice_1,
        invoice_2,
        notes: cell(row, Column::Notes).to_string(),
        client_name,
    }
}

/// Normalize a single raw row.
pub fn normalize_row(row: &RawRow) -> ClientRecord {
    normalize_indexed(row, 0, None)
}

/// Normalize every row, preserving order.
pub fn normalize(rows: &[RawRow]) -> Vec<ClientRecord> {
    rows.iter().map(normalize_row).collect()
}

/// Normalize every row and report each out-of-domain value that was coerced.
pub fn normalize_with_report(rows: &[RawRow]) -> (Vec<ClientRecord>, NormalizeReport) {
    let mut report = NormalizeReport::default();
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| normalize_indexed(row, i, Some(&mut report)))
        .collect();
    (records, report)
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode a record back into store labels, including the derived progress.
pub fn encode_row(record: &ClientRecord) -> RawRow {
    Column::ALL
        .iter()
        .map(|column| {
            let value = match column {
                Column::ClientName => record.client_name.clone(),
                Column::ClientType => record.client_type.label().to_string(),
                Column::Step(step) => record.step(*step).label().to_string(),
                Column::ServiceStatus => record.service_status.label().to_string(),
                Column::FirstInvoice => record.invoice_1.label().to_string(),
                Column::SecondInvoice => record.invoice_2.label().to_string(),
                Column::Notes => record.notes.clone(),
                Column::Progress => progress(record).to_string(),
            };
            (*column, value)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::raw_row;

    fn messy_rows() -> Vec<RawRow> {
        vec![
            raw_row([
                ("client_name", " Acme "),
                ("client_type", "vip"),
                ("service_status", "paused"),
                ("coi_form", "yes"),
                ("ca_form", "تم"),
                ("invoice_1", ""),
                ("notes", "call back"),
            ]),
            raw_row([("client_name", "Bare")]),
            raw_row([
                ("اسم العميل", "Labelled"),
                ("نوع العميل", "مستمر"),
                ("حالة الخدمة", "مكتملة"),
                ("فاتورة ثانية (50%)", "تم"),
                ("نسبة التقدم", "999"),
            ]),
        ]
    }

    // -- coercion ---------------------------------------------------------

    #[test]
    fn out_of_domain_values_fall_back_to_defaults() {
        let record = normalize_row(&messy_rows()[0]);
        assert_eq!(record.client_type, ClientType::New);
        assert_eq!(record.service_status, ServiceStatus::NotStarted);
        assert_eq!(record.step(ProcessStep::CoiForm), Completion::NotDone);
        assert_eq!(record.step(ProcessStep::CaForm), Completion::Done);
        assert_eq!(record.invoice_1, Completion::NotDone);
    }

    #[test]
    fn missing_columns_read_as_empty() {
        let record = normalize_row(&messy_rows()[1]);
        assert_eq!(record.client_type, ClientType::New);
        assert_eq!(record.service_status, ServiceStatus::NotStarted);
        assert_eq!(record.process_steps.len(), 8);
        assert!(record.process_steps.values().all(|c| *c == Completion::NotDone));
        assert_eq!(record.notes, "");
    }

    #[test]
    fn client_name_is_trimmed_and_notes_kept_verbatim() {
        let record = normalize_row(&messy_rows()[0]);
        assert_eq!(record.client_name, "Acme");
        assert_eq!(record.notes, "call back");
    }

    #[test]
    fn store_labels_decode_and_progress_column_is_ignored() {
        let record = normalize_row(&messy_rows()[2]);
        assert_eq!(record.client_type, ClientType::Ongoing);
        assert_eq!(record.service_status, ServiceStatus::Completed);
        assert_eq!(record.invoice_2, Completion::Done);
        assert_eq!(progress(&record), 14);
    }

    // -- report -----------------------------------------------------------

    #[test]
    fn report_lists_non_empty_coercions_only() {
        let (_, report) = normalize_with_report(&messy_rows());
        let columns: Vec<_> = report.coercions.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(columns, vec!["client_type", "service_status", "coi_form"]);
        assert!(report.coercions.iter().all(|c| c.row == 0 && c.client_name == "Acme"));
        assert_eq!(report.coercions[0].original, "vip");
        assert_eq!(report.coercions[0].coerced_to, "جديد");
    }

    #[test]
    fn clean_input_yields_clean_report() {
        let rows = vec![raw_row([
            ("client_name", "Tidy"),
            ("client_type", "ongoing"),
            ("service_status", "in_progress"),
        ])];
        let (_, report) = normalize_with_report(&rows);
        assert!(report.is_clean());
    }

    #[test]
    fn report_does_not_change_the_records() {
        let rows = messy_rows();
        let (reported, _) = normalize_with_report(&rows);
        assert_eq!(reported, normalize(&rows));
    }

    // -- idempotence ------------------------------------------------------

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize(&messy_rows());
        let encoded: Vec<_> = once.iter().map(encode_row).collect();
        let twice = normalize(&encoded);
        assert_eq!(once, twice);
    }

    #[test]
    fn second_pass_reports_nothing() {
        let once = normalize(&messy_rows());
        let encoded: Vec<_> = once.iter().map(encode_row).collect();
        let (_, report) = normalize_with_report(&encoded);
        assert!(report.is_clean());
    }

    // -- encoding ---------------------------------------------------------

    #[test]
    fn encode_writes_every_column_with_store_labels() {
        let record = ClientRecord::new("Acme", ClientType::Ongoing)
            .with_steps_done(&[ProcessStep::CoiForm]);
        let row = encode_row(&record);
        assert_eq!(row.len(), Column::ALL.len());
        assert_eq!(row[&Column::ClientType], "مستمر");
        assert_eq!(row[&Column::Step(ProcessStep::CoiForm)], "تم");
        assert_eq!(row[&Column::Step(ProcessStep::CaForm)], "لم يتم");
        assert_eq!(row[&Column::ServiceStatus], "لم تبدأ");
        assert_eq!(row[&Column::Progress], "14");
    }

    // -- properties -------------------------------------------------------

    mod properties {
        use super::*;
        use crate::client::{CellValue, ClientType, Completion, ServiceStatus};
        use proptest::prelude::*;

        fn domain_cells() -> Vec<&'static str> {
            let mut cells = Vec::new();
            for v in ClientType::VALUES {
                cells.extend([v.label(), v.token()]);
            }
            for v in ServiceStatus::VALUES {
                cells.extend([v.label(), v.token()]);
            }
            for v in Completion::VALUES {
                cells.extend([v.label(), v.token()]);
            }
            cells
        }

        fn cell() -> impl Strategy<Value = String> {
            prop_oneof![
                (prop::sample::select(domain_cells()), " {0,2}", " {0,2}")
                    .prop_map(|(v, l, r)| format!("{l}{v}{r}")),
                any::<String>(),
                Just(String::new()),
            ]
        }

        fn raw_rows() -> impl Strategy<Value = Vec<RawRow>> {
            let row = prop::collection::btree_map(
                prop::sample::select(Column::ALL.to_vec()),
                cell(),
                0..Column::ALL.len(),
            );
            prop::collection::vec(row, 0..6)
        }

        proptest! {
            #[test]
            fn normalize_is_idempotent_for_any_rows(rows in raw_rows()) {
                let once = normalize(&rows);
                let encoded: Vec<_> = once.iter().map(encode_row).collect();
                let (twice, report) = normalize_with_report(&encoded);
                prop_assert_eq!(&once, &twice);
                prop_assert!(report.is_clean());
            }

            #[test]
            fn normalize_never_changes_row_count(rows in raw_rows()) {
                prop_assert_eq!(normalize(&rows).len(), rows.len());
            }
        }
    }
}
