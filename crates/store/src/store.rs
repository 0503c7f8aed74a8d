use clientdesk_core::client::ClientRecord;
use clientdesk_core::reconcile::{merge, EditBatch, MergeOutcome};
use clientdesk_core::seed::template_records;

use crate::codec::encode_table;
use crate::error::StoreError;
use crate::import::{import_table, ImportSummary};

/// Canonical client table: load the whole set, replace the whole set.
///
/// Implementations must make `save` atomic from a reader's point of view:
/// either the previous table or the new one is visible, never a mix.
/// Callers are responsible for serializing writers.
pub trait ClientStore: Send + Sync {
    /// Load and normalize every record.
    fn load(&self) -> Result<Vec<ClientRecord>, StoreError>;

    /// Replace the stored table with `records`.
    fn save(&self, records: &[ClientRecord]) -> Result<(), StoreError>;

    /// Whether a table has been written yet.
    fn exists(&self) -> bool;

    /// Write the template table if nothing is stored yet. Returns whether
    /// it seeded.
    fn ensure_seeded(&self) -> Result<bool, StoreError> {
        if self.exists() {
            return Ok(false);
        }
        self.save(&template_records())?;
        Ok(true)
    }

    /// Merge an edited working copy onto the stored table and save the
    /// result. A no-op merge does not write.
    fn apply_edits(&self, edited: &EditBatch) -> Result<MergeOutcome, StoreError> {
        let outcome = merge(self.load()?, edited);
        if outcome.applied {
            self.save(&outcome.records)?;
            tracing::info!(
                updated = outcome.updated,
                appended = outcome.appended,
                retained = outcome.retained,
                skipped_unnamed = outcome.skipped_unnamed,
                "Saved edited clients"
            );
        } else {
            tracing::info!("Edit batch was empty or had no client name column; nothing saved");
        }
        Ok(outcome)
    }

    /// Replace the stored table with an uploaded one. On any error the
    /// stored table is left as it was.
    fn import(&self, bytes: &[u8]) -> Result<ImportSummary, StoreError> {
        let decoded = import_table(bytes)?;
        self.save(&decoded.records)?;
        let summary = ImportSummary::from(&decoded);
        tracing::info!(
            imported = summary.imported,
            coerced = summary.coerced,
            "Replaced client table from import"
        );
        Ok(summary)
    }

    /// Serialize the current table, progress included.
    fn export(&self) -> Result<Vec<u8>, StoreError> {
        encode_table(&self.load()?)
    }
}
