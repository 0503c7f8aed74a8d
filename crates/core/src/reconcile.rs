//! Merge-on-save: applying an edited working copy back onto the store.
//!
//! Rows are matched by `client_name`. A matched row is replaced whole by
//! its edited version; an unmatched edited row is appended; a canonical row
//! missing from the edit is kept as is. Nothing is ever deleted.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use crate::client::ClientRecord;
use crate::columns::{Column, RawRow};
use crate::normalize::normalize_row;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An edited working copy: raw rows plus the set of columns it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBatch {
    pub columns: BTreeSet<Column>,
    pub rows: Vec<RawRow>,
}

impl EditBatch {
    /// Build a batch whose column set is the union of the rows' columns.
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let columns = rows.iter().flat_map(|row| row.keys().copied()).collect();
        Self { columns, rows }
    }

    /// Build a batch with an explicit header, e.g. from a table whose rows
    /// may leave some cells absent.
    pub fn with_columns(columns: impl IntoIterator<Item = Column>, rows: Vec<RawRow>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    pub fn has_key_column(&self) -> bool {
        self.columns.contains(&Column::ClientName)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Result of a merge, with counts for logging and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    #[serde(skip)]
    pub records: Vec<ClientRecord>,
    /// Distinct canonical keys overwritten by the edit.
    pub updated: usize,
    /// Distinct keys appended by the edit.
    pub appended: usize,
    /// Canonical keys the edit did not touch.
    pub retained: usize,
    /// Edited rows dropped because their name was blank.
    pub skipped_unnamed: usize,
    /// False when the edit was empty or had no key column.
    pub applied: bool,
}

// ---------------------------------------------------------------------------
// Indexing
// ---------------------------------------------------------------------------

/// Index records by name in first-seen order. A repeated name replaces the
/// earlier record in place; records with a blank name are dropped and
/// counted.
pub fn index_by_name(
    records: impl IntoIterator<Item = ClientRecord>,
) -> (IndexMap<String, ClientRecord>, usize) {
    let mut index = IndexMap::new();
    let mut unnamed = 0;
    for record in records {
        if record.client_name.is_empty() {
            unnamed += 1;
            continue;
        }
        index.insert(record.client_name.clone(), record);
    }
    (index, unnamed)
}

/// Collapse duplicate names (last write wins, first position kept) and drop
/// unnamed records. Returns the records and how many were unnamed.
pub fn dedupe_by_name(records: Vec<ClientRecord>) -> (Vec<ClientRecord>, usize) {
    let (index, unnamed) = index_by_name(records);
    (index.into_values().collect(), unnamed)
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Merge an edited batch onto the canonical records.
///
/// An empty batch, or one without a `client_name` column, leaves the
/// canonical records untouched and reports `applied: false`. Edited rows go
/// through [`normalize_row`] before they are applied, so the result is
/// always normalized.
pub fn merge(canonical: Vec<ClientRecord>, edited: &EditBatch) -> MergeOutcome {
    if edited.is_empty() || !edited.has_key_column() {
        let retained = canonical.len();
        return MergeOutcome {
            records: canonical,
            updated: 0,
            appended: 0,
            retained,
            skipped_unnamed: 0,
            applied: false,
        };
    }

    let (mut index, _) = index_by_name(canonical);
    let original_keys: HashSet<String> = index.keys().cloned().collect();

    let mut updated = HashSet::new();
    let mut appended = HashSet::new();
    let mut skipped_unnamed = 0;

    for row in &edited.rows {
        let record = normalize_row(row);
        if record.client_name.is_empty() {
            skipped_unnamed += 1;
            continue;
        }
        let key = record.client_name.clone();
        if original_keys.contains(&key) {
            updated.insert(key.clone());
        } else {
            appended.insert(key.clone());
        }
        index.insert(key, record);
    }

    MergeOutcome {
        retained: original_keys.len() - updated.len(),
        updated: updated.len(),
        appended: appended.len(),
        skipped_unnamed,
        applied: true,
        records: index.into_values().collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
