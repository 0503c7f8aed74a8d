//! Handlers for the client table: filtered listing, single lookup, and
//! merge-on-save of an edited working copy.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};

use clientdesk_core::client::ClientView;
use clientdesk_core::columns::{Column, RawRow};
use clientdesk_core::error::CoreError;
use clientdesk_core::reconcile::{EditBatch, MergeOutcome};

use crate::error::AppResult;
use crate::query::FilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// An edited working copy as sent by the table editor.
///
/// Row keys and `columns` entries may be column keys (`client_name`) or
/// store headers. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
pub struct SaveClientsRequest {
    /// Header of the working copy. When absent, the union of row keys.
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    pub rows: Vec<Map<String, Value>>,
}

impl SaveClientsRequest {
    pub fn into_batch(self) -> EditBatch {
        let rows: Vec<RawRow> = self.rows.iter().map(row_from_json).collect();
        match self.columns {
            Some(columns) => {
                let header: Vec<Column> =
                    columns.iter().filter_map(|c| Column::parse(c)).collect();
                let present: Vec<Column> =
                    rows.iter().flat_map(|row| row.keys().copied()).collect();
                EditBatch::with_columns(header.into_iter().chain(present), rows)
            }
            None => EditBatch::from_rows(rows),
        }
    }
}

fn row_from_json(row: &Map<String, Value>) -> RawRow {
    row.iter()
        .filter_map(|(key, value)| Column::parse(key).map(|column| (column, cell_text(value))))
        .collect()
}

/// Cells arrive as JSON; the normalizer works on text.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// GET /clients
// ---------------------------------------------------------------------------

/// GET /api/v1/clients
///
/// Every stored client matching the filter, in store order, with progress.
pub async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<DataResponse<Vec<ClientView>>>> {
    let filter = params.to_filter()?;
    let records = state.with_store(|store| store.load()).await?;

    let views: Vec<ClientView> = filter
        .apply(&records)
        .into_iter()
        .map(|record| record.view())
        .collect();

    tracing::debug!(total = records.len(), shown = views.len(), "Listed clients");

    Ok(Json(DataResponse { data: views }))
}

// ---------------------------------------------------------------------------
// GET /clients/{name}
// ---------------------------------------------------------------------------

/// GET /api/v1/clients/{name}
pub async fn get_client(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<ClientView>>> {
    let records = state.with_store(|store| store.load()).await?;
    let key = name.trim();

    let view = records
        .iter()
        .find(|record| record.client_name == key)
        .map(|record| record.view())
        .ok_or_else(|| CoreError::NotFound {
            entity: "Client",
            key: key.to_string(),
        })?;

    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// PUT /clients
// ---------------------------------------------------------------------------

/// PUT /api/v1/clients
///
/// Merge the working copy onto the stored table: rows matched by name are
/// replaced, new names are appended, rows left out of the copy are kept.
pub async fn save_clients(
    State(state): State<AppState>,
    Json(input): Json<SaveClientsRequest>,
) -> AppResult<Json<DataResponse<MergeOutcome>>> {
    let batch = input.into_batch();
    let rows = batch.rows.len();

    let outcome = state
        .write_store(move |store| store.apply_edits(&batch))
        .await?;

    tracing::debug!(rows, applied = outcome.applied, "Processed client edits");

    Ok(Json(DataResponse { data: outcome }))
}
