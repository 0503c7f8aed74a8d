//! Bulk import and export of the client table as CSV.
//!
//! Import replaces the stored table wholesale after checking the mandatory
//! columns; a rejected upload leaves the store untouched. Export always
//! reflects the normalized table with recomputed progress.

use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use clientdesk_store::import::ImportSummary;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the uploaded table.
pub const UPLOAD_FIELD: &str = "file";

/// Filename offered to the browser on export.
pub const EXPORT_FILENAME: &str = "clients.csv";

// ---------------------------------------------------------------------------
// GET /export
// ---------------------------------------------------------------------------

/// GET /api/v1/export
pub async fn export_clients(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let bytes = state.with_store(|store| store.export()).await?;

    tracing::debug!(bytes = bytes.len(), "Exported client table");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        bytes,
    ))
}

// ---------------------------------------------------------------------------
// POST /import
// ---------------------------------------------------------------------------

/// POST /api/v1/import
///
/// Accept a multipart upload with a `file` field and replace the stored
/// table with its contents.
pub async fn import_clients(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<ImportSummary>>> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((filename, data));
    }

    let Some((filename, data)) = upload else {
        return Err(AppError::BadRequest(format!(
            "Multipart upload must include a '{UPLOAD_FIELD}' field"
        )));
    };

    tracing::info!(filename = %filename, bytes = data.len(), "Importing client table");

    let summary = state
        .write_store(move |store| store.import(&data))
        .await?;

    Ok(Json(DataResponse { data: summary }))
}
