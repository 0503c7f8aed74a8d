use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use clientdesk_core::dashboard::{summarize, DashboardSummary};

use crate::error::AppResult;
use crate::query::FilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Dashboard summary stamped with the time it was computed.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: DashboardSummary,
    pub generated_at: DateTime<Utc>,
}

/// GET /api/v1/dashboard/summary
///
/// Metric tiles over the whole store; distributions and the progress
/// series over the filtered rows.
pub async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<DataResponse<SummaryResponse>>> {
    let filter = params.to_filter()?;
    let records = state.with_store(|store| store.load()).await?;

    let summary = summarize(&records, &filter);

    Ok(Json(DataResponse {
        data: SummaryResponse {
            summary,
            generated_at: Utc::now(),
        },
    }))
}
