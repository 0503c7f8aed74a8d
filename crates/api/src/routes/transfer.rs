use axum::routing::{get, post};
use axum::Router;

use crate::handlers::transfer;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET  /export    -> export_clients
/// POST /import    -> import_clients
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", get(transfer::export_clients))
        .route("/import", post(transfer::import_clients))
}
