pub mod clients;
pub mod dashboard;
pub mod health;
pub mod transfer;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /clients                      list (filtered), save edits
/// /clients/{name}               single client
/// /dashboard/summary            metric tiles, distributions, progress
/// /export                       CSV download
/// /import                       CSV upload (bulk replace)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(clients::router())
        .nest("/dashboard", dashboard::router())
        .merge(transfer::router())
}
