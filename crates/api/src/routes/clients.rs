//! Route definitions for the client table.

use axum::routing::get;
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET  /clients           -> list_clients
/// PUT  /clients           -> save_clients
/// GET  /clients/{name}    -> get_client
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/clients",
            get(clients::list_clients).put(clients::save_clients),
        )
        .route("/clients/{name}", get(clients::get_client))
}
