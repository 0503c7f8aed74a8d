use std::sync::Arc;

use clientdesk_store::{ClientStore, StoreError};
use tokio::sync::Mutex;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Canonical client table.
    pub store: Arc<dyn ClientStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Held for the whole load-merge-save or import cycle so only one
    /// writer touches the table at a time.
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: Arc<dyn ClientStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Run a blocking store operation off the async runtime.
    pub async fn with_store<T, F>(&self, op: F) -> AppResult<T>
    where
        F: FnOnce(&dyn ClientStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| AppError::InternalError(format!("Store task failed: {e}")))?
            .map_err(AppError::from)
    }

    /// Like [`Self::with_store`], holding the write lock until the
    /// blocking operation returns, even if the request is dropped first.
    pub async fn write_store<T, F>(&self, op: F) -> AppResult<T>
    where
        F: FnOnce(&dyn ClientStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        self.with_store(move |store| {
            let result = op(store);
            drop(guard);
            result
        })
        .await
    }
}
