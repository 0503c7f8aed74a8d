//! Flat-file persistence for the client table.
//!
//! The [`ClientStore`] trait is the only thing callers depend on; the CSV
//! codec and the atomic file replace live behind it.

pub mod codec;
pub mod error;
pub mod file;
pub mod import;
pub mod memory;
pub mod store;

pub use error::StoreError;
pub use file::CsvFileStore;
pub use memory::MemoryStore;
pub use store::ClientStore;

/// Open the CSV store at `path`, writing the template table if the file
/// does not exist yet.
pub fn open_store(path: impl Into<std::path::PathBuf>) -> Result<CsvFileStore, StoreError> {
    let store = CsvFileStore::new(path);
    if store.ensure_seeded()? {
        tracing::info!(path = %store.path().display(), "Seeded new client table");
    }
    Ok(store)
}

/// Verify the store can be read and decoded.
pub fn health_check(store: &dyn ClientStore) -> Result<(), StoreError> {
    store.load().map(|_| ())
}
