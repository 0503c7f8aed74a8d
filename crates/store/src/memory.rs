use std::sync::RwLock;

use clientdesk_core::client::ClientRecord;

use crate::codec::encode_table;
use crate::error::StoreError;
use crate::import::load_table;
use crate::store::ClientStore;

/// Client table held in memory as encoded table bytes.
///
/// Stores exactly what [`crate::CsvFileStore`] would write, so loads go
/// through the same decode and normalize path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `records`.
    pub fn with_records(records: &[ClientRecord]) -> Result<Self, StoreError> {
        let store = Self::new();
        store.save(records)?;
        Ok(store)
    }

    /// The raw table bytes currently held, if any.
    pub fn snapshot(&self) -> Option<Vec<u8>> {
        self.table.read().ok().and_then(|t| t.clone())
    }
}

fn poisoned() -> StoreError {
    StoreError::Io(std::io::Error::other("memory store lock poisoned"))
}

impl ClientStore for MemoryStore {
    fn load(&self) -> Result<Vec<ClientRecord>, StoreError> {
        let guard = self.table.read().map_err(|_| poisoned())?;
        match guard.as_deref() {
            Some(bytes) => Ok(load_table(bytes)?.records),
            None => Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no table stored",
            ))),
        }
    }

    fn save(&self, records: &[ClientRecord]) -> Result<(), StoreError> {
        let bytes = encode_table(records)?;
        *self.table.write().map_err(|_| poisoned())? = Some(bytes);
        Ok(())
    }

    fn exists(&self) -> bool {
        self.table.read().map(|t| t.is_some()).unwrap_or(false)
    }
}
