/// Failures at the store and import boundary.
///
/// Normalization never fails; everything here comes from reading, parsing,
/// or writing a table.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An imported table lacks a mandatory column.
    #[error("Missing mandatory column: {column}")]
    Schema { column: &'static str },

    /// The table could not be parsed (bad CSV shape, invalid UTF-8).
    #[error("Malformed table: {0}")]
    Parse(String),

    /// The table could not be serialized.
    #[error("Failed to encode table: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
