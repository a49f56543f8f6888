use std::path::PathBuf;

use thiserror::Error;

/// Key the todo collection is stored under unless configured otherwise.
pub const DEFAULT_SLOT_KEY: &str = "todos";

#[derive(Debug, Error)]
pub enum SlotError {
    #[error("failed to read slot `{key}` from {path}")]
    Read { key: String, path: PathBuf, #[source] source: std::io::Error },
    #[error("failed to write slot `{key}` to {path}")]
    Write { key: String, path: PathBuf, #[source] source: std::io::Error },
    #[error("invalid slot key `{key}`: {reason}")]
    InvalidKey { key: String, reason: &'static str },
    #[error("slot `{key}` is unavailable: {reason}")]
    Unavailable { key: String, reason: String },
}

/// A single named key-value location holding the serialized collection.
///
/// `write` always replaces the whole value; implementations never patch.
pub trait PersistenceSlot {
    fn key(&self) -> &str;
    fn read(&self) -> Result<Option<String>, SlotError>;
    fn write(&self, value: &str) -> Result<(), SlotError>;
}
