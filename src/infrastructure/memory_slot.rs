use std::sync::{Arc, Mutex};

use crate::domain::slot::{DEFAULT_SLOT_KEY, PersistenceSlot, SlotError};

/// In-process slot. Clones share the same value, so a second store opened on a
/// clone observes what the first one persisted.
#[derive(Debug, Clone)]
pub struct MemorySlot {
    key: String,
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), value: Arc::default() }
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: Arc::new(Mutex::new(Some(value.into()))) }
    }

    /// Current raw value, without going through the trait.
    pub fn snapshot(&self) -> Option<String> {
        self.value.lock().map(|v| v.clone()).unwrap_or(None)
    }

    fn unavailable(&self) -> SlotError {
        SlotError::Unavailable { key: self.key.clone(), reason: "lock poisoned".into() }
    }
}

impl Default for MemorySlot {
    fn default() -> Self { Self::new(DEFAULT_SLOT_KEY) }
}

impl PersistenceSlot for MemorySlot {
    fn key(&self) -> &str { &self.key }

    fn read(&self) -> Result<Option<String>, SlotError> {
        let guard = self.value.lock().map_err(|_| self.unavailable())?;
        Ok(guard.clone())
    }

    fn write(&self, value: &str) -> Result<(), SlotError> {
        let mut guard = self.value.lock().map_err(|_| self.unavailable())?;
        *guard = Some(value.to_string());
        Ok(())
    }
}
