//! Single-slot result store
//!
//! Holds the most recent detection result for the lifetime of the app
//! session. The detection view writes it, the result view reads it. Reads
//! do not clear the slot, so reloading the result view shows the same result.

use std::sync::RwLock;

use thiserror::Error;

use super::types::DetectionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no detection result available")]
    NotFound,
}

#[derive(Debug, Default)]
pub struct ResultStore {
    slot: RwLock<Option<DetectionResult>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever result was stored before
    pub fn put(&self, result: DetectionResult) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(result);
    }

    /// Read the stored result without removing it
    pub fn take(&self) -> Result<DetectionResult, StoreError> {
        let slot = self.slot.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.clone().ok_or(StoreError::NotFound)
    }

    /// Drop the stored result, as when the session ends
    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }
}
