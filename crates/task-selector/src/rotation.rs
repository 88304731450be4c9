//! Per-level rotation cursors

use crate::SelectionError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Next-task cursor for every level
///
/// Owned explicitly and injected into a selector, so independent selectors
/// can rotate independently or share one state across threads.
#[derive(Debug, Default)]
pub struct RotationState {
    cursors: Mutex<HashMap<String, usize>>,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// New state behind an `Arc`, ready to hand to one or more selectors
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, usize>>, SelectionError> {
        self.cursors
            .lock()
            .map_err(|e| SelectionError::StateLock(format!("Lock error: {}", e)))
    }

    /// Return the cursor for `level` and advance it modulo `len`.
    ///
    /// Read and advance happen under one lock, so concurrent callers never
    /// serve the same index twice in a cycle. Unseen levels start at 0.
    pub fn advance(&self, level: &str, len: usize) -> Result<usize, SelectionError> {
        if len == 0 {
            return Err(SelectionError::EmptyLevel(level.to_string()));
        }

        let mut cursors = self.lock()?;
        let cursor = cursors.entry(level.to_string()).or_insert(0);
        // catalog may have shrunk since the cursor was stored
        let served = *cursor % len;
        *cursor = (served + 1) % len;

        debug!("Rotation {}: served {}, next {}", level, served, *cursor);
        Ok(served)
    }

    /// Cursor that the next `advance` on `level` will serve
    pub fn cursor(&self, level: &str) -> Result<usize, SelectionError> {
        Ok(self.lock()?.get(level).copied().unwrap_or(0))
    }

    /// Reset every level back to its first task
    pub fn reset(&self) -> Result<(), SelectionError> {
        self.lock()?.clear();
        Ok(())
    }
}
