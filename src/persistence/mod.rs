//! Best score persistence
//!
//! - `BestScoreStore`: read/write seam implemented per platform
//! - `save_best`: read, compare, write only on a new best
//! - `BestScoreWriter`: fire-and-forget saves off the tick loop

pub mod store;
pub mod writer;

use std::sync::{Arc, Mutex};

use thiserror::Error;

pub use store::*;
pub use writer::{BestScoreWriter, WriterStore};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("best score I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("best score record is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected the write: {0}")]
    Rejected(String),
}

/// Where the best score lives between sessions
pub trait BestScoreStore {
    /// Stored best, 0 when nothing has been saved yet
    fn read_best(&mut self) -> Result<u32, PersistError>;
    fn write_best(&mut self, score: u32) -> Result<(), PersistError>;
}

/// What `save_best` settled on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// `max(stored, score)`
    pub best: u32,
    /// `score` beat the stored value and was written
    pub is_best: bool,
}

/// Persist `score` if it beats what the store holds
pub fn save_best<S: BestScoreStore + ?Sized>(
    store: &mut S,
    score: u32,
) -> Result<SaveOutcome, PersistError> {
    let stored = store.read_best()?;
    let is_best = score > stored;
    if is_best {
        store.write_best(score)?;
    }
    Ok(SaveOutcome {
        best: stored.max(score),
        is_best,
    })
}

#[derive(Debug, Default)]
struct MemoryInner {
    best: u32,
    writes: u32,
    fail_writes: bool,
}

/// In-process store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner {
                best,
                ..Default::default()
            })),
        }
    }

    /// Make every write fail (for exercising error paths)
    pub fn failing(best: u32) -> Self {
        let store = Self::new(best);
        store.lock().fail_writes = true;
        store
    }

    pub fn best(&self) -> u32 {
        self.lock().best
    }

    /// Number of successful writes
    pub fn writes(&self) -> u32 {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BestScoreStore for MemoryStore {
    fn read_best(&mut self) -> Result<u32, PersistError> {
        Ok(self.lock().best)
    }

    fn write_best(&mut self, score: u32) -> Result<(), PersistError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(PersistError::Rejected("memory store is read-only".to_string()));
        }
        inner.best = score;
        inner.writes += 1;
        Ok(())
    }
}
