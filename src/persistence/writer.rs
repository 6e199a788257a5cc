//! Fire-and-forget best score saving
//!
//! On native the store lives on a worker thread fed by a channel, so a slow
//! or failing disk never stalls a tick. The browser has no threads and
//! LocalStorage is synchronous, so the wasm writer saves inline.

use super::{BestScoreStore, save_best};

#[cfg(not(target_arch = "wasm32"))]
use std::sync::mpsc::{Sender, channel};
#[cfg(not(target_arch = "wasm32"))]
use std::thread::JoinHandle;

#[cfg(not(target_arch = "wasm32"))]
use super::PersistError;

/// Stores the writer can own: thread-safe on native, anything on wasm
#[cfg(not(target_arch = "wasm32"))]
pub trait WriterStore: BestScoreStore + Send + 'static {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: BestScoreStore + Send + 'static> WriterStore for T {}

#[cfg(target_arch = "wasm32")]
pub trait WriterStore: BestScoreStore + 'static {}
#[cfg(target_arch = "wasm32")]
impl<T: BestScoreStore + 'static> WriterStore for T {}

/// Save `score` and report the result to the log; errors stop here
fn save_and_log<S: BestScoreStore + ?Sized>(store: &mut S, score: u32) {
    match save_best(store, score) {
        Ok(outcome) if outcome.is_best => log::info!("New best score {} persisted", score),
        Ok(outcome) => log::debug!("Score {} below stored best {}", score, outcome.best),
        Err(e) => log::warn!("Failed to persist best score {}: {}", score, e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub struct BestScoreWriter {
    tx: Option<Sender<u32>>,
    worker: Option<JoinHandle<()>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl BestScoreWriter {
    /// Move `store` onto a background thread
    pub fn spawn<S: WriterStore>(mut store: S) -> Result<Self, PersistError> {
        let (tx, rx) = channel::<u32>();
        let worker = std::thread::Builder::new()
            .name("best-score-writer".to_string())
            .spawn(move || {
                for score in rx {
                    save_and_log(&mut store, score);
                }
                log::debug!("Best score writer stopped");
            })?;
        Ok(Self {
            tx: Some(tx),
            worker: Some(worker),
        })
    }

    /// Queue a save; never blocks
    pub fn submit(&self, score: u32) {
        let sent = self.tx.as_ref().is_some_and(|tx| tx.send(score).is_ok());
        if !sent {
            log::warn!("Best score writer is gone, dropping score {}", score);
        }
    }

    /// Drain pending saves and wait for the worker to exit
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("Best score writer panicked");
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Drop for BestScoreWriter {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(target_arch = "wasm32")]
pub struct BestScoreWriter {
    store: Box<dyn BestScoreStore>,
}

#[cfg(target_arch = "wasm32")]
impl BestScoreWriter {
    pub fn spawn<S: WriterStore>(store: S) -> Result<Self, super::PersistError> {
        Ok(Self {
            store: Box::new(store),
        })
    }

    pub fn submit(&mut self, score: u32) {
        save_and_log(self.store.as_mut(), score);
    }

    pub fn shutdown(self) {}
}
