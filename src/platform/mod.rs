//! Platform seams
//!
//! Handles the host-side edges of the simulation:
//! - Asset loading gate (the first tick waits for it)
//! - The single press input

use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};

use thiserror::Error;

use crate::config::Viewport;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    #[error("asset loading failed: {0}")]
    Failed(String),
    #[error("asset loader went away before finishing")]
    LoaderDropped,
}

/// Completes the gate; handed to whatever loads sprites
#[derive(Debug)]
pub struct AssetLoader {
    tx: Sender<Result<Viewport, AssetError>>,
}

impl AssetLoader {
    /// Assets are in; the renderer measured this viewport
    pub fn finish(self, viewport: Viewport) {
        // A dropped gate means the session is gone; nothing left to notify
        let _ = self.tx.send(Ok(viewport));
    }

    pub fn fail(self, reason: impl Into<String>) {
        let _ = self.tx.send(Err(AssetError::Failed(reason.into())));
    }
}

/// Ready future for the first tick, polled once per frame
#[derive(Debug)]
pub struct AssetGate {
    rx: Option<Receiver<Result<Viewport, AssetError>>>,
}

impl AssetGate {
    pub fn channel() -> (AssetLoader, AssetGate) {
        let (tx, rx) = channel();
        (AssetLoader { tx }, AssetGate { rx: Some(rx) })
    }

    /// A gate whose assets are already loaded (headless hosts, tests)
    pub fn resolved(viewport: Viewport) -> Self {
        let (loader, gate) = Self::channel();
        loader.finish(viewport);
        gate
    }

    /// `Some` exactly once, when loading finishes or fails
    pub fn poll(&mut self) -> Option<Result<Viewport, AssetError>> {
        let rx = self.rx.as_ref()?;
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(AssetError::LoaderDropped),
        };
        self.rx = None;
        Some(outcome)
    }

    pub fn is_settled(&self) -> bool {
        self.rx.is_none()
    }
}

/// Raw input signals from the host (keyboard, mouse, touch all map to `Press`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    Press,
}
