//! Host-side session: asset gate, fixed-step loop and best score saving
//!
//! The host owns the frame loop and calls `update` once per animation frame;
//! the session turns wall-clock time into whole simulation ticks.

use thiserror::Error;

use crate::config::{Config, ConfigError, Tuning};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::persistence::{BestScoreStore, BestScoreWriter, WriterStore};
use crate::platform::{AssetError, AssetGate, InputSignal};
use crate::sim::{GameEvent, GamePhase, GameState, SceneView, TickInput, tick};

/// Why the session could not start
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Assets(#[from] AssetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct Session {
    tuning: Tuning,
    gate: AssetGate,
    state: Option<GameState>,
    error: Option<SessionError>,
    writer: Option<BestScoreWriter>,
    initial_best: u32,
    seed: Option<u64>,
    accumulator: f32,
    pending_press: bool,
}

impl Session {
    pub fn new(tuning: Tuning, gate: AssetGate) -> Self {
        Self {
            tuning,
            gate,
            state: None,
            error: None,
            writer: None,
            initial_best: 0,
            seed: None,
            accumulator: 0.0,
            pending_press: false,
        }
    }

    /// Read the stored best now and save future bests to `store` in the background
    pub fn with_store<S: WriterStore>(mut self, mut store: S) -> Self {
        self.initial_best = match store.read_best() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Could not read best score, starting from 0: {}", e);
                0
            }
        };
        self.writer = match BestScoreWriter::spawn(store) {
            Ok(writer) => Some(writer),
            Err(e) => {
                log::warn!("Best score saving disabled: {}", e);
                None
            }
        };
        self
    }

    /// Fix the pipe generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.state.as_ref().map(|s| s.phase)
    }

    /// Latch an input for the next tick. Ignored until the game is running.
    pub fn signal(&mut self, signal: InputSignal) {
        match signal {
            InputSignal::Press if self.state.is_some() => self.pending_press = true,
            InputSignal::Press => log::debug!("Press ignored while loading"),
        }
    }

    /// Snapshot for the renderer
    pub fn scene(&self) -> Option<SceneView> {
        self.state.as_ref().map(SceneView::capture)
    }

    /// Advance by `dt` seconds of wall-clock time. Returns every event raised.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.is_none() {
            self.poll_gate();
        }
        let Some(state) = self.state.as_mut() else {
            return events;
        };

        // A long stall (tab in the background) replays at most MAX_FRAME_DT
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                press: std::mem::take(&mut self.pending_press),
            };
            let result = tick(state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &result.events {
                if let GameEvent::RunOver(outcome) = event {
                    if outcome.is_best {
                        if let Some(writer) = self.writer.as_mut() {
                            writer.submit(outcome.score);
                        }
                    }
                }
            }
            events.extend(result.events);
        }
        events
    }

    /// Wait for assets, then build the game. Config errors are fatal for the session.
    fn poll_gate(&mut self) {
        let Some(loaded) = self.gate.poll() else {
            return;
        };
        let built = loaded
            .map_err(SessionError::from)
            .and_then(|viewport| Config::new(&self.tuning, viewport).map_err(SessionError::from));
        match built {
            Ok(config) => {
                let state = match self.seed {
                    Some(seed) => GameState::with_seed(config, seed),
                    None => GameState::new(config),
                };
                let mut state = state.with_best(self.initial_best);
                state.mark_ready();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Session cannot start: {}", e);
                self.error = Some(e);
            }
        }
    }

    /// Flush pending best score saves
    pub fn shutdown(mut self) {
        if let Some(writer) = self.writer.take() {
            writer.shutdown();
        }
    }
}
