//! Game state and life-cycle transitions
//!
//! `GamePhase` is the only authority on which subsystems run in a tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::pipes::{PipePair, PipeWindow};
use super::score::ScoreTracker;
use crate::config::Config;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first press; no gravity, no pipes
    Idle,
    /// Gravity, scrolling pipes, collisions and scoring
    Playing,
    /// Crashed; the bird tumbles down to the ground
    Dying,
    /// Run over, frozen until the next press
    Dead,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    pub phase: GamePhase,
    pub bird: Bird,
    pub pipes: PipeWindow,
    pub score: ScoreTracker,
    /// Horizontal scroll of the ground texture (0 to -width)
    pub ground_offset: f32,
    /// Ticks simulated since the session started
    pub time_ticks: u64,
    /// Assets loaded; ticks are no-ops until set
    ready: bool,
    rng: Pcg32,
}

impl GameState {
    /// New session with an entropy-seeded pipe generator
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, Pcg32::from_rng(&mut rand::rng()))
    }

    /// New session with reproducible pipe heights
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(config: Config, rng: Pcg32) -> Self {
        Self {
            bird: Bird::new(&config),
            config,
            phase: GamePhase::Idle,
            pipes: PipeWindow::new(),
            score: ScoreTracker::default(),
            ground_offset: 0.0,
            time_ticks: 0,
            ready: false,
            rng,
        }
    }

    /// Seed the session best from storage
    pub fn with_best(mut self, best: u32) -> Self {
        self.score = ScoreTracker::with_best(best);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Open the gate once the host has finished loading
    pub fn mark_ready(&mut self) {
        if !self.ready {
            log::info!("Assets ready, simulation unlocked");
        }
        self.ready = true;
    }

    /// Idle -> Playing: fresh score, first pipe, opening flap
    pub(crate) fn start_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.score.on_restart();
        self.spawn_pipe();
        self.bird.apply_impulse();
        log::info!("Run started (best {})", self.score.best());
    }

    /// Dead -> Idle: empty sky, zero score, bird back at the start
    pub(crate) fn restart(&mut self) {
        self.phase = GamePhase::Idle;
        self.pipes.clear();
        self.score.on_restart();
        self.bird.reset();
        log::info!("Restarted");
    }

    /// Spawn a pipe pair; returns the pair evicted to make room
    pub(crate) fn spawn_pipe(&mut self) -> Option<PipePair> {
        self.pipes.spawn(&self.config, &mut self.rng)
    }

    /// Scroll the ground strip, wrapping after one screen width
    pub(crate) fn scroll_ground(&mut self) {
        if self.ground_offset.abs() > self.config.width {
            self.ground_offset = 0.0;
        }
        self.ground_offset -= self.config.scroll_speed;
    }
}
