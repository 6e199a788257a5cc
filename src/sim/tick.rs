//! Per-frame simulation tick
//!
//! The host calls `tick` once per frame signal; everything in here runs to
//! completion synchronously.

use std::f32::consts::FRAC_PI_2;

use super::collision::{self, Collision};
use super::score::RunOutcome;
use super::state::{GamePhase, GameState};
use crate::consts::PIPE_WINDOW_CAPACITY;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap/click/space: flap while playing, start from idle, restart when dead
    pub press: bool,
}

impl TickInput {
    pub fn press() -> Self {
        Self { press: true }
    }
}

/// Things that happened during a tick, for the renderer, audio and storage
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Idle -> Playing
    RunStarted,
    Flapped,
    /// A pipe was passed; carries the new score
    Scored(u32),
    PipeSpawned { id: u32 },
    /// The renderer should release this pipe's sprites
    PipeEvicted { id: u32 },
    Crashed(Collision),
    /// Dying -> Dead; persist the best score if `is_best`
    RunOver(RunOutcome),
    /// Dead -> Idle
    Restarted,
}

/// Outcome of one `tick` call
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// False when the tick was a no-op (not ready, or frozen after death)
    pub advanced: bool,
    pub phase: GamePhase,
    pub events: Vec<GameEvent>,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickResult {
    let mut events = Vec::new();

    if !state.is_ready() {
        return TickResult {
            advanced: false,
            phase: state.phase,
            events,
        };
    }

    if input.press {
        match state.phase {
            GamePhase::Idle => {
                state.start_run();
                events.push(GameEvent::RunStarted);
                if let Some(pair) = state.pipes.newest() {
                    events.push(GameEvent::PipeSpawned { id: pair.id });
                }
            }
            GamePhase::Playing => {
                state.bird.apply_impulse();
                events.push(GameEvent::Flapped);
            }
            GamePhase::Dead => {
                state.restart();
                events.push(GameEvent::Restarted);
            }
            // Still falling; the press is neither a flap nor a restart
            GamePhase::Dying => {}
        }
    }

    if state.phase == GamePhase::Dead {
        return TickResult {
            advanced: false,
            phase: state.phase,
            events,
        };
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Idle => {
            state.scroll_ground();
        }
        GamePhase::Playing => {
            state.scroll_ground();
            state.bird.apply_gravity_step();
            step_pipes(state, &mut events);

            let bounds = state.bird.bounds();
            let hit = collision::detect(
                &bounds,
                state.config.sky_height,
                state.pipes.iter(),
                state.config.pipe_width,
            );
            if let Some(hit) = hit {
                log::info!("Crashed into {:?} with score {}", hit, state.score.score());
                state.bird.kill();
                state.phase = GamePhase::Dying;
                events.push(GameEvent::Crashed(hit));
            }
        }
        GamePhase::Dying => {
            state.bird.apply_gravity_step();
            state.bird.tumble_step();

            let settled_y = state.config.sky_height - state.bird.height / 2.0;
            if state.bird.rotation() > FRAC_PI_2 && state.bird.pos.y > settled_y {
                let outcome = state.score.settle();
                log::info!(
                    "Run over: score {} best {}{}",
                    outcome.score,
                    outcome.best,
                    if outcome.is_best { " (new best)" } else { "" }
                );
                state.phase = GamePhase::Dead;
                events.push(GameEvent::RunOver(outcome));
            }
        }
        GamePhase::Dead => {}
    }

    TickResult {
        advanced: true,
        phase: state.phase,
        events,
    }
}

/// Scroll, spawn/evict and score the pipe window
fn step_pipes(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.pipes.advance(state.config.scroll_speed);

    if state.pipes.needs_spawn(&state.config) {
        let evicted = state.spawn_pipe();
        if let Some(pair) = state.pipes.newest() {
            events.push(GameEvent::PipeSpawned { id: pair.id });
        }
        if let Some(old) = evicted {
            events.push(GameEvent::PipeEvicted { id: old.id });
        }
    }
    debug_assert!(state.pipes.len() <= PIPE_WINDOW_CAPACITY);

    let bird_x = state.bird.pos.x;
    for pair in state.pipes.iter_mut() {
        if !pair.scored && pair.x <= bird_x {
            pair.scored = true;
            state.score.on_passed();
            events.push(GameEvent::Scored(state.score.score()));
        }
    }
}
