//! Read-only scene snapshot for the renderer
//!
//! Captured after a tick; the renderer draws from this and never touches `GameState`.

use glam::Vec2;
use serde::Serialize;

use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirdPose {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    /// Keep cycling the wing frames
    pub animating: bool,
}

/// One drawable pipe body, centre anchored
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipeSprite {
    pub pipe_id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Upper pipes are drawn rotated by π
    pub flipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneView {
    pub phase: GamePhase,
    pub score: u32,
    pub best: u32,
    pub bird: BirdPose,
    pub pipes: Vec<PipeSprite>,
    pub ground_offset: f32,
    /// Screen y of the top of the ground strip
    pub ground_y: f32,
}

impl SceneView {
    pub fn capture(state: &GameState) -> Self {
        let mut view = Self {
            phase: state.phase,
            score: 0,
            best: 0,
            bird: BirdPose {
                pos: Vec2::ZERO,
                width: 0.0,
                height: 0.0,
                rotation: 0.0,
                animating: false,
            },
            pipes: Vec::with_capacity(state.pipes.len() * 2),
            ground_offset: 0.0,
            ground_y: 0.0,
        };
        view.refresh(state);
        view
    }

    /// Overwrite in place, reusing the pipe buffer
    pub fn refresh(&mut self, state: &GameState) {
        let config = &state.config;
        self.phase = state.phase;
        self.score = state.score.score();
        self.best = state.score.best();
        self.bird = BirdPose {
            pos: state.bird.pos,
            width: state.bird.width,
            height: state.bird.height,
            rotation: state.bird.rotation(),
            animating: state.bird.animating,
        };
        self.pipes.clear();
        for pair in state.pipes.iter() {
            self.pipes.push(PipeSprite {
                pipe_id: pair.id,
                pos: Vec2::new(pair.x, pair.upper_y),
                width: config.pipe_width,
                height: config.pipe_height,
                flipped: true,
            });
            self.pipes.push(PipeSprite {
                pipe_id: pair.id,
                pos: Vec2::new(pair.x, pair.lower_y),
                width: config.pipe_width,
                height: config.pipe_height,
                flipped: false,
            });
        }
        self.ground_offset = state.ground_offset;
        self.ground_y = config.sky_height;
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
