//! The player-controlled bird
//!
//! Sign convention: screen y grows downward, `velocity` is positive when the
//! bird rises. Each gravity step moves the bird by the current velocity and
//! then bleeds `gravity` off it.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec2;

use crate::config::Config;
use crate::consts::{FLAP_ROTATION_DAMPING, TUMBLE_STEP};

/// Axis-aligned box, centre anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone)]
pub struct Bird {
    /// Centre position; `x` never changes during a run
    pub pos: Vec2,
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
    /// Wing-flap animation is cycling
    pub animating: bool,
    /// Extra rotation accumulated while dying
    tumble: f32,
    start: Vec2,
    flap_velocity: f32,
    gravity: f32,
}

impl Bird {
    pub fn new(config: &Config) -> Self {
        let mut bird = Self {
            pos: Vec2::ZERO,
            velocity: 0.0,
            width: config.bird_width,
            height: config.bird_height,
            alive: true,
            animating: true,
            tumble: 0.0,
            start: Vec2::new(config.bird_x, config.bird_y),
            flap_velocity: config.flap_velocity,
            gravity: config.gravity,
        };
        bird.reset();
        bird
    }

    /// Back to the start pose, alive and flapping
    pub fn reset(&mut self) {
        self.pos = self.start;
        self.velocity = self.flap_velocity;
        self.tumble = 0.0;
        self.alive = true;
        self.animating = true;
    }

    pub fn apply_gravity_step(&mut self) {
        self.pos.y -= self.velocity;
        self.velocity -= self.gravity;
    }

    pub fn apply_impulse(&mut self) {
        self.velocity = self.flap_velocity;
    }

    /// Freeze the pose animation. No effect on a dead bird.
    pub fn kill(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.animating = false;
    }

    /// One frame of the death spin
    pub fn tumble_step(&mut self) {
        self.tumble += TUMBLE_STEP;
    }

    /// Nose-up right after a flap, nose-down in free fall, plus any death spin
    pub fn rotation(&self) -> f32 {
        let pitch = ((FLAP_ROTATION_DAMPING + self.velocity) / FLAP_ROTATION_DAMPING)
            .clamp(-FRAC_PI_2, FRAC_PI_4);
        -pitch + self.tumble
    }

    pub fn bounds(&self) -> Bounds {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        Bounds {
            left: self.pos.x - half_w,
            right: self.pos.x + half_w,
            top: self.pos.y - half_h,
            bottom: self.pos.y + half_h,
        }
    }
}
