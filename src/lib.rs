//! Flappy Core - simulation core for a side-scrolling flappy game
//!
//! Core modules:
//! - `sim`: Per-tick simulation (bird physics, pipes, collisions, game state)
//! - `config`: Tuning and resolution-scaled configuration
//! - `persistence`: Best score storage and background saving
//! - `platform`: Asset-loading gate and input signals
//! - `session`: Host-side fixed-step loop tying it all together

pub mod config;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{Config, ConfigError, Tuning, Viewport};
pub use session::{Session, SessionError};

/// Game constants that are not resolution dependent
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the session will try to catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Velocity scale for the bird's pitch: (FLAP + v) / FLAP
    pub const FLAP_ROTATION_DAMPING: f32 = 35.0;
    /// Extra rotation per tick while the bird tumbles to the ground
    pub const TUMBLE_STEP: f32 = std::f32::consts::FRAC_PI_4;

    /// Pipes held at steady state
    pub const SETTLED_PIPES: usize = 3;
    /// Settled pipes plus the one just spawned, before eviction
    pub const PIPE_WINDOW_CAPACITY: usize = SETTLED_PIPES + 1;
}
