//! Game tuning and resolution-scaled configuration
//!
//! `Tuning` holds base-unit values (what a designer edits, serializable to JSON).
//! `Config` is the immutable, viewport-resolved set the simulation reads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SETTLED_PIPES;

/// Errors raised while resolving a `Config`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("viewport {field} must be finite and positive, got {value}")]
    InvalidViewport { field: &'static str, value: f32 },
    #[error("tuning value {field} must be finite and positive, got {value}")]
    InvalidTuning { field: &'static str, value: f32 },
    #[error("ground height {ground} leaves no sky in a {height}px tall playfield")]
    NoSky { ground: f32, height: f32 },
    #[error("sky height {sky} cannot fit a {gap} gap with {min_segment} of pipe above and below")]
    NoRoomForGap { sky: f32, gap: f32, min_segment: f32 },
    #[error("pipes spawn at {spawn_x} but must scroll past {pass_line} to clear the bird")]
    NoRoomToPass { pass_line: f32, spawn_x: f32 },
    #[error("tuning JSON is invalid: {0}")]
    Parse(String),
}

/// Screen metrics supplied by the host once assets are loaded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Playfield width in pixels
    pub width: f32,
    /// Playfield height in pixels
    pub height: f32,
    /// Device pixel ratio (the base unit every length is multiplied by)
    pub scale: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }
}

/// Base-unit tunables, before scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Bird ===
    /// Velocity set by a flap (and at reset)
    pub flap_velocity: f32,
    /// Velocity lost per tick
    pub gravity: f32,
    pub bird_x: f32,
    pub bird_y: f32,
    pub bird_width: f32,
    pub bird_height: f32,

    // === Pipes ===
    pub pipe_width: f32,
    /// Full body height of one pipe segment
    pub pipe_height: f32,
    /// Minimum visible body kept above and below the gap
    pub min_pipe_height: f32,
    pub pipe_vertical_gap: f32,
    /// Where new pipes appear (clamped to at least one pipe beyond the right edge)
    pub pipe_spawn_x: f32,
    /// Unscaled margin subtracted from the right edge to get the spawn threshold
    pub spawn_margin: f32,

    // === World ===
    pub ground_height: f32,
    /// Horizontal scroll per tick (unscaled)
    pub scroll_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            flap_velocity: 8.0,
            gravity: 0.4,
            bird_x: 100.0,
            bird_y: 200.0,
            bird_width: 60.0,
            bird_height: 48.0,

            pipe_width: 80.0,
            pipe_height: 500.0,
            min_pipe_height: 50.0,
            pipe_vertical_gap: 190.0,
            pipe_spawn_x: 600.0,
            spawn_margin: 100.0,

            ground_height: 100.0,
            scroll_speed: 10.0,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("flap_velocity", self.flap_velocity),
            ("gravity", self.gravity),
            ("bird_x", self.bird_x),
            ("bird_y", self.bird_y),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("pipe_width", self.pipe_width),
            ("pipe_height", self.pipe_height),
            ("min_pipe_height", self.min_pipe_height),
            ("pipe_vertical_gap", self.pipe_vertical_gap),
            ("pipe_spawn_x", self.pipe_spawn_x),
            ("spawn_margin", self.spawn_margin),
            ("ground_height", self.ground_height),
            ("scroll_speed", self.scroll_speed),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }
        Ok(())
    }
}

/// Resolved per-session configuration (never mutated after construction)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub scale: f32,
    pub width: f32,
    pub height: f32,
    /// Top of the ground strip; everything above is sky
    pub sky_height: f32,
    pub ground_height: f32,

    pub flap_velocity: f32,
    pub gravity: f32,
    pub bird_x: f32,
    pub bird_y: f32,
    pub bird_width: f32,
    pub bird_height: f32,

    pub pipe_width: f32,
    pub pipe_height: f32,
    pub min_pipe_height: f32,
    pub pipe_vertical_gap: f32,
    pub pipe_spawn_x: f32,
    /// A new pipe is admitted once the newest one scrolls to or past this x
    pub spawn_threshold: f32,

    pub scroll_speed: f32,
}

impl Config {
    /// Scale `tuning` to `viewport` and check that obstacle bounds are computable
    pub fn new(tuning: &Tuning, viewport: Viewport) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("width", viewport.width),
            ("height", viewport.height),
            ("scale", viewport.scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidViewport { field, value });
            }
        }
        tuning.validate()?;

        let s = viewport.scale;
        let ground_height = tuning.ground_height * s;
        let sky_height = viewport.height - ground_height;
        if sky_height <= 0.0 {
            return Err(ConfigError::NoSky {
                ground: ground_height,
                height: viewport.height,
            });
        }

        let pipe_width = tuning.pipe_width * s;
        let min_pipe_height = tuning.min_pipe_height * s;
        let pipe_vertical_gap = tuning.pipe_vertical_gap * s;
        if sky_height < 2.0 * min_pipe_height + pipe_vertical_gap {
            return Err(ConfigError::NoRoomForGap {
                sky: sky_height,
                gap: pipe_vertical_gap,
                min_segment: min_pipe_height,
            });
        }

        // Wide screens would otherwise spawn pipes already past the threshold
        let pipe_spawn_x = (tuning.pipe_spawn_x * s).max(viewport.width + pipe_width);

        // When a spawn evicts the oldest settled pipe it sits (SETTLED_PIPES - 1)
        // spacings behind the threshold, and must already be clear of the bird
        let bird_x = tuning.bird_x * s;
        let bird_width = tuning.bird_width * s;
        let pass_line = bird_x - bird_width / 2.0 - pipe_width / 2.0;
        if pass_line >= pipe_spawn_x {
            return Err(ConfigError::NoRoomToPass {
                pass_line,
                spawn_x: pipe_spawn_x,
            });
        }
        let settled = SETTLED_PIPES as f32;
        let latest_threshold = (pass_line + (settled - 1.0) * pipe_spawn_x) / settled;
        let spawn_threshold =
            (viewport.width - pipe_width - tuning.spawn_margin).min(latest_threshold);

        let config = Self {
            scale: s,
            width: viewport.width,
            height: viewport.height,
            sky_height,
            ground_height,

            flap_velocity: tuning.flap_velocity * s,
            gravity: tuning.gravity * s,
            bird_x,
            bird_y: tuning.bird_y * s,
            bird_width,
            bird_height: tuning.bird_height * s,

            pipe_width,
            pipe_height: tuning.pipe_height * s,
            min_pipe_height,
            pipe_vertical_gap,
            pipe_spawn_x,
            spawn_threshold,

            scroll_speed: tuning.scroll_speed,
        };
        log::debug!(
            "Config resolved: {}x{} @{} sky={} spawn_x={} threshold={}",
            config.width,
            config.height,
            config.scale,
            config.sky_height,
            config.pipe_spawn_x,
            config.spawn_threshold
        );
        Ok(config)
    }

    /// Lowest (most negative) y the upper pipe centre may take
    pub fn min_pipe_y(&self) -> f32 {
        -(self.pipe_height / 2.0 - self.min_pipe_height)
    }

    /// A pipe left of this x no longer overlaps the bird's column
    pub fn pass_line(&self) -> f32 {
        self.bird_x - self.bird_width / 2.0 - self.pipe_width / 2.0
    }

    /// Highest y the upper pipe centre may take
    pub fn max_pipe_y(&self) -> f32 {
        self.sky_height - self.min_pipe_height - self.pipe_vertical_gap - self.pipe_height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> Viewport {
        Viewport::new(375.0, 667.0, 1.0)
    }

    #[test]
    fn test_defaults_resolve() {
        let config = Config::new(&Tuning::default(), phone()).unwrap();
        assert_eq!(config.sky_height, 567.0);
        assert_eq!(config.spawn_threshold, 375.0 - 80.0 - 100.0);
        assert_eq!(config.pipe_spawn_x, 600.0);
        assert!(config.min_pipe_y() <= config.max_pipe_y());
    }

    #[test]
    fn test_lengths_scale_but_speed_does_not() {
        let config = Config::new(&Tuning::default(), Viewport::new(750.0, 1334.0, 2.0)).unwrap();
        assert_eq!(config.pipe_width, 160.0);
        assert_eq!(config.flap_velocity, 16.0);
        assert_eq!(config.bird_x, 200.0);
        assert_eq!(config.scroll_speed, 10.0);
    }

    #[test]
    fn test_spawn_x_is_past_right_edge() {
        let config = Config::new(&Tuning::default(), Viewport::new(1920.0, 1080.0, 1.0)).unwrap();
        assert!(config.pipe_spawn_x > config.width);
        assert!(config.pipe_spawn_x > config.spawn_threshold);
    }

    #[test]
    fn test_landscape_spacing_clears_bird_before_eviction() {
        let config = Config::new(&Tuning::default(), Viewport::new(1024.0, 768.0, 1.0)).unwrap();
        assert_eq!(config.pipe_spawn_x, 1104.0);
        // 844 from the right-edge margin is too close to spawn x; pulled back
        assert_eq!(config.spawn_threshold, 746.0);

        let spacing = config.pipe_spawn_x - config.spawn_threshold;
        let oldest_at_eviction = config.spawn_threshold - 2.0 * spacing;
        assert!(oldest_at_eviction <= config.pass_line());
        assert!(oldest_at_eviction < config.bird_x);
    }

    #[test]
    fn test_portrait_threshold_unchanged() {
        let config = Config::new(&Tuning::default(), Viewport::new(750.0, 1334.0, 2.0)).unwrap();
        assert_eq!(config.spawn_threshold, 750.0 - 160.0 - 100.0);
    }

    #[test]
    fn test_bird_beyond_spawn_rejected() {
        let tuning = Tuning {
            bird_x: 2000.0,
            ..Default::default()
        };
        let err = Config::new(&tuning, phone()).unwrap_err();
        assert!(matches!(err, ConfigError::NoRoomToPass { .. }));
    }

    #[test]
    fn test_invalid_viewport_rejected() {
        let err = Config::new(&Tuning::default(), Viewport::new(0.0, 667.0, 1.0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidViewport { field: "width", .. }));

        let err = Config::new(&Tuning::default(), Viewport::new(375.0, 667.0, f32::NAN));
        assert!(matches!(err, Err(ConfigError::InvalidViewport { field: "scale", .. })));
    }

    #[test]
    fn test_short_screen_has_no_room_for_gap() {
        let err = Config::new(&Tuning::default(), Viewport::new(375.0, 300.0, 1.0)).unwrap_err();
        assert!(matches!(err, ConfigError::NoRoomForGap { .. }));

        let err = Config::new(&Tuning::default(), Viewport::new(375.0, 90.0, 1.0)).unwrap_err();
        assert!(matches!(err, ConfigError::NoSky { .. }));
    }

    #[test]
    fn test_tuning_json_overrides_and_defaults() {
        let tuning = Tuning::from_json(r#"{ "pipe_vertical_gap": 180.0 }"#).unwrap();
        assert_eq!(tuning.pipe_vertical_gap, 180.0);
        assert_eq!(tuning.gravity, Tuning::default().gravity);

        assert!(matches!(Tuning::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_negative_tuning_rejected() {
        let tuning = Tuning {
            gravity: -1.0,
            ..Default::default()
        };
        let err = Config::new(&tuning, phone()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTuning {
                field: "gravity",
                value: -1.0
            }
        );
    }
}
