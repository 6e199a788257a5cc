//! Simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per frame signal, no wall-clock time
//! - No rendering, storage or platform dependencies
//! - Pipe heights are the only randomness

pub mod bird;
pub mod collision;
pub mod pipes;
pub mod score;
pub mod state;
pub mod tick;
pub mod view;

pub use bird::{Bird, Bounds};
pub use collision::Collision;
pub use pipes::{PipePair, PipeWindow};
pub use score::{RunOutcome, ScoreTracker};
pub use state::{GamePhase, GameState};
pub use tick::{GameEvent, TickInput, TickResult, tick};
pub use view::{BirdPose, PipeSprite, SceneView};
