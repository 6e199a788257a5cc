//! Flappy Core entry point
//!
//! Native builds run a headless session with an autopilot pressing for the
//! player; the browser build is driven from JS through `flappy_core::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy_core::consts::SIM_DT;
    use flappy_core::persistence::JsonFileStore;
    use flappy_core::platform::{AssetGate, InputSignal};
    use flappy_core::sim::{GameEvent, GamePhase, GameState};
    use flappy_core::{Session, Tuning, Viewport};

    use std::path::PathBuf;

    /// Used when neither the override nor a platform data directory is available
    const FALLBACK_BEST_PATH: &str = "hiscore.json";
    /// Stop after this many frames even if runs are left
    const MAX_FRAMES: u32 = 200_000;

    /// Flap when the bird sinks below the middle of the next gap
    fn should_flap(state: &GameState) -> bool {
        if state.phase != GamePhase::Playing {
            return false;
        }
        let bird = &state.bird;
        let target = state
            .pipes
            .iter()
            .find(|p| p.x >= state.config.pass_line())
            .map(|p| (p.gap_top + p.gap_bottom) / 2.0)
            .unwrap_or(state.config.sky_height / 2.0);
        bird.velocity < 0.0 && bird.pos.y > target
    }

    pub fn run() {
        env_logger::init();
        log::info!("Flappy Core (native, headless) starting...");

        let best_path = match std::env::var_os("FLAPPY_BEST_PATH") {
            Some(path) => PathBuf::from(path),
            None => JsonFileStore::default_path().unwrap_or_else(|| {
                log::warn!(
                    "No data directory for this platform, saving best score to ./{}",
                    FALLBACK_BEST_PATH
                );
                PathBuf::from(FALLBACK_BEST_PATH)
            }),
        };
        let store = JsonFileStore::new(best_path);
        log::info!("Best score file: {}", store.path().display());
        let runs: u32 = std::env::var("FLAPPY_RUNS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        // A phone-sized portrait screen at 2x
        let gate = AssetGate::resolved(Viewport::new(750.0, 1334.0, 2.0));
        let mut session = Session::new(Tuning::default(), gate).with_store(store);

        let mut finished = 0;
        let mut frames = 0;
        while finished < runs && frames < MAX_FRAMES {
            frames += 1;
            match session.phase() {
                Some(GamePhase::Idle) | Some(GamePhase::Dead) => session.signal(InputSignal::Press),
                Some(_) => {
                    if session.state().is_some_and(should_flap) {
                        session.signal(InputSignal::Press);
                    }
                }
                None => {}
            }

            for event in session.update(SIM_DT) {
                match event {
                    GameEvent::Scored(score) => log::debug!("Score {}", score),
                    GameEvent::RunOver(outcome) => {
                        finished += 1;
                        println!(
                            "Run {}: score {} (best {}{})",
                            finished,
                            outcome.score,
                            outcome.best,
                            if outcome.is_best { ", new best" } else { "" }
                        );
                    }
                    _ => {}
                }
            }

            if let Some(e) = session.error() {
                eprintln!("Cannot start: {}", e);
                return;
            }
        }

        session.shutdown();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is flappy_core::web, this is just to satisfy the compiler
}
