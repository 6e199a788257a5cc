use std::f32::consts::FRAC_PI_2;

use flappy_core::persistence::{MemoryStore, save_best};
use flappy_core::sim::collision::{self, Collision};
use flappy_core::sim::{
    Bounds, GameEvent, GamePhase, GameState, PipePair, PipeWindow, TickInput, tick,
};
use flappy_core::{Config, Tuning, Viewport};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn phone_config() -> Config {
    Config::new(&Tuning::default(), Viewport::new(375.0, 667.0, 1.0)).unwrap()
}

fn ready(seed: u64) -> GameState {
    let mut state = GameState::with_seed(phone_config(), seed);
    state.mark_ready();
    state
}

/// A running game with no obstacles in play
fn playing_open_sky(seed: u64) -> GameState {
    let mut state = ready(seed);
    tick(&mut state, &TickInput::press());
    assert_eq!(state.phase, GamePhase::Playing);
    state.pipes.clear();
    state
}

fn idle() -> TickInput {
    TickInput::default()
}

proptest! {
    #[test]
    fn playing_tick_applies_gravity_exactly(seed in any::<u64>(), v in -5.0f32..5.0) {
        let mut state = playing_open_sky(seed);
        let y0 = state.config.sky_height / 2.0;
        state.bird.pos.y = y0;
        state.bird.velocity = v;
        let gravity = state.config.gravity;

        tick(&mut state, &idle());

        prop_assert_eq!(state.phase, GamePhase::Playing);
        prop_assert_eq!(state.bird.velocity, v - gravity);
        prop_assert_eq!(state.bird.pos.y, y0 - v);
    }

    #[test]
    fn spawned_gaps_leave_both_bodies_visible(
        seed in any::<u64>(),
        scale in prop::sample::select(vec![1.0f32, 1.5, 2.0, 3.0]),
        height in 600.0f32..2000.0,
    ) {
        let viewport = Viewport::new(375.0 * scale, height, scale);
        let config = Config::new(&Tuning::default(), viewport);
        prop_assume!(config.is_ok());
        let config = config.unwrap();

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut window = PipeWindow::new();
        for _ in 0..40 {
            window.spawn(&config, &mut rng);
            prop_assert!(window.len() <= 3);

            let pair = window.newest().unwrap();
            prop_assert!((pair.gap_height() - config.pipe_vertical_gap).abs() < 1e-3);
            prop_assert!(pair.gap_top >= config.min_pipe_height - 1e-3);
            prop_assert!(pair.gap_bottom <= config.sky_height - config.min_pipe_height + 1e-3);
            prop_assert_eq!(pair.x, config.pipe_spawn_x);
        }
    }

    #[test]
    fn window_and_score_stay_consistent(
        seed in any::<u64>(),
        presses in prop::collection::vec(prop::bool::weighted(0.12), 50..600),
    ) {
        let mut state = ready(seed);
        tick(&mut state, &TickInput::press());

        let mut last_score = 0;
        for press in presses {
            let result = tick(&mut state, &TickInput { press });
            prop_assert!(state.pipes.len() <= 3);

            for event in &result.events {
                if let GameEvent::Scored(score) = event {
                    prop_assert_eq!(*score, last_score + 1);
                    last_score = *score;
                }
            }
            prop_assert_eq!(state.score.score(), last_score);
            // A restart press would reset the score; stop before that
            if state.phase == GamePhase::Dead {
                break;
            }
        }
    }

    #[test]
    fn best_is_max_and_written_only_when_beaten(stored in 0u32..1000, score in 0u32..1000) {
        let mut store = MemoryStore::new(stored);
        let outcome = save_best(&mut store, score).unwrap();

        prop_assert_eq!(outcome.best, stored.max(score));
        prop_assert_eq!(outcome.is_best, score > stored);
        prop_assert_eq!(store.best(), stored.max(score));
        prop_assert_eq!(store.writes(), u32::from(score > stored));
    }
}

#[test]
fn passing_a_pipe_scores_once() {
    let mut state = playing_open_sky(7);
    let config = state.config.clone();

    // Gap centred on the bird, just ahead of it
    let upper_y = state.bird.pos.y - config.pipe_vertical_gap / 2.0 - config.pipe_height / 2.0;
    let x = state.bird.pos.x + config.scroll_speed * 2.5;
    state.pipes.admit(PipePair::new(1000, x, upper_y, &config));

    let mut scored = Vec::new();
    for _ in 0..6 {
        let result = tick(&mut state, &idle());
        assert_eq!(result.phase, GamePhase::Playing);
        scored.extend(
            result
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::Scored(_)))
                .cloned(),
        );
    }

    assert_eq!(scored, vec![GameEvent::Scored(1)]);
    assert_eq!(state.score.score(), 1);
}

#[test]
fn gap_edges_count_as_hits() {
    let config = phone_config();
    let pair = PipePair::new(0, 100.0, -100.0, &config);
    let width = config.pipe_width;
    let bird = |top: f32, bottom: f32| Bounds {
        left: 90.0,
        right: 110.0,
        top,
        bottom,
    };

    assert!(collision::hits_pipe(&bird(pair.gap_top, pair.gap_top + 20.0), &pair, width));
    assert!(collision::hits_pipe(&bird(pair.gap_bottom - 20.0, pair.gap_bottom), &pair, width));
    assert!(!collision::hits_pipe(
        &bird(pair.gap_top + 1.0, pair.gap_bottom - 1.0),
        &pair,
        width
    ));

    // Touching the ground line is still flying
    let sky = config.sky_height;
    assert!(!collision::hits_ground(&bird(sky - 30.0, sky), sky));
    assert!(collision::hits_ground(&bird(sky - 29.0, sky + 1.0), sky));
}

#[test]
fn ground_crash_is_detected() {
    let mut state = playing_open_sky(3);
    state.bird.pos.y = state.config.sky_height - state.bird.height / 2.0;
    state.bird.velocity = -1.0;

    let result = tick(&mut state, &idle());
    assert_eq!(result.phase, GamePhase::Dying);
    assert!(result.events.contains(&GameEvent::Crashed(Collision::Ground)));
    assert!(!state.bird.alive);
}

#[test]
fn dying_needs_both_spin_and_ground() {
    let mut state = playing_open_sky(9);
    state.bird.pos.y = 40.0;
    state.bird.velocity = 0.0;
    state.bird.kill();
    state.phase = GamePhase::Dying;

    let settled_y = state.config.sky_height - state.bird.height / 2.0;
    let mut spun_in_air = false;
    let mut ticks = 0;
    while state.phase == GamePhase::Dying {
        let pressed = tick(&mut state, &TickInput::press());
        assert!(!pressed.events.contains(&GameEvent::Flapped));
        ticks += 1;
        assert!(ticks < 500, "bird never settled");

        let spun = state.bird.rotation() > FRAC_PI_2;
        let grounded = state.bird.pos.y > settled_y;
        if state.phase == GamePhase::Dying {
            spun_in_air |= spun && !grounded;
        } else {
            assert!(spun && grounded);
            assert!(
                pressed
                    .events
                    .iter()
                    .any(|e| matches!(e, GameEvent::RunOver(_)))
            );
        }
    }
    assert!(spun_in_air);
    assert_eq!(state.phase, GamePhase::Dead);
}

#[test]
fn dead_is_frozen_until_restart() {
    let mut state = playing_open_sky(21);
    state.bird.pos.y = state.config.sky_height;
    state.bird.velocity = -5.0;
    for _ in 0..500 {
        if state.phase == GamePhase::Dead {
            break;
        }
        tick(&mut state, &idle());
    }
    assert_eq!(state.phase, GamePhase::Dead);

    let frozen_y = state.bird.pos.y;
    let frozen_ticks = state.time_ticks;
    let result = tick(&mut state, &idle());
    assert!(!result.advanced);
    assert_eq!(state.bird.pos.y, frozen_y);
    assert_eq!(state.time_ticks, frozen_ticks);

    let best = state.score.best();
    let result = tick(&mut state, &TickInput::press());
    assert!(result.events.contains(&GameEvent::Restarted));
    assert_eq!(state.phase, GamePhase::Idle);
    assert!(state.pipes.is_empty());
    assert_eq!(state.score.score(), 0);
    assert_eq!(state.score.best(), best);
    assert_eq!(state.bird.pos.x, state.config.bird_x);
    assert_eq!(state.bird.pos.y, state.config.bird_y);
    assert!(state.bird.alive);

    // The next press starts a fresh run with its first pipe
    let result = tick(&mut state, &TickInput::press());
    assert!(result.events.contains(&GameEvent::RunStarted));
    assert_eq!(state.pipes.len(), 1);
}

#[test]
fn pipes_are_passed_before_eviction_on_any_screen() {
    let viewports = [
        Viewport::new(375.0, 667.0, 1.0),
        Viewport::new(750.0, 1334.0, 2.0),
        Viewport::new(1024.0, 768.0, 1.0),
        Viewport::new(1920.0, 1080.0, 1.0),
        Viewport::new(2560.0, 1440.0, 1.0),
    ];
    for viewport in viewports {
        let config = Config::new(&Tuning::default(), viewport).unwrap();
        let mut state = GameState::with_seed(config, 77);
        state.mark_ready();
        tick(&mut state, &TickInput::press());

        let mut evicted_at = Vec::new();
        for _ in 0..600 {
            // Park the bird in the gap of the first pipe still in its column
            let pass_line = state.config.pass_line();
            if let Some(pair) = state.pipes.iter().find(|p| p.x >= pass_line) {
                state.bird.pos.y = (pair.gap_top + pair.gap_bottom) / 2.0;
            }
            state.bird.velocity = 0.0;

            let result = tick(&mut state, &idle());
            assert_eq!(result.phase, GamePhase::Playing, "crashed on {:?}", viewport);
            for event in &result.events {
                if let GameEvent::PipeEvicted { id } = event {
                    evicted_at.push(*id);
                }
            }
        }

        assert!(state.score.score() >= 2, "score {} on {:?}", state.score.score(), viewport);
        // Every evicted pipe was counted first
        assert!(state.score.score() as usize >= evicted_at.len(), "{:?}", viewport);
        assert!(state.pipes.iter().all(|p| p.x > state.config.pass_line() || p.scored));
    }
}
