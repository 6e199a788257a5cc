//! Pipe pairs and the rolling pipe window
//!
//! Pipes are generated on demand as the newest one scrolls past the spawn
//! threshold, and the oldest is dropped once more than `SETTLED_PIPES` are live.

use std::collections::VecDeque;

use rand::Rng;

use crate::config::Config;
use crate::consts::{PIPE_WINDOW_CAPACITY, SETTLED_PIPES};

/// An upper/lower pipe sharing one x and one gap
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    pub id: u32,
    /// Horizontal centre of both segments
    pub x: f32,
    /// Vertical centre of the upper segment (drawn flipped)
    pub upper_y: f32,
    /// Vertical centre of the lower segment
    pub lower_y: f32,
    /// Top edge of the passable band (bottom of the upper pipe body)
    pub gap_top: f32,
    /// Bottom edge of the passable band (top of the lower pipe body)
    pub gap_bottom: f32,
    /// Already counted toward the score
    pub scored: bool,
}

impl PipePair {
    /// Place a pair at `x` with its upper pipe centred at `upper_y`.
    ///
    /// `upper_y` outside the legal range is a caller bug; release builds clamp it.
    pub fn new(id: u32, x: f32, upper_y: f32, config: &Config) -> Self {
        let (min, max) = (config.min_pipe_y(), config.max_pipe_y());
        debug_assert!(
            (min..=max).contains(&upper_y),
            "upper pipe y {upper_y} outside [{min}, {max}]"
        );
        let upper_y = upper_y.clamp(min, max);

        let gap_top = upper_y + config.pipe_height / 2.0;
        Self {
            id,
            x,
            upper_y,
            lower_y: config.pipe_height + upper_y + config.pipe_vertical_gap,
            gap_top,
            gap_bottom: gap_top + config.pipe_vertical_gap,
            scored: false,
        }
    }

    /// Pick a random height and place a pair at the spawn x
    pub fn spawn<R: Rng>(id: u32, config: &Config, rng: &mut R) -> Self {
        let (min, max) = (config.min_pipe_y(), config.max_pipe_y());
        // Whole-pixel heights, pulled back inside the range if flooring left it
        let upper_y = rng.random_range(min..=max).floor().clamp(min, max);
        Self::new(id, config.pipe_spawn_x, upper_y, config)
    }

    pub fn gap_height(&self) -> f32 {
        self.gap_bottom - self.gap_top
    }
}

/// Bounded FIFO of live pipe pairs, oldest first
#[derive(Debug, Clone)]
pub struct PipeWindow {
    pairs: VecDeque<PipePair>,
    next_id: u32,
}

impl Default for PipeWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl PipeWindow {
    pub fn new() -> Self {
        Self {
            pairs: VecDeque::with_capacity(PIPE_WINDOW_CAPACITY),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PipePair> {
        self.pairs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PipePair> {
        self.pairs.iter_mut()
    }

    /// Most recently spawned pair
    pub fn newest(&self) -> Option<&PipePair> {
        self.pairs.back()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Spawn a pair at the right edge. Returns the pair evicted to make room, if any.
    pub fn spawn<R: Rng>(&mut self, config: &Config, rng: &mut R) -> Option<PipePair> {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        let pair = PipePair::spawn(id, config, rng);
        log::debug!(
            "Spawned pipe {} at x={} gap=[{}, {}]",
            pair.id,
            pair.x,
            pair.gap_top,
            pair.gap_bottom
        );
        self.admit(pair)
    }

    /// Append `pair`, dropping the oldest once more than `SETTLED_PIPES` are held
    pub fn admit(&mut self, pair: PipePair) -> Option<PipePair> {
        self.pairs.push_back(pair);
        debug_assert!(self.pairs.len() <= PIPE_WINDOW_CAPACITY);
        let mut evicted = None;
        while self.pairs.len() > SETTLED_PIPES {
            evicted = self.pairs.pop_front();
        }
        evicted
    }

    /// Scroll every pair left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for pair in &mut self.pairs {
            pair.x -= speed;
        }
    }

    /// True once the newest pair has scrolled to the spawn threshold
    pub fn needs_spawn(&self, config: &Config) -> bool {
        self.newest()
            .is_some_and(|pair| pair.x <= config.spawn_threshold)
    }
}
