//! Run score and session best

use serde::{Deserialize, Serialize};

/// Result of a finished run, handed to the best-score saver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub score: u32,
    /// Best after this run (`max(previous best, score)`)
    pub best: u32,
    /// This run beat the previous best
    pub is_best: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    best: u32,
}

impl ScoreTracker {
    /// Start a session with the best score read from storage
    pub fn with_best(best: u32) -> Self {
        Self { score: 0, best }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// A pipe was passed
    pub fn on_passed(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    pub fn on_restart(&mut self) {
        self.score = 0;
    }

    /// Fold the finished run into the best score
    pub fn settle(&mut self) -> RunOutcome {
        let is_best = self.score > self.best;
        if is_best {
            self.best = self.score;
        }
        RunOutcome {
            score: self.score,
            best: self.best,
            is_best,
        }
    }
}
