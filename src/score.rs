//! Score sink
//!
//! Passive accumulator credited by the collision passes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Running score of a game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCounter {
    score: i32,
}

impl ScoreCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self { score: 0 }
    }

    /// Current score
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Add (or subtract) an amount
    pub fn update_score(&mut self, amount: i32) {
        self.score = self.score.saturating_add(amount);
    }
}

impl fmt::Display for ScoreCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.score)
    }
}
