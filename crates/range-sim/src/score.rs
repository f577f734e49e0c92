//! ScoreBoard: accumulates points reported by destroyed targets.
//!
//! Held by the engine and passed by `&mut` to the systems that award points,
//! so there is exactly one board per engine and no global lookup.

use range_core::error::RangeError;
use range_core::state::ScoreView;

#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    total_score: i64,
    targets_destroyed: u32,
    targets_expired: u32,
    shots_fired: u32,
}

impl ScoreBoard {
    /// Add `points` to the total. Negative increments are rejected and leave
    /// the board unchanged, so the total never decreases within a session.
    pub fn add_score(&mut self, points: i64) -> Result<i64, RangeError> {
        if points < 0 {
            return Err(RangeError::NegativePoints { points });
        }
        self.total_score = self.total_score.saturating_add(points);
        Ok(self.total_score)
    }

    /// Zero everything. Called once per session start.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total(&self) -> i64 {
        self.total_score
    }

    pub fn targets_destroyed(&self) -> u32 {
        self.targets_destroyed
    }

    pub fn targets_expired(&self) -> u32 {
        self.targets_expired
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    pub(crate) fn record_destroyed(&mut self) {
        self.targets_destroyed += 1;
    }

    pub(crate) fn record_expired(&mut self) {
        self.targets_expired += 1;
    }

    pub(crate) fn record_shot(&mut self) {
        self.shots_fired += 1;
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            total_score: self.total_score,
            targets_destroyed: self.targets_destroyed,
            targets_expired: self.targets_expired,
            shots_fired: self.shots_fired,
        }
    }
}
