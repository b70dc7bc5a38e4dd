//! Session statistics
//!
//! Score, level and lives for the current game plus the running high score,
//! which survives resets for the lifetime of the process (never persisted).

use serde::{Deserialize, Serialize};

/// Counters tracked for a game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Lives remaining (never negative)
    pub lives_left: u32,
    /// Current score
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Best score seen in this process
    high_score: u64,
}

impl GameStats {
    pub fn new(ship_limit: u32) -> Self {
        Self {
            lives_left: ship_limit,
            score: 0,
            level: 1,
            high_score: 0,
        }
    }

    /// Reset per-game counters (high score is kept)
    pub fn reset(&mut self, ship_limit: u32) {
        self.lives_left = ship_limit;
        self.score = 0;
        self.level = 1;
    }

    #[inline]
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Add points and raise the high score if it was beaten
    ///
    /// Returns true if a new high score was set.
    pub fn add_points(&mut self, points: u64) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            return true;
        }
        false
    }

    /// Take one life away, returning how many are left
    pub fn lose_life(&mut self) -> u32 {
        self.lives_left = self.lives_left.saturating_sub(1);
        self.lives_left
    }

    pub fn advance_level(&mut self) {
        self.level = self.level.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats() {
        let stats = GameStats::new(3);
        assert_eq!(stats.lives_left, 3);
        assert_eq!(stats.score, 0);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.high_score(), 0);
    }

    #[test]
    fn test_high_score_follows_score() {
        let mut stats = GameStats::new(3);
        assert!(stats.add_points(100));
        assert_eq!(stats.high_score(), 100);

        stats.reset(3);
        assert_eq!(stats.score, 0);
        assert_eq!(stats.high_score(), 100);

        // Below the record: no change
        assert!(!stats.add_points(50));
        assert_eq!(stats.high_score(), 100);

        assert!(stats.add_points(100));
        assert_eq!(stats.high_score(), 150);
    }

    #[test]
    fn test_zero_points_is_not_a_record() {
        let mut stats = GameStats::new(3);
        assert!(!stats.add_points(0));
        assert_eq!(stats.high_score(), 0);
    }

    #[test]
    fn test_lives_saturate_at_zero() {
        let mut stats = GameStats::new(1);
        assert_eq!(stats.lose_life(), 0);
        assert_eq!(stats.lose_life(), 0);
        assert_eq!(stats.lives_left, 0);
    }

    #[test]
    fn test_score_saturates() {
        let mut stats = GameStats::new(1);
        stats.score = u64::MAX - 1;
        stats.add_points(10);
        assert_eq!(stats.score, u64::MAX);
    }
}
