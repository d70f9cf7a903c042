//! Score, high score, lives and the ghost multiplier.

use crate::constants::scoring::{BASE_GHOST_MULTIPLIER, STARTING_LIVES};

/// Pure score and life bookkeeping for one session.
///
/// Side effects (text updates, persisting a new high score) belong to the owner;
/// mutators report what changed so the owner can react.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u32,
    high_score: u32,
    lives: u8,
    ghost_multiplier: u32,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            score: 0,
            high_score: 0,
            lives: STARTING_LIVES,
            ghost_multiplier: BASE_GHOST_MULTIPLIER,
        }
    }
}

impl ScoreBoard {
    /// Creates a scoreboard seeded with a previously persisted high score.
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn ghost_multiplier(&self) -> u32 {
        self.ghost_multiplier
    }

    /// Adds `points` to the score.
    ///
    /// Returns `true` if the score passed the high score, which now follows it.
    pub fn add_points(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Lifts the high score to `high_score` if it is larger. Returns `true` if it changed.
    pub fn raise_high_score(&mut self, high_score: u32) -> bool {
        if high_score > self.high_score {
            self.high_score = high_score;
            true
        } else {
            false
        }
    }

    pub fn set_lives(&mut self, lives: u8) {
        self.lives = lives;
    }

    /// Removes one life, stopping at zero, and returns what remains.
    pub fn lose_life(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Points awarded for a ghost worth `base` at the current multiplier.
    pub fn ghost_points(&self, base: u32) -> u32 {
        base.saturating_mul(self.ghost_multiplier)
    }

    pub fn increment_ghost_multiplier(&mut self) {
        self.ghost_multiplier = self.ghost_multiplier.saturating_add(1);
    }

    pub fn reset_ghost_multiplier(&mut self) {
        self.ghost_multiplier = BASE_GHOST_MULTIPLIER;
    }

    /// Resets everything but the high score.
    pub fn reset_for_new_game(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.ghost_multiplier = BASE_GHOST_MULTIPLIER;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_score_tracks_the_maximum() {
        let mut board = ScoreBoard::default();
        assert!(board.add_points(10));
        assert!(!board.add_points(0));
        assert!(board.add_points(40));
        assert_eq!(board.high_score(), 50);

        board.reset_for_new_game();
        assert_eq!(board.score(), 0);
        assert_eq!(board.high_score(), 50);

        assert!(!board.add_points(30));
        assert_eq!(board.high_score(), 50);
        assert!(board.add_points(30));
        assert_eq!(board.high_score(), 60);
    }

    #[test]
    fn seeded_high_score_is_not_beaten_by_smaller_scores() {
        let mut board = ScoreBoard::with_high_score(1000);
        assert!(!board.add_points(999));
        assert_eq!(board.high_score(), 1000);
        assert!(board.add_points(2));
        assert_eq!(board.high_score(), 1001);
    }

    #[test]
    fn raise_high_score_never_lowers() {
        let mut board = ScoreBoard::with_high_score(300);
        assert!(!board.raise_high_score(200));
        assert!(board.raise_high_score(400));
        assert_eq!(board.high_score(), 400);
    }

    #[test]
    fn lose_life_stops_at_zero() {
        let mut board = ScoreBoard::default();
        assert_eq!(board.lose_life(), 2);
        assert_eq!(board.lose_life(), 1);
        assert_eq!(board.lose_life(), 0);
        assert_eq!(board.lose_life(), 0);
    }

    #[test]
    fn ghost_multiplier_increments_and_resets() {
        let mut board = ScoreBoard::default();
        assert_eq!(board.ghost_points(200), 200);
        board.increment_ghost_multiplier();
        board.increment_ghost_multiplier();
        assert_eq!(board.ghost_multiplier(), 3);
        assert_eq!(board.ghost_points(400), 1200);
        board.reset_ghost_multiplier();
        assert_eq!(board.ghost_multiplier(), 1);
    }

    #[test]
    fn new_game_restores_starting_values() {
        let mut board = ScoreBoard::default();
        board.add_points(500);
        board.set_lives(0);
        board.increment_ghost_multiplier();

        board.reset_for_new_game();
        assert_eq!(board.score(), 0);
        assert_eq!(board.lives(), 3);
        assert_eq!(board.ghost_multiplier(), 1);
        assert_eq!(board.high_score(), 500);
    }
}
