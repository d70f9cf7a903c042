//! This module contains all the tunable constants used by the round controller.

use std::time::Duration;

/// The fixed simulation step used by the run loop.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Timings for the round choreography.
pub mod timing {
    use std::time::Duration;

    /// Pre-round countdown before gameplay input is accepted.
    pub const COUNTDOWN: Duration = Duration::from_secs(4);
    /// Delay before the game theme starts after a new game begins.
    pub const THEME_DELAY: Duration = Duration::from_millis(4200);
    /// Delay between a death and either the actor reset or game over.
    pub const DEATH_DELAY: Duration = Duration::from_secs(3);
    /// Delay between clearing the board and the next round.
    pub const ROUND_CLEAR_DELAY: Duration = Duration::from_secs(3);
    /// Delay before the round-over jingle plays after the last pellet.
    pub const OVER_SOUND_DELAY: Duration = Duration::from_secs(3);
}

/// Scoring and life rules.
pub mod scoring {
    /// Lives at the start of every game.
    pub const STARTING_LIVES: u8 = 3;
    /// The ghost multiplier's resting value.
    pub const BASE_GHOST_MULTIPLIER: u32 = 1;
    /// Minimum digits shown for the score text.
    pub const SCORE_TEXT_WIDTH: usize = 2;
}

/// Environment variable overriding where the demo keeps its high score.
pub const HIGH_SCORE_PATH_ENV: &str = "PACMAN_HIGH_SCORE_PATH";
/// Default high score file name, relative to the working directory.
pub const DEFAULT_HIGH_SCORE_FILE: &str = "pacman-highscore.txt";
