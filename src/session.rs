//! The top-level owner of a play session.

use std::time::Duration;

use tracing::{info, warn};

use crate::events::RoundEvent;
use crate::round::{Collaborators, RoundConfig, RoundController, RoundPhase};
use crate::scoreboard::ScoreBoard;
use crate::stage::{Ghost, Pellet, PowerPellet};

/// Wires the scoreboard, scheduler and round controller together.
///
/// The process entry point builds one session and hands it (or a reference to it)
/// to whatever reports events; there is no global instance.
pub struct GameSession {
    round: RoundController,
}

impl GameSession {
    pub fn new(config: RoundConfig, ports: Collaborators) -> Self {
        Self {
            round: RoundController::new(config, ports),
        }
    }

    /// Loads the persisted high score and starts the first game.
    pub fn start(&mut self) {
        match self.round.load_high_score() {
            Ok(high_score) => info!(high_score, "High score loaded"),
            Err(error) => warn!(%error, "Could not load high score, starting from zero"),
        }
        self.round.new_game();
    }

    /// Restarts after a game over once any key is pressed.
    pub fn tick(&mut self, any_key_pressed: bool) {
        if self.round.scoreboard().lives() == 0 && any_key_pressed {
            info!("Key pressed after game over, restarting");
            self.round.new_game();
        }
    }

    /// Advances timers by `dt`, runs whatever came due, then handles input.
    pub fn step(&mut self, dt: Duration, any_key_pressed: bool) {
        self.round.advance(dt);
        self.tick(any_key_pressed);
    }

    pub fn handle(&mut self, event: RoundEvent) {
        self.round.handle(event);
    }

    pub fn new_game(&mut self) {
        self.round.new_game();
    }

    pub fn countdown_completed(&mut self) {
        self.round.countdown_completed();
    }

    pub fn pellet_eaten(&mut self, pellet: Pellet) {
        self.round.pellet_eaten(pellet);
    }

    pub fn power_pellet_eaten(&mut self, pellet: PowerPellet) {
        self.round.power_pellet_eaten(pellet);
    }

    pub fn ghost_eaten(&mut self, ghost: Ghost) {
        self.round.ghost_eaten(ghost);
    }

    pub fn player_caught(&mut self) {
        self.round.player_caught();
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn scoreboard(&self) -> &ScoreBoard {
        self.round.scoreboard()
    }

    pub fn round(&self) -> &RoundController {
        &self.round
    }
}
