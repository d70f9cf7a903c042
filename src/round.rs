//! The round state machine.
//!
//! [`RoundController`] owns the [`ScoreBoard`] and every pending timer. It reacts to
//! domain events (pellets, ghosts, deaths, the countdown), schedules the delayed
//! transitions between phases, and issues commands to the presentation, audio,
//! persistence and stage collaborators. Collaborators never call back into it;
//! everything flows in through the event methods and [`RoundController::advance`].

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::audio::{AudioSink, Sound};
use crate::constants::timing;
use crate::error::GameResult;
use crate::events::RoundEvent;
use crate::hud::{format_lives, format_score, Presentation};
use crate::scheduler::{TimedEventScheduler, TimerHandle};
use crate::scoreboard::ScoreBoard;
use crate::stage::{Ghost, Pellet, PowerPellet, Stage};
use crate::store::HighScoreStore;

/// The high-level phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    /// The pre-round countdown is running.
    Starting,
    /// Normal play.
    Active,
    /// Pac-Man was caught; the death sequence and its delay are running.
    PlayerCaught,
    /// The board was cleared; waiting for the next round.
    RoundCleared,
    /// No lives remain. Any key starts a new game.
    GameOver,
}

/// Callbacks the controller schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundAction {
    CountdownElapsed,
    NewRound,
    ResetState,
    GameOver,
    ResetGhostMultiplier,
}

impl RoundAction {
    /// Whether firing this action moves the round to another phase.
    pub fn is_phase_transition(self) -> bool {
        !matches!(self, RoundAction::ResetGhostMultiplier)
    }
}

/// Runtime tunables for the round choreography.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundConfig {
    pub countdown: Duration,
    pub theme_delay: Duration,
    pub death_delay: Duration,
    pub round_clear_delay: Duration,
    pub over_sound_delay: Duration,
    /// When set, a power pellet cancels every pending timer, including a pending
    /// new round, actor reset or game over. When cleared, only a stale
    /// multiplier reset is cancelled.
    pub power_pellet_cancels_transitions: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            countdown: timing::COUNTDOWN,
            theme_delay: timing::THEME_DELAY,
            death_delay: timing::DEATH_DELAY,
            round_clear_delay: timing::ROUND_CLEAR_DELAY,
            over_sound_delay: timing::OVER_SOUND_DELAY,
            power_pellet_cancels_transitions: true,
        }
    }
}

/// The external collaborators the controller issues commands to.
pub struct Collaborators {
    pub presentation: Box<dyn Presentation>,
    pub audio: Box<dyn AudioSink>,
    pub store: Box<dyn HighScoreStore>,
    pub stage: Box<dyn Stage>,
}

impl Collaborators {
    pub fn new(
        presentation: impl Presentation + 'static,
        audio: impl AudioSink + 'static,
        store: impl HighScoreStore + 'static,
        stage: impl Stage + 'static,
    ) -> Self {
        Self {
            presentation: Box::new(presentation),
            audio: Box::new(audio),
            store: Box::new(store),
            stage: Box::new(stage),
        }
    }
}

pub struct RoundController {
    phase: RoundPhase,
    scores: ScoreBoard,
    timers: TimedEventScheduler<RoundAction>,
    /// The internal countdown, while it is still pending.
    countdown: Option<TimerHandle>,
    config: RoundConfig,
    ports: Collaborators,
}

impl RoundController {
    /// Creates a controller in the [`RoundPhase::GameOver`] phase; call [`Self::new_game`] to begin.
    pub fn new(config: RoundConfig, ports: Collaborators) -> Self {
        Self {
            phase: RoundPhase::GameOver,
            scores: ScoreBoard::default(),
            timers: TimedEventScheduler::new(),
            countdown: None,
            config,
            ports,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn stage(&self) -> &dyn Stage {
        self.ports.stage.as_ref()
    }

    /// Pending timed actions with the time left until each fires, in no particular order.
    pub fn pending_actions(&self) -> impl Iterator<Item = (RoundAction, Duration)> + '_ {
        self.timers.pending().map(|(action, remaining)| (*action, remaining))
    }

    /// Seeds the high score from the store, keeping the larger of the stored and current values.
    pub fn load_high_score(&mut self) -> GameResult<u32> {
        let stored = self.ports.store.load()?;
        self.scores.raise_high_score(stored);
        self.ports
            .presentation
            .set_high_score_text(&format_score(self.scores.high_score()));
        Ok(self.scores.high_score())
    }

    /// Routes an event to the matching handler.
    pub fn handle(&mut self, event: RoundEvent) {
        match event {
            RoundEvent::PelletEaten(pellet) => self.pellet_eaten(pellet),
            RoundEvent::PowerPelletEaten(pellet) => self.power_pellet_eaten(pellet),
            RoundEvent::GhostEaten(ghost) => self.ghost_eaten(ghost),
            RoundEvent::PlayerCaught => self.player_caught(),
            RoundEvent::CountdownCompleted => self.countdown_completed(),
            RoundEvent::NewGame => self.new_game(),
        }
    }

    /// Starts a fresh game, superseding anything still pending from the last one.
    pub fn new_game(&mut self) {
        let superseded = self.timers.cancel_all();
        info!(superseded, "Starting new game");

        self.ports.presentation.set_game_over_visible(false);

        self.countdown = Some(self.timers.schedule(RoundAction::CountdownElapsed, self.config.countdown));
        self.ports
            .audio
            .play_after_delay(Sound::GameTheme, self.config.theme_delay);

        self.scores.reset_for_new_game();
        self.ports.presentation.set_score_text(&format_score(self.scores.score()));
        self.ports
            .presentation
            .set_high_score_text(&format_score(self.scores.high_score()));
        self.refresh_lives_text();

        self.ports.stage.activate_all_pellets();
        self.reset_actors();

        self.set_phase(RoundPhase::Starting);
    }

    /// Ends the countdown. Ignored outside [`RoundPhase::Starting`].
    pub fn countdown_completed(&mut self) {
        if self.phase != RoundPhase::Starting {
            debug!(phase = ?self.phase, "Countdown completion ignored outside of Starting");
            return;
        }
        if let Some(handle) = self.countdown.take() {
            if self.timers.cancel(handle) {
                trace!("Internal countdown superseded");
            }
        }
        self.set_phase(RoundPhase::Active);
    }

    pub fn pellet_eaten(&mut self, pellet: Pellet) {
        if !self.pickups_allowed("pellet") {
            return;
        }
        if !self.ports.stage.pellet_active(pellet.id) {
            warn!(pellet = ?pellet.id, "Ignoring inactive pellet reported as eaten");
            return;
        }
        self.consume_pellet(pellet);
    }

    pub fn power_pellet_eaten(&mut self, power: PowerPellet) {
        if !self.pickups_allowed("power_pellet") {
            return;
        }
        if !self.ports.stage.pellet_active(power.pellet.id) {
            warn!(pellet = ?power.pellet.id, "Ignoring inactive power pellet reported as eaten");
            return;
        }

        let duration = Duration::try_from_secs_f32(power.duration).unwrap_or_else(|error| {
            warn!(duration = power.duration, %error, "Invalid frightened duration, using zero");
            Duration::ZERO
        });

        for ghost in self.ports.stage.ghosts() {
            self.ports.stage.enable_frightened(ghost, duration);
        }

        self.ports.audio.stop(Sound::GameTheme);
        self.ports.audio.play_immediate(Sound::PowerPellet);

        self.consume_pellet(power.pellet);
        self.cancel_for_power_pellet();
        self.timers.schedule(RoundAction::ResetGhostMultiplier, duration);
        debug!(?duration, "Ghosts frightened");
    }

    pub fn ghost_eaten(&mut self, ghost: Ghost) {
        if !self.pickups_allowed("ghost") {
            return;
        }
        if !self.ports.stage.ghost_frightened(ghost.id) {
            warn!(ghost = ?ghost.id, "Ignoring ghost that is not frightened reported as eaten");
            return;
        }

        self.ports.audio.play_one_shot(Sound::GhostEaten);

        let points = self.scores.ghost_points(ghost.points);
        debug!(
            ghost = ?ghost.id,
            multiplier = self.scores.ghost_multiplier(),
            points,
            "Ghost eaten"
        );
        self.add_points(points);
        self.scores.increment_ghost_multiplier();
    }

    pub fn player_caught(&mut self) {
        if self.phase != RoundPhase::Active {
            warn!(phase = ?self.phase, "Ignoring player caught outside of active play");
            return;
        }

        self.ports.stage.pacman_death_sequence();

        let lives = self.scores.lose_life();
        self.refresh_lives_text();

        let next = if lives > 0 {
            RoundAction::ResetState
        } else {
            RoundAction::GameOver
        };
        info!(remaining_lives = lives, ?next, "Player caught");
        self.timers.schedule(next, self.config.death_delay);

        self.set_phase(RoundPhase::PlayerCaught);
    }

    /// Advances the round clock by `dt` and runs every action that came due.
    ///
    /// Returns how many actions ran.
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.timers.advance(dt);

        let mut fired = 0;
        while let Some(action) = self.timers.pop_due() {
            fired += 1;
            self.run(action);
        }
        fired
    }

    fn run(&mut self, action: RoundAction) {
        trace!(?action, now = ?self.timers.now(), "Timed action fired");
        match action {
            RoundAction::CountdownElapsed => self.countdown_completed(),
            RoundAction::NewRound => {
                if !self.expect_phase(action, RoundPhase::RoundCleared) {
                    return;
                }
                info!("Starting next round");
                self.ports.stage.activate_all_pellets();
                self.reset_actors();
                self.set_phase(RoundPhase::Active);
            }
            RoundAction::ResetState => {
                if !self.expect_phase(action, RoundPhase::PlayerCaught) {
                    return;
                }
                self.reset_actors();
                self.set_phase(RoundPhase::Active);
            }
            RoundAction::GameOver => {
                if !self.expect_phase(action, RoundPhase::PlayerCaught) {
                    return;
                }
                info!(score = self.scores.score(), high_score = self.scores.high_score(), "Game over");
                self.ports.presentation.set_game_over_visible(true);
                self.ports.audio.stop(Sound::GameTheme);
                self.ports.audio.stop(Sound::PowerPellet);

                for ghost in self.ports.stage.ghosts() {
                    self.ports.stage.set_ghost_active(ghost, false);
                }
                self.ports.stage.set_pacman_active(false);

                self.set_phase(RoundPhase::GameOver);
            }
            RoundAction::ResetGhostMultiplier => {
                self.scores.reset_ghost_multiplier();
                self.ports.audio.stop(Sound::PowerPellet);
                // A finished game stays silent until the next one starts.
                if self.phase == RoundPhase::GameOver {
                    debug!("Frightened window ended after game over, theme stays off");
                } else {
                    self.ports.audio.play_immediate(Sound::GameTheme);
                }
            }
        }
    }

    /// Pickups only count while a round is in progress.
    fn pickups_allowed(&self, pickup: &'static str) -> bool {
        if matches!(self.phase, RoundPhase::GameOver | RoundPhase::RoundCleared) {
            warn!(phase = ?self.phase, pickup, "Ignoring pickup outside of a running round");
            return false;
        }
        true
    }

    fn expect_phase(&self, action: RoundAction, expected: RoundPhase) -> bool {
        if self.phase == expected {
            return true;
        }
        warn!(?action, phase = ?self.phase, ?expected, "Timed action fired in an unexpected phase, ignoring");
        false
    }

    /// Deactivates the pellet and scores it, clearing the round if it was the last one.
    fn consume_pellet(&mut self, pellet: Pellet) {
        self.ports.audio.play_one_shot(Sound::PelletEaten);
        self.ports.stage.set_pellet_active(pellet.id, false);
        trace!(pellet = ?pellet.id, points = pellet.points, "Pellet eaten");
        self.add_points(pellet.points);

        if self.ports.stage.has_remaining_pellets() {
            return;
        }

        info!(score = self.scores.score(), "Board cleared");
        self.ports
            .audio
            .play_after_delay(Sound::Over, self.config.over_sound_delay);
        self.ports.stage.set_pacman_active(false);
        self.timers.schedule(RoundAction::NewRound, self.config.round_clear_delay);
        self.set_phase(RoundPhase::RoundCleared);
    }

    fn cancel_for_power_pellet(&mut self) {
        if !self.config.power_pellet_cancels_transitions {
            let stale = self
                .timers
                .cancel_where(|action| *action == RoundAction::ResetGhostMultiplier);
            trace!(stale, "Replaced pending multiplier reset");
            return;
        }

        for (action, remaining) in self.timers.pending().filter(|(action, _)| action.is_phase_transition()) {
            warn!(
                ?action,
                ?remaining,
                phase = ?self.phase,
                "Power pellet cancelled a pending round transition"
            );
        }
        self.timers.cancel_all();
    }

    fn add_points(&mut self, points: u32) {
        let new_high = self.scores.add_points(points);
        self.ports.presentation.set_score_text(&format_score(self.scores.score()));

        if new_high {
            let high_score = self.scores.high_score();
            self.ports.presentation.set_high_score_text(&format_score(high_score));
            if let Err(error) = self.ports.store.save(high_score) {
                warn!(%error, high_score, "Failed to persist high score, continuing");
            }
        }
    }

    fn refresh_lives_text(&mut self) {
        self.ports.presentation.set_lives_text(&format_lives(self.scores.lives()));
    }

    fn reset_actors(&mut self) {
        for ghost in self.ports.stage.ghosts() {
            self.ports.stage.reset_ghost(ghost);
        }
        self.ports.stage.reset_pacman();
    }

    fn set_phase(&mut self, phase: RoundPhase) {
        if self.phase != phase {
            debug!(old_phase = ?self.phase, new_phase = ?phase, "Round phase transition");
        }
        self.phase = phase;
    }
}
