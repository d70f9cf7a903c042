#![allow(dead_code)]

use std::io;
use std::sync::Arc;
use std::time::Duration;

use pacman_rounds::audio::{AudioEvent, AudioQueue};
use pacman_rounds::error::StoreError;
use pacman_rounds::hud::TextHud;
use pacman_rounds::round::{Collaborators, RoundAction, RoundConfig};
use pacman_rounds::session::GameSession;
use pacman_rounds::stage::{Board, Ghost, GhostId, Pellet, PelletId, PowerPellet};
use pacman_rounds::store::{HighScoreStore, MemoryHighScoreStore};
use parking_lot::Mutex;

pub const PELLET_POINTS: u32 = 10;
pub const POWER_PELLET_POINTS: u32 = 50;

/// A session wired to inspectable in-memory collaborators.
pub struct Harness {
    pub session: GameSession,
    pub hud: Arc<Mutex<TextHud>>,
    pub audio: AudioQueue,
    pub store: Arc<Mutex<MemoryHighScoreStore>>,
    pub board: Arc<Mutex<Board>>,
}

impl Harness {
    pub fn new(pellets: u16, ghosts: u8) -> Self {
        Self::with_config(RoundConfig::default(), pellets, ghosts, 0)
    }

    pub fn with_config(config: RoundConfig, pellets: u16, ghosts: u8, high_score: u32) -> Self {
        let hud = Arc::new(Mutex::new(TextHud::default()));
        let audio = AudioQueue::new();
        let store = Arc::new(Mutex::new(MemoryHighScoreStore {
            high_score,
            saves: 0,
        }));
        let board = Arc::new(Mutex::new(Board::new(pellets, ghosts)));

        let ports = Collaborators::new(hud.clone(), audio.clone(), store.clone(), board.clone());
        Self {
            session: GameSession::new(config, ports),
            hud,
            audio,
            store,
            board,
        }
    }

    /// Starts the session and runs the countdown out, leaving the round active.
    pub fn started(mut self) -> Self {
        self.session.start();
        let countdown = self.session.round().config().countdown;
        self.session.step(countdown, false);
        self.audio.drain();
        self
    }

    pub fn step(&mut self, dt: Duration) {
        self.session.step(dt, false);
    }

    /// Pending actions sorted by time left.
    pub fn pending(&self) -> Vec<(RoundAction, Duration)> {
        let mut pending: Vec<_> = self.session.round().pending_actions().collect();
        pending.sort_by_key(|(_, remaining)| *remaining);
        pending
    }

    pub fn eat_all_pellets_except(&mut self, keep: &[u16]) {
        let count = self.board.lock().pellet_count() as u16;
        for id in (0..count).filter(|id| !keep.contains(id)) {
            self.session.pellet_eaten(pellet(id));
        }
    }

    pub fn audio(&self) -> Vec<AudioEvent> {
        self.audio.drain()
    }
}

pub fn pellet(id: u16) -> Pellet {
    Pellet {
        id: PelletId(id),
        points: PELLET_POINTS,
    }
}

pub fn power_pellet(id: u16, seconds: f32) -> PowerPellet {
    PowerPellet {
        pellet: Pellet {
            id: PelletId(id),
            points: POWER_PELLET_POINTS,
        },
        duration: seconds,
    }
}

pub fn ghost(id: u8, points: u32) -> Ghost {
    Ghost { id: GhostId(id), points }
}

pub fn secs(seconds: f32) -> Duration {
    Duration::from_secs_f32(seconds)
}

/// A store whose disk is always on fire.
#[derive(Debug, Default)]
pub struct FailingStore;

impl HighScoreStore for FailingStore {
    fn load(&self) -> Result<u32, StoreError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
    }

    fn save(&mut self, _high_score: u32) -> Result<(), StoreError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
    }
}
