//! Headless attract mode: plays one game against a random "player" and logs the round choreography.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use pacman_rounds::audio::{AudioQueue, AudioSink, SilentAudio};
use pacman_rounds::constants::{DEFAULT_HIGH_SCORE_FILE, HIGH_SCORE_PATH_ENV, LOOP_TIME};
use pacman_rounds::events::RoundEvent;
use pacman_rounds::game::Game;
use pacman_rounds::hud::TextHud;
use pacman_rounds::round::{Collaborators, RoundConfig, RoundPhase};
use pacman_rounds::session::GameSession;
use pacman_rounds::stage::{Board, Ghost, GhostId, Pellet, PelletId, PowerPellet, Stage};
use pacman_rounds::store::FileHighScoreStore;
use rand::Rng;
use tracing::{debug, info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

const PELLETS: u16 = 60;
/// The first few pellet ids are power pellets, like the four corners of the maze.
const POWER_PELLETS: u16 = 4;
const PELLET_POINTS: u32 = 10;
const POWER_PELLET_POINTS: u32 = 50;
const FRIGHTENED_SECONDS: f32 = 6.0;
const GHOST_POINTS: u32 = 200;
const GHOSTS: u8 = 4;

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber)?;

    let store_path = std::env::var(HIGH_SCORE_PATH_ENV).unwrap_or_else(|_| DEFAULT_HIGH_SCORE_FILE.to_string());
    let board = Arc::new(Mutex::new(Board::new(PELLETS, GHOSTS)));
    let hud = Arc::new(Mutex::new(TextHud::default()));
    let audio = AudioQueue::new();

    let config = RoundConfig {
        // Attract mode would stall if the last pellet eaten were a power pellet.
        power_pellet_cancels_transitions: false,
        ..RoundConfig::default()
    };
    let ports = Collaborators::new(hud.clone(), audio.clone(), FileHighScoreStore::new(&store_path), board.clone());

    let mut session = GameSession::new(config, ports);
    session.start();
    let mut game = Game::new(session, audio);

    let mut speaker = SilentAudio;
    let mut rng = rand::rng();
    let mut tick_no = 0u64;

    info!(loop_time = ?LOOP_TIME, store = %store_path, "Starting attract mode");
    loop {
        let start = Instant::now();

        board.lock().tick(LOOP_TIME);
        if game.phase() == RoundPhase::Active {
            if let Some(event) = pick_event(&board.lock(), &mut rng) {
                game.send(event);
            }
        }

        for event in game.tick(LOOP_TIME, false) {
            speaker.apply(event);
        }

        if game.phase() == RoundPhase::GameOver {
            let hud = hud.lock();
            info!(score = %hud.score, high_score = %hud.high_score, lives = %hud.lives, ticks = tick_no, "Attract mode finished");
            break;
        }

        let elapsed = start.elapsed();
        if elapsed < LOOP_TIME {
            spin_sleep::sleep(LOOP_TIME - elapsed);
        } else {
            warn!(behind = ?(elapsed - LOOP_TIME), "Loop behind schedule");
        }
        tick_no += 1;
        if tick_no % 600 == 0 {
            debug!(tick_no, score = game.session().scoreboard().score(), "Still playing");
        }
    }

    Ok(())
}

/// Rolls what the pretend player does this frame.
fn pick_event(board: &Board, rng: &mut impl Rng) -> Option<RoundEvent> {
    let frightened: Vec<GhostId> = board
        .ghosts()
        .into_iter()
        .filter(|ghost| board.ghost_frightened(*ghost))
        .collect();

    if !frightened.is_empty() && rng.random_bool(0.02) {
        let id = frightened[rng.random_range(0..frightened.len())];
        return Some(Ghost { id, points: GHOST_POINTS }.into());
    }

    if frightened.is_empty() && rng.random_bool(0.002) {
        return Some(RoundEvent::PlayerCaught);
    }

    if !rng.random_bool(0.12) {
        return None;
    }

    let active: Vec<PelletId> = board.active_pellets().collect();
    if active.is_empty() {
        return None;
    }
    let id = active[rng.random_range(0..active.len())];
    Some(if id.0 < POWER_PELLETS {
        PowerPellet {
            pellet: Pellet {
                id,
                points: POWER_PELLET_POINTS,
            },
            duration: FRIGHTENED_SECONDS,
        }
        .into()
    } else {
        Pellet { id, points: PELLET_POINTS }.into()
    })
}
