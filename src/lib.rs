//! Round, score and life-cycle control for a Pac-Man style arcade game.

pub mod audio;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod hud;
pub mod round;
pub mod scheduler;
pub mod scoreboard;
pub mod session;
pub mod stage;
pub mod store;
pub mod systems;
