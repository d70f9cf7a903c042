use bevy_ecs::prelude::*;

use crate::stage::{Ghost, Pellet, PowerPellet};

/// Domain events reported into the round controller by pickup/collision detection and the countdown.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum RoundEvent {
    PelletEaten(Pellet),
    PowerPelletEaten(PowerPellet),
    GhostEaten(Ghost),
    PlayerCaught,
    CountdownCompleted,
    NewGame,
}

impl From<Pellet> for RoundEvent {
    fn from(pellet: Pellet) -> Self {
        RoundEvent::PelletEaten(pellet)
    }
}

impl From<PowerPellet> for RoundEvent {
    fn from(pellet: PowerPellet) -> Self {
        RoundEvent::PowerPelletEaten(pellet)
    }
}

impl From<Ghost> for RoundEvent {
    fn from(ghost: Ghost) -> Self {
        RoundEvent::GhostEaten(ghost)
    }
}
