//! The actor collaborator: pellets, ghosts and Pac-Man as seen by the round controller.
//!
//! The controller references these entities by id and never owns them. Movement,
//! AI and collision detection live elsewhere; the stage only exposes the switches
//! the round choreography needs.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PelletId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GhostId(pub u8);

/// A pellet reported as eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pellet {
    pub id: PelletId,
    pub points: u32,
}

/// A power pellet reported as eaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerPellet {
    pub pellet: Pellet,
    /// How long ghosts stay frightened, in seconds.
    pub duration: f32,
}

/// A ghost reported as eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost {
    pub id: GhostId,
    pub points: u32,
}

/// The set of ghosts on a stage; four in the classic maze.
pub type GhostList = SmallVec<[GhostId; 4]>;

pub trait Stage: Send + Sync {
    fn pellet_active(&self, pellet: PelletId) -> bool;
    fn set_pellet_active(&mut self, pellet: PelletId, active: bool);
    fn activate_all_pellets(&mut self);
    fn has_remaining_pellets(&self) -> bool;

    fn ghosts(&self) -> GhostList;
    fn ghost_frightened(&self, ghost: GhostId) -> bool;
    fn enable_frightened(&mut self, ghost: GhostId, duration: Duration);
    /// Returns the ghost to its start position and state, re-enabling it.
    fn reset_ghost(&mut self, ghost: GhostId);
    fn set_ghost_active(&mut self, ghost: GhostId, active: bool);

    /// Returns Pac-Man to the start position and state, re-enabling him.
    fn reset_pacman(&mut self);
    fn pacman_death_sequence(&mut self);
    fn set_pacman_active(&mut self, active: bool);
}

impl<T: Stage + ?Sized> Stage for Arc<Mutex<T>> {
    fn pellet_active(&self, pellet: PelletId) -> bool {
        self.lock().pellet_active(pellet)
    }

    fn set_pellet_active(&mut self, pellet: PelletId, active: bool) {
        self.lock().set_pellet_active(pellet, active);
    }

    fn activate_all_pellets(&mut self) {
        self.lock().activate_all_pellets();
    }

    fn has_remaining_pellets(&self) -> bool {
        self.lock().has_remaining_pellets()
    }

    fn ghosts(&self) -> GhostList {
        self.lock().ghosts()
    }

    fn ghost_frightened(&self, ghost: GhostId) -> bool {
        self.lock().ghost_frightened(ghost)
    }

    fn enable_frightened(&mut self, ghost: GhostId, duration: Duration) {
        self.lock().enable_frightened(ghost, duration);
    }

    fn reset_ghost(&mut self, ghost: GhostId) {
        self.lock().reset_ghost(ghost);
    }

    fn set_ghost_active(&mut self, ghost: GhostId, active: bool) {
        self.lock().set_ghost_active(ghost, active);
    }

    fn reset_pacman(&mut self) {
        self.lock().reset_pacman();
    }

    fn pacman_death_sequence(&mut self) {
        self.lock().pacman_death_sequence();
    }

    fn set_pacman_active(&mut self, active: bool) {
        self.lock().set_pacman_active(active);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GhostSlot {
    pub active: bool,
    pub frightened: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacmanSlot {
    pub active: bool,
    pub dying: bool,
}

/// In-memory stage with a fixed number of pellets and ghosts.
///
/// Frightened effects count down in [`Board::tick`], standing in for the ghost AI.
#[derive(Debug, Clone)]
pub struct Board {
    pellets: Vec<bool>,
    ghosts: Vec<GhostSlot>,
    pub pacman: PacmanSlot,
}

impl Board {
    /// Creates a board with every pellet active and every actor enabled.
    pub fn new(pellet_count: u16, ghost_count: u8) -> Self {
        Self {
            pellets: vec![true; pellet_count as usize],
            ghosts: vec![
                GhostSlot {
                    active: true,
                    frightened: Duration::ZERO,
                };
                ghost_count as usize
            ],
            pacman: PacmanSlot {
                active: true,
                dying: false,
            },
        }
    }

    pub fn pellet_count(&self) -> usize {
        self.pellets.len()
    }

    pub fn active_pellets(&self) -> impl Iterator<Item = PelletId> + '_ {
        self.pellets
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(index, _)| PelletId(index as u16))
    }

    pub fn ghost(&self, ghost: GhostId) -> Option<&GhostSlot> {
        self.ghosts.get(ghost.0 as usize)
    }

    /// Counts down frightened effects.
    pub fn tick(&mut self, dt: Duration) {
        for (index, ghost) in self.ghosts.iter_mut().enumerate() {
            if ghost.frightened.is_zero() {
                continue;
            }
            ghost.frightened = ghost.frightened.saturating_sub(dt);
            if ghost.frightened.is_zero() {
                trace!(ghost = index, "Frightened effect ended");
            }
        }
    }
}

impl Stage for Board {
    fn pellet_active(&self, pellet: PelletId) -> bool {
        self.pellets.get(pellet.0 as usize).copied().unwrap_or(false)
    }

    fn set_pellet_active(&mut self, pellet: PelletId, active: bool) {
        if let Some(slot) = self.pellets.get_mut(pellet.0 as usize) {
            *slot = active;
        }
    }

    fn activate_all_pellets(&mut self) {
        self.pellets.fill(true);
    }

    fn has_remaining_pellets(&self) -> bool {
        self.pellets.iter().any(|active| *active)
    }

    fn ghosts(&self) -> GhostList {
        (0..self.ghosts.len()).map(|index| GhostId(index as u8)).collect()
    }

    fn ghost_frightened(&self, ghost: GhostId) -> bool {
        self.ghost(ghost).is_some_and(|slot| slot.active && !slot.frightened.is_zero())
    }

    fn enable_frightened(&mut self, ghost: GhostId, duration: Duration) {
        if let Some(slot) = self.ghosts.get_mut(ghost.0 as usize) {
            slot.frightened = duration;
        }
    }

    fn reset_ghost(&mut self, ghost: GhostId) {
        if let Some(slot) = self.ghosts.get_mut(ghost.0 as usize) {
            *slot = GhostSlot {
                active: true,
                frightened: Duration::ZERO,
            };
        }
    }

    fn set_ghost_active(&mut self, ghost: GhostId, active: bool) {
        if let Some(slot) = self.ghosts.get_mut(ghost.0 as usize) {
            slot.active = active;
        }
    }

    fn reset_pacman(&mut self) {
        self.pacman = PacmanSlot {
            active: true,
            dying: false,
        };
    }

    fn pacman_death_sequence(&mut self) {
        debug!("Pac-Man death sequence started");
        self.pacman.dying = true;
    }

    fn set_pacman_active(&mut self, active: bool) {
        self.pacman.active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pellets_deplete_and_refill() {
        let mut board = Board::new(3, 4);
        assert!(board.has_remaining_pellets());

        for id in 0..3 {
            board.set_pellet_active(PelletId(id), false);
        }
        assert!(!board.has_remaining_pellets());
        assert_eq!(board.active_pellets().count(), 0);

        board.activate_all_pellets();
        assert_eq!(board.active_pellets().count(), 3);
    }

    #[test]
    fn unknown_pellet_is_inactive() {
        let board = Board::new(1, 0);
        assert!(!board.pellet_active(PelletId(5)));
    }

    #[test]
    fn frightened_counts_down() {
        let mut board = Board::new(0, 2);
        board.enable_frightened(GhostId(1), Duration::from_secs(2));
        assert!(board.ghost_frightened(GhostId(1)));
        assert!(!board.ghost_frightened(GhostId(0)));

        board.tick(Duration::from_secs(1));
        assert!(board.ghost_frightened(GhostId(1)));
        board.tick(Duration::from_secs(1));
        assert!(!board.ghost_frightened(GhostId(1)));
    }

    #[test]
    fn reset_reenables_actors() {
        let mut board = Board::new(0, 1);
        board.set_ghost_active(GhostId(0), false);
        board.set_pacman_active(false);
        board.pacman_death_sequence();

        board.reset_ghost(GhostId(0));
        board.reset_pacman();
        assert!(board.ghost(GhostId(0)).is_some_and(|g| g.active));
        assert_eq!(board.pacman, PacmanSlot { active: true, dying: false });
    }
}
