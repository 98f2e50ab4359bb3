//! Seating-ordered player storage.
//!
//! The roster is built once from the list of names and never reordered or
//! shrunk, so a `PlayerId` handed out at build time resolves to the same
//! player for the whole session. Lookups go through `get`/`get_mut` and
//! return `None` for handles from another table.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::error::{EngineError, Result};
use super::player::{Player, PlayerId};
use crate::roles::RoleId;

/// Ordered list of players, index = seat.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster from player names in seating order.
    ///
    /// Names are trimmed; empty and duplicate names are rejected. Seat count
    /// limits are enforced by role distribution, not here.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        if names.len() > u8::MAX as usize {
            return Err(EngineError::InvalidPlayerCount {
                count: names.len(),
                min: 1,
                max: u8::MAX as usize,
            });
        }

        let mut seen = FxHashSet::default();
        let mut players = Vec::with_capacity(names.len());

        for (seat, name) in names.iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(EngineError::EmptyName { seat });
            }
            if !seen.insert(fold_name(name)) {
                return Err(EngineError::DuplicateName(name.to_string()));
            }
            players.push(Player::new(PlayerId::new(seat as u8), name));
        }

        Ok(Self { players })
    }

    /// Number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Resolve a handle.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Resolve a handle mutably.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    /// Whether the handle refers to a living player.
    #[must_use]
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.get(id).is_some_and(|p| p.alive)
    }

    /// Iterate over players in seating order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Iterate over all seat handles.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    /// Living players in seating order.
    pub fn living(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    #[must_use]
    pub fn living_count(&self) -> usize {
        self.living().count()
    }

    /// First player (in seating order) currently holding `role`.
    #[must_use]
    pub fn find_role(&self, role: RoleId) -> Option<&Player> {
        self.players.iter().find(|p| p.role == Some(role))
    }

    /// Find a player by name (case-insensitive).
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        let name = fold_name(name.trim());
        self.players.iter().find(|p| fold_name(&p.name) == name)
    }

    /// Clear the single-night flags of every player.
    pub fn clear_transient(&mut self) {
        for player in &mut self.players {
            player.clear_transient();
        }
    }
}

/// Case fold shared by duplicate detection and name lookup.
fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

impl Index<PlayerId> for Roster {
    type Output = Player;

    fn index(&self, id: PlayerId) -> &Self::Output {
        &self.players[id.index()]
    }
}
