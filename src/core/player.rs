//! Player identification and per-seat runtime state.
//!
//! ## PlayerId
//!
//! Opaque seat handle. Ids are handed out by the `Roster` in seating order
//! and stay valid for the whole session: players are never removed, only
//! marked dead.
//!
//! ## Player
//!
//! Everything the engine tracks about one seat: the dealt role and the state
//! derived from it, the alive flag, single-night flags, resource counters and
//! private knowledge.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::roles::{Ability, LimitedUse, RoleDefinition, RoleId, Team};

/// Seat handle supporting up to 255 players.
///
/// Seats are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats of a table with `player_count` players.
    ///
    /// ```
    /// use saboteur_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(5).collect();
    /// assert_eq!(seats.len(), 5);
    /// assert_eq!(seats[4], PlayerId::new(4));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(u8::MAX as usize) as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// A private record appended to a player's notebook.
///
/// Notes are append-only and tagged with the round they were learned in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Note {
    /// Result of an investigation (possibly falsified by a hack).
    Investigation {
        round: u32,
        target: PlayerId,
        suspicious: bool,
    },
    /// Whom the watched player targeted that night.
    Watch {
        round: u32,
        target: PlayerId,
        visited: Option<PlayerId>,
    },
    /// The player's role was rewritten by the conversion rule.
    Converted { round: u32, from: RoleId, to: RoleId },
}

/// Another player whose role this player knows from the start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownPlayer {
    pub player: PlayerId,
    pub role: RoleId,
    pub confirmed: bool,
}

/// Runtime state of one seat.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,

    /// Dealt role. `None` until roles are assigned.
    pub role: Option<RoleId>,
    /// Team of the current role.
    pub team: Option<Team>,
    /// Night abilities granted by the current role.
    pub abilities: SmallVec<[Ability; 2]>,

    pub alive: bool,

    // === Single-night flags ===
    pub protected: bool,
    pub blocked: bool,
    pub silenced: bool,

    // === Resources ===
    /// Remaining charges shared by all of the role's abilities.
    pub charges: Option<u8>,
    /// Remaining uses of limited sub-abilities.
    pub limited_uses: FxHashMap<LimitedUse, u8>,

    // === Private knowledge ===
    pub notes: Vec<Note>,
    pub known_players: Vec<KnownPlayer>,

    /// Set once the conversion rule has rewritten this player's role.
    pub converted: bool,
}

impl Player {
    /// Create a living player with no role.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: None,
            team: None,
            abilities: SmallVec::new(),
            alive: true,
            protected: false,
            blocked: false,
            silenced: false,
            charges: None,
            limited_uses: FxHashMap::default(),
            notes: Vec::new(),
            known_players: Vec::new(),
            converted: false,
        }
    }

    /// Bind a role and initialize everything derived from it.
    pub fn bind_role(&mut self, role: &RoleDefinition) {
        self.role = Some(role.id);
        self.team = Some(role.team);
        self.abilities = role.abilities.clone();
        self.charges = role.charges;
        self.limited_uses = role.limited_uses.clone();
    }

    /// Rewrite the role in place and set the conversion guard.
    ///
    /// Returns the previous role, or `None` if the player had no role or was
    /// already converted (in which case nothing changes).
    pub fn convert_to(&mut self, role: &RoleDefinition, round: u32) -> Option<RoleId> {
        if self.converted {
            return None;
        }
        let from = self.role?;
        self.bind_role(role);
        self.converted = true;
        self.notes.push(Note::Converted {
            round,
            from,
            to: role.id,
        });
        Some(from)
    }

    /// Whether the current role grants `ability`.
    #[must_use]
    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    /// Whether this player has anything to do at night.
    #[must_use]
    pub fn has_night_ability(&self) -> bool {
        !self.abilities.is_empty()
    }

    #[must_use]
    pub fn is_team(&self, team: Team) -> bool {
        self.team == Some(team)
    }

    /// Whether the charge pool (if any) is exhausted.
    #[must_use]
    pub fn out_of_charges(&self) -> bool {
        self.charges == Some(0)
    }

    /// Remaining uses of a limited sub-ability, `None` if unlimited.
    #[must_use]
    pub fn remaining_uses(&self, kind: LimitedUse) -> Option<u8> {
        self.limited_uses.get(&kind).copied()
    }

    pub(crate) fn spend_charge(&mut self) {
        if let Some(charges) = self.charges.as_mut() {
            *charges = charges.saturating_sub(1);
        }
    }

    pub(crate) fn spend_limited_use(&mut self, kind: LimitedUse) {
        if let Some(uses) = self.limited_uses.get_mut(&kind) {
            *uses = uses.saturating_sub(1);
        }
    }

    /// Clear protection, blocking and silencing.
    pub fn clear_transient(&mut self) {
        self.protected = false;
        self.blocked = false;
        self.silenced = false;
    }
}
