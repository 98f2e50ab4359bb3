//! Game session state: the single mutable source of truth.
//!
//! ## GameSession
//!
//! - Roster (seating order, stable for the whole session)
//! - Round counter (starts at 1, only ever increases)
//! - Elimination history, from which the last night/day pointers derive
//! - Win result (latched once, never overwritten)
//! - Night scratch (hacked investigation targets, cleared every night)
//! - Session-scoped inventions
//! - RNG
//!
//! The session has no phase logic of its own. The night and day engines
//! mutate it through the narrow methods below, which keep the invariants.

use log::info;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::rng::GameRng;
use super::roster::Roster;
use crate::roles::RoleId;
use crate::rules::WinResult;

/// Top-level game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Roles not dealt yet.
    Setup,
    /// Night actions are being collected.
    Night,
    /// Ballots are being collected.
    Day,
    /// A win result has been latched.
    Over,
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Setup => "setup",
            GamePhase::Night => "night",
            GamePhase::Day => "day",
            GamePhase::Over => "game over",
        };
        f.write_str(name)
    }
}

/// How a player was eliminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliminationCause {
    Night,
    Day,
}

/// One entry of the elimination history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationRecord {
    pub player: PlayerId,
    pub round: u32,
    pub cause: EliminationCause,
    /// Role held at the moment of elimination.
    pub role: Option<RoleId>,
}

/// A falsified investigation result planted for tonight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HackedTarget {
    pub target: PlayerId,
    pub suspicious: bool,
}

/// Something an inventor built. Persists for the rest of the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invention {
    pub name: String,
    pub creator: PlayerId,
    pub round: u32,
    pub active: bool,
}

/// Complete session state.
#[derive(Clone, Debug)]
pub struct GameSession {
    roster: Roster,
    round: u32,
    eliminations: Vec<EliminationRecord>,
    win: Option<WinResult>,
    hacked_targets: Vec<HackedTarget>,
    inventions: Vec<Invention>,

    /// Session RNG (deal, tie-breaks).
    pub rng: GameRng,
}

impl GameSession {
    /// Create an empty session at round 1.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            roster: Roster::default(),
            round: 1,
            eliminations: Vec::new(),
            win: None,
            hacked_targets: Vec::new(),
            inventions: Vec::new(),
            rng,
        }
    }

    // === Roster ===

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub(crate) fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub(crate) fn install_roster(&mut self, roster: Roster) {
        self.roster = roster;
    }

    // === Rounds ===

    /// Current round (starts at 1).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Move to the next round. Called once per completed day.
    pub(crate) fn advance_round(&mut self) {
        self.round += 1;
        info!("round {} begins", self.round);
    }

    // === Eliminations ===

    /// Mark a player dead and record it. No-op for dead or unknown players.
    ///
    /// Returns whether the player was eliminated by this call.
    pub(crate) fn eliminate(&mut self, player: PlayerId, cause: EliminationCause) -> bool {
        let round = self.round;
        let Some(target) = self.roster.get_mut(player) else {
            return false;
        };
        if !target.alive {
            return false;
        }

        target.alive = false;
        info!("{} ({}) eliminated during {:?} of round {}", target.name, player, cause, round);
        self.eliminations.push(EliminationRecord {
            player,
            round,
            cause,
            role: target.role,
        });
        true
    }

    /// Full elimination history in order.
    #[must_use]
    pub fn eliminations(&self) -> &[EliminationRecord] {
        &self.eliminations
    }

    /// Eliminations that happened during `round`.
    pub fn eliminations_in(&self, round: u32) -> impl Iterator<Item = &EliminationRecord> {
        self.eliminations.iter().filter(move |r| r.round == round)
    }

    /// Most recent night elimination.
    #[must_use]
    pub fn last_night_elimination(&self) -> Option<PlayerId> {
        self.last_elimination(EliminationCause::Night)
    }

    /// Most recent day elimination.
    #[must_use]
    pub fn last_day_elimination(&self) -> Option<PlayerId> {
        self.last_elimination(EliminationCause::Day)
    }

    fn last_elimination(&self, cause: EliminationCause) -> Option<PlayerId> {
        self.eliminations
            .iter()
            .rev()
            .find(|r| r.cause == cause)
            .map(|r| r.player)
    }

    // === Win latch ===

    #[must_use]
    pub fn win(&self) -> Option<&WinResult> {
        self.win.as_ref()
    }

    /// Latch the win result. A result that is already set is kept.
    ///
    /// Returns the latched result.
    pub(crate) fn latch_win(&mut self, result: WinResult) -> &WinResult {
        self.win.get_or_insert_with(|| {
            info!("game over: {}", result.message);
            result
        })
    }

    // === Night scratch ===

    pub(crate) fn plant_hack(&mut self, hack: HackedTarget) {
        self.hacked_targets.push(hack);
    }

    /// Take the planted result for `target`, if any. Each hack is consumed by
    /// the first investigation that reads it.
    pub(crate) fn take_hack(&mut self, target: PlayerId) -> Option<bool> {
        let pos = self.hacked_targets.iter().position(|h| h.target == target)?;
        Some(self.hacked_targets.remove(pos).suspicious)
    }

    #[must_use]
    pub fn hacked_targets(&self) -> &[HackedTarget] {
        &self.hacked_targets
    }

    /// Clear every single-night effect.
    pub(crate) fn end_night(&mut self) {
        self.roster.clear_transient();
        self.hacked_targets.clear();
    }

    // === Inventions ===

    pub(crate) fn register_invention(&mut self, invention: Invention) {
        self.inventions.push(invention);
    }

    #[must_use]
    pub fn inventions(&self) -> &[Invention] {
        &self.inventions
    }
}
