//! Read-only snapshots handed to the presentation layer.
//!
//! - `RosterView`: public table state. Names, seats and alive flags only.
//! - `PrivateView`: one player's role-reveal screen and notebook.
//! - `GameSummary`: end-of-game report with every role revealed.

use serde::{Deserialize, Serialize};

use super::win::{team_counts, WinResult};
use crate::core::{
    ActorRejection, EliminationRecord, EngineError, GamePhase, GameSession, KnownPlayer, Note,
    PlayerId, Result,
};
use crate::roles::{Ability, LimitedUse, RoleCatalog, RoleId, Team};

/// Public state of one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub id: PlayerId,
    pub name: String,
    pub alive: bool,
}

/// Public state of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterView {
    pub round: u32,
    pub phase: GamePhase,
    pub players: Vec<SeatView>,
}

impl RosterView {
    pub(crate) fn capture(session: &GameSession, phase: GamePhase) -> Self {
        Self {
            round: session.round(),
            phase,
            players: session
                .roster()
                .iter()
                .map(|p| SeatView {
                    id: p.id,
                    name: p.name.clone(),
                    alive: p.alive,
                })
                .collect(),
        }
    }

    /// Living seats in seating order.
    pub fn living(&self) -> impl Iterator<Item = &SeatView> {
        self.players.iter().filter(|p| p.alive)
    }
}

/// What one player is allowed to know about themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateView {
    pub id: PlayerId,
    pub name: String,
    pub alive: bool,
    pub role: RoleId,
    pub role_name: String,
    pub team: Team,
    pub description: String,
    pub tip: String,
    pub abilities: Vec<Ability>,
    pub charges: Option<u8>,
    pub self_protects: Option<u8>,
    pub notes: Vec<Note>,
    pub known_players: Vec<KnownPlayer>,
    pub converted: bool,
}

impl PrivateView {
    /// Fails with `InvalidActor` for unknown seats and `WrongPhase` before
    /// roles are dealt.
    pub(crate) fn capture(session: &GameSession, catalog: &RoleCatalog, id: PlayerId) -> Result<Self> {
        let player = session.roster().get(id).ok_or(EngineError::InvalidActor {
            actor: id,
            reason: ActorRejection::UnknownPlayer,
        })?;
        let role_id = player.role.ok_or(EngineError::WrongPhase {
            expected: GamePhase::Night,
            actual: GamePhase::Setup,
        })?;
        let role = catalog.require(role_id)?;

        Ok(Self {
            id,
            name: player.name.clone(),
            alive: player.alive,
            role: role_id,
            role_name: role.name.clone(),
            team: role.team,
            description: role.description.clone(),
            tip: role.tip.clone(),
            abilities: player.abilities.to_vec(),
            charges: player.charges,
            self_protects: player.remaining_uses(LimitedUse::SelfProtect),
            notes: player.notes.clone(),
            known_players: player.known_players.clone(),
            converted: player.converted,
        })
    }
}

/// Final standing of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub id: PlayerId,
    pub name: String,
    pub role: Option<RoleId>,
    pub role_name: Option<String>,
    pub team: Option<Team>,
    pub alive: bool,
    pub converted: bool,
    /// Whether this player's team won.
    pub won: bool,
}

/// End-of-game report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub result: WinResult,
    pub rounds_played: u32,
    pub total_players: usize,
    pub alive_players: usize,
    pub eliminated_players: usize,
    pub good_alive: usize,
    pub evil_alive: usize,
    pub players: Vec<PlayerStanding>,
    pub eliminations: Vec<EliminationRecord>,
}

impl GameSummary {
    pub(crate) fn capture(session: &GameSession, catalog: &RoleCatalog, result: &WinResult) -> Self {
        let roster = session.roster();
        let counts = team_counts(roster);

        let players = roster
            .iter()
            .map(|p| PlayerStanding {
                id: p.id,
                name: p.name.clone(),
                role: p.role,
                role_name: p.role.map(|r| catalog.name(r)),
                team: p.team,
                alive: p.alive,
                converted: p.converted,
                won: p.team.is_some_and(|t| result.is_winner(t)),
            })
            .collect();

        Self {
            result: result.clone(),
            rounds_played: session.round(),
            total_players: roster.len(),
            alive_players: counts.alive,
            eliminated_players: roster.len() - counts.alive,
            good_alive: counts.good,
            evil_alive: counts.evil,
            players,
            eliminations: session.eliminations().to_vec(),
        }
    }
}
