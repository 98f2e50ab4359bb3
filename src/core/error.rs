//! Contract-violation errors.
//!
//! Every variant here means the caller offered something the rules never
//! allow (a dead target, a second vote, a table of the wrong size). Expected
//! game outcomes such as a blocked action or a tied vote are ordinary result
//! values and never appear here.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::ConfigError;
use super::player::PlayerId;
use super::state::GamePhase;
use crate::roles::{Ability, RoleId};

pub type Result<T> = std::result::Result<T, EngineError>;

/// Why an actor's night submission was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorRejection {
    UnknownPlayer,
    Dead,
    AlreadyActed,
    NoNightAbility,
    Silenced,
    AbilityNotGranted(Ability),
    OutOfCharges,
}

impl fmt::Display for ActorRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPlayer => f.write_str("not seated at this table"),
            Self::Dead => f.write_str("eliminated"),
            Self::AlreadyActed => f.write_str("already acted tonight"),
            Self::NoNightAbility => f.write_str("role has no night ability"),
            Self::Silenced => f.write_str("silenced tonight"),
            Self::AbilityNotGranted(ability) => write!(f, "role cannot {ability}"),
            Self::OutOfCharges => f.write_str("no charges left"),
        }
    }
}

/// Why a night or vote target was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRejection {
    UnknownPlayer,
    Dead,
    SelfTarget,
    SelfProtectExhausted,
    NotSilenceable,
}

impl fmt::Display for TargetRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPlayer => f.write_str("not seated at this table"),
            Self::Dead => f.write_str("already eliminated"),
            Self::SelfTarget => f.write_str("cannot target self"),
            Self::SelfProtectExhausted => f.write_str("self-protection already used"),
            Self::NotSilenceable => f.write_str("role cannot be silenced"),
        }
    }
}

/// Why a ballot was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoterRejection {
    UnknownPlayer,
    Dead,
    AlreadyVoted,
    VotingClosed,
}

impl fmt::Display for VoterRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPlayer => f.write_str("not seated at this table"),
            Self::Dead => f.write_str("eliminated"),
            Self::AlreadyVoted => f.write_str("already voted today"),
            Self::VotingClosed => f.write_str("voting is closed"),
        }
    }
}

/// Contract violations raised by the engine.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("player count {count} outside supported range {min}..={max}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },
    #[error("player name {0:?} is used more than once")]
    DuplicateName(String),
    #[error("seat {seat} has an empty name")]
    EmptyName { seat: usize },
    #[error("{players} players but {roles} roles supplied")]
    RosterMismatch { players: usize, roles: usize },
    #[error("{0} is not in the role catalog")]
    UnknownRole(RoleId),
    #[error("{actor} cannot act: {reason}")]
    InvalidActor {
        actor: PlayerId,
        reason: ActorRejection,
    },
    #[error("{target} is not a valid target: {reason}")]
    InvalidTarget {
        target: PlayerId,
        reason: TargetRejection,
    },
    #[error("{voter} cannot vote: {reason}")]
    InvalidVoter {
        voter: PlayerId,
        reason: VoterRejection,
    },
    #[error("expected the {expected} phase, but the game is in the {actual} phase")]
    WrongPhase {
        expected: GamePhase,
        actual: GamePhase,
    },
    #[error("{pending} player(s) still have to act")]
    ActionsPending { pending: usize },
    #[error("this phase has already been resolved")]
    AlreadyResolved,
    #[error("the game is already over")]
    GameOver,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
