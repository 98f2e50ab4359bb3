//! Core engine types: seat handles, players, roster, RNG, configuration,
//! errors and the session aggregate.
//!
//! Everything the rules modules share lives here; nothing in this module
//! knows how a night or a day is resolved.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod roster;
pub mod state;

pub use config::{ConfigError, RulesConfig};
pub use error::{ActorRejection, EngineError, Result, TargetRejection, VoterRejection};
pub use player::{KnownPlayer, Note, Player, PlayerId};
pub use rng::{GameRng, RngSource};
pub use roster::Roster;
pub use state::{
    EliminationCause, EliminationRecord, GamePhase, GameSession, HackedTarget, Invention,
};
