//! # saboteur-engine
//!
//! Rules engine for a hidden-role elimination party game for 5-10 players.
//!
//! Players are secretly dealt roles on a good or an evil team. The game
//! alternates a night phase, where roles with abilities act in a fixed
//! priority order, and a day phase, where everyone votes one player out.
//! Good wins when every saboteur is gone; evil wins at parity.
//!
//! ## Design Principles
//!
//! 1. **Explicit Session**: All mutable state lives in one `GameSession`
//!    owned by a `RulesEngine`. No globals; engines can coexist.
//!
//! 2. **Typed Actions**: Night actions and ballots are sum types carrying
//!    exactly their payload. Illegal input is an `EngineError`, expected
//!    outcomes (a blocked action, a tie) are ordinary result values.
//!
//! 3. **Deterministic When Seeded**: Dealing and tie-breaks draw from one
//!    injectable RNG. Production seeds from the OS.
//!
//! ## Modules
//!
//! - `core`: Seat handles, players, roster, RNG, configuration, errors, session
//! - `roles`: Role definitions, the standard catalog, distribution and dealing
//! - `night`: Night actions and priority-ordered resolution
//! - `day`: Ballots, tally and tie-break
//! - `rules`: The engine, win conditions, conversion and read-only views

pub mod core;
pub mod day;
pub mod night;
pub mod roles;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    EngineError, GamePhase, GameRng, GameSession, Note, Player, PlayerId, Result, Roster,
    RulesConfig,
};

pub use crate::roles::{Ability, RoleCatalog, RoleDefinition, RoleId, Team};

pub use crate::night::{NightAction, NightOutcome, NightResult};

pub use crate::day::{Ballot, DayOutcome, DayResult};

pub use crate::rules::{
    GameSummary, PrivateView, RosterView, RulesEngine, WinReason, WinResult, Winner,
};
