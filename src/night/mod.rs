//! Night phase: action collection and priority-ordered resolution.
//!
//! - `NightAction`: what an actor does tonight (one variant per ability)
//! - `NightRound`: Collecting -> Resolving -> Applied state machine
//! - `NightResult`: per-actor outcome record

pub mod action;
pub mod resolver;

pub use action::{NightAction, NightOutcome, NightResult};
pub use resolver::{NightRound, NightStage, Submission};
