//! Game rules on top of the core session.
//!
//! ## Key Types
//!
//! - `RulesEngine`: owns a `GameSession` and drives Setup -> Night -> Day
//! - `evaluate` / `WinResult`: win conditions as a pure roster check
//! - `apply_conversions`: the Innovator -> Saboteur rule
//! - `RosterView`, `PrivateView`, `GameSummary`: snapshots for the UI

pub mod conversion;
pub mod engine;
pub mod view;
pub mod win;

pub use conversion::{apply_conversions, conversion_triggered, ConversionRecord};
pub use engine::RulesEngine;
pub use view::{GameSummary, PlayerStanding, PrivateView, RosterView, SeatView};
pub use win::{evaluate, team_counts, TeamCounts, WinReason, WinResult, Winner};
