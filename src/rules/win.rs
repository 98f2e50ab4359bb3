//! Win condition evaluation.
//!
//! `evaluate` is a pure function of the roster. Checks run in a fixed order
//! and the first match wins:
//!
//! 1. A converted player is alive and evil has reached parity: evil wins.
//! 2. No evil player is alive: good wins.
//! 3. Evil has reached parity: evil wins.
//! 4. Two or fewer players remain: draw.
//!
//! Moderator-team players count toward the living total but not toward
//! either team.

use serde::{Deserialize, Serialize};

use crate::core::Roster;
use crate::roles::Team;

/// Which side won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Good,
    Evil,
    Draw,
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    SaboteursEliminated,
    EvilParity,
    /// Evil reached parity with a converted player still alive.
    ConvertedParity,
    TooFewPlayers,
}

impl WinReason {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            WinReason::SaboteursEliminated => "All saboteurs have been eliminated. The students win!",
            WinReason::EvilParity => "The saboteurs equal or outnumber the students. Evil wins!",
            WinReason::ConvertedParity => {
                "The Innovator was turned and evil has taken control. Evil wins!"
            }
            WinReason::TooFewPlayers => "Too few players remain to continue. The game is a draw.",
        }
    }
}

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinResult {
    pub winner: Winner,
    pub reason: WinReason,
    pub message: String,
}

impl WinResult {
    #[must_use]
    pub fn new(winner: Winner, reason: WinReason) -> Self {
        Self {
            winner,
            reason,
            message: reason.message().to_string(),
        }
    }

    /// Check if a team won. Moderators never win.
    #[must_use]
    pub fn is_winner(&self, team: Team) -> bool {
        matches!(
            (self.winner, team),
            (Winner::Good, Team::Good) | (Winner::Evil, Team::Evil)
        )
    }
}

/// Living players by side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCounts {
    pub good: usize,
    pub evil: usize,
    /// All living players, moderators included.
    pub alive: usize,
}

/// Count living players per team.
#[must_use]
pub fn team_counts(roster: &Roster) -> TeamCounts {
    let mut counts = TeamCounts::default();
    for player in roster.living() {
        counts.alive += 1;
        match player.team {
            Some(Team::Good) => counts.good += 1,
            Some(Team::Evil) => counts.evil += 1,
            Some(Team::Moderator) | None => {}
        }
    }
    counts
}

/// Evaluate the roster. `None` means the game continues.
///
/// ```
/// use saboteur_engine::core::Roster;
/// use saboteur_engine::roles::{bind_in_order, RoleCatalog, RoleId};
/// use saboteur_engine::rules::{evaluate, Winner};
///
/// let catalog = RoleCatalog::standard();
/// let mut roster = Roster::from_names(&["A", "B", "C"]).unwrap();
/// bind_in_order(&mut roster, &catalog, &[RoleId::SABOTEUR, RoleId::MEDIC, RoleId::STUDENT]).unwrap();
/// assert_eq!(evaluate(&roster), None);
///
/// roster.get_mut(saboteur_engine::core::PlayerId::new(1)).unwrap().alive = false;
/// assert_eq!(evaluate(&roster).map(|w| w.winner), Some(Winner::Evil));
/// ```
#[must_use]
pub fn evaluate(roster: &Roster) -> Option<WinResult> {
    let counts = team_counts(roster);
    let converted_alive = roster.living().any(|p| p.converted);

    if converted_alive && counts.evil >= counts.good {
        return Some(WinResult::new(Winner::Evil, WinReason::ConvertedParity));
    }
    if counts.evil == 0 {
        return Some(WinResult::new(Winner::Good, WinReason::SaboteursEliminated));
    }
    if counts.evil >= counts.good {
        return Some(WinResult::new(Winner::Evil, WinReason::EvilParity));
    }
    if counts.alive <= 2 {
        return Some(WinResult::new(Winner::Draw, WinReason::TooFewPlayers));
    }
    None
}
