//! Night actions and their outcomes.
//!
//! Each action variant carries exactly the payload its ability needs. The
//! outcome type mirrors it: one variant per thing that can happen to an
//! action during resolution.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::roles::Ability;

/// An action submitted by one actor for tonight.
///
/// ```
/// use saboteur_engine::core::PlayerId;
/// use saboteur_engine::night::NightAction;
/// use saboteur_engine::roles::Ability;
///
/// let hack = NightAction::Hack { target: PlayerId::new(2), suspicious: true };
/// assert_eq!(hack.ability(), Some(Ability::Hack));
/// assert_eq!(hack.target(), Some(PlayerId::new(2)));
/// assert_eq!(NightAction::Skip.target(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NightAction {
    Eliminate { target: PlayerId },
    Protect { target: PlayerId },
    Investigate { target: PlayerId },
    Watch { target: PlayerId },
    Block { target: PlayerId },
    /// Plant a fake investigation result on `target` for tonight.
    Hack { target: PlayerId, suspicious: bool },
    Invent { invention: String },
    /// Do nothing. Always allowed.
    Skip,
}

impl NightAction {
    /// Ability this action uses; `None` for `Skip`.
    #[must_use]
    pub fn ability(&self) -> Option<Ability> {
        match self {
            NightAction::Eliminate { .. } => Some(Ability::Eliminate),
            NightAction::Protect { .. } => Some(Ability::Protect),
            NightAction::Investigate { .. } => Some(Ability::Investigate),
            NightAction::Watch { .. } => Some(Ability::Watch),
            NightAction::Block { .. } => Some(Ability::Block),
            NightAction::Hack { .. } => Some(Ability::Hack),
            NightAction::Invent { .. } => Some(Ability::Invent),
            NightAction::Skip => None,
        }
    }

    /// Player this action is aimed at, if any.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        match *self {
            NightAction::Eliminate { target }
            | NightAction::Protect { target }
            | NightAction::Investigate { target }
            | NightAction::Watch { target }
            | NightAction::Block { target }
            | NightAction::Hack { target, .. } => Some(target),
            NightAction::Invent { .. } | NightAction::Skip => None,
        }
    }

    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, NightAction::Skip)
    }
}

/// What happened to one action during resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NightOutcome {
    /// The actor chose (or was forced) to do nothing.
    Skipped,
    /// The actor was blocked earlier tonight; the action was voided.
    ActionBlocked,
    Blocked { target: PlayerId },
    Protected { target: PlayerId },
    Hacked { target: PlayerId },
    Eliminated { target: PlayerId },
    /// The target was protected; nobody died.
    EliminationPrevented { target: PlayerId },
    /// An earlier eliminator already took this target tonight.
    AlreadyEliminated { target: PlayerId },
    Investigated { target: PlayerId, suspicious: bool },
    /// `visited` is whom the watched player targeted tonight.
    Watched {
        target: PlayerId,
        visited: Option<PlayerId>,
    },
    Invented { invention: String },
}

impl NightOutcome {
    /// Whether the action actually took effect (and so spends resources).
    #[must_use]
    pub fn resolved(&self) -> bool {
        !matches!(self, NightOutcome::Skipped | NightOutcome::ActionBlocked)
    }
}

/// Per-actor resolution record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightResult {
    pub actor: PlayerId,
    pub action: NightAction,
    pub outcome: NightOutcome,
}

impl NightResult {
    /// Player eliminated by this action, if any.
    #[must_use]
    pub fn eliminated(&self) -> Option<PlayerId> {
        match self.outcome {
            NightOutcome::Eliminated { target } => Some(target),
            _ => None,
        }
    }
}
