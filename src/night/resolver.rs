//! Night resolution.
//!
//! A `NightRound` moves through three stages:
//!
//! 1. **Collecting**: one submission per eligible actor. Living players who
//!    are silenced, have no night ability or have spent every charge are
//!    recorded as implicit skips when the round opens.
//! 2. **Resolving**: submissions are ordered by (role priority, seat) and
//!    resolved one at a time against the current state. Blocking,
//!    protection and hacks take effect immediately so later actions see
//!    them; eliminations are only marked, and a second eliminator reaching
//!    a marked target reports `AlreadyEliminated`.
//! 3. **Applied**: eliminations, notes, resource spending and inventions are
//!    committed, then every single-night effect is cleared.

use log::{debug, info};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::action::{NightAction, NightOutcome, NightResult};
use crate::core::{
    ActorRejection, EliminationCause, EngineError, GameSession, HackedTarget, Invention, Note,
    PlayerId, Result, TargetRejection,
};
use crate::roles::{LimitedUse, RoleCatalog, Team};

/// Stage of a night round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NightStage {
    Collecting,
    Resolving,
    Applied,
}

/// One recorded submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub actor: PlayerId,
    pub action: NightAction,
    /// Recorded by the engine, not submitted by the actor.
    pub implicit: bool,
}

/// Collection and resolution state for one night.
#[derive(Clone, Debug)]
pub struct NightRound {
    round: u32,
    stage: NightStage,
    submissions: Vec<Submission>,
    /// Eligible actors that have not submitted yet, in seating order.
    pending: Vec<PlayerId>,
}

impl NightRound {
    /// Open the night for the session's current round.
    #[must_use]
    pub fn open(session: &GameSession) -> Self {
        let mut submissions = Vec::new();
        let mut pending = Vec::new();

        for player in session.roster().living() {
            if player.silenced || !player.has_night_ability() || player.out_of_charges() {
                submissions.push(Submission {
                    actor: player.id,
                    action: NightAction::Skip,
                    implicit: true,
                });
            } else {
                pending.push(player.id);
            }
        }

        info!(
            "night {} opens: {} actor(s) to act, {} idle",
            session.round(),
            pending.len(),
            submissions.len()
        );

        Self {
            round: session.round(),
            stage: NightStage::Collecting,
            submissions,
            pending,
        }
    }

    #[must_use]
    pub fn stage(&self) -> NightStage {
        self.stage
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Actors still expected to submit.
    #[must_use]
    pub fn pending(&self) -> &[PlayerId] {
        &self.pending
    }

    #[must_use]
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Validate and record one actor's action.
    ///
    /// Rejected submissions leave the round unchanged.
    pub fn submit(&mut self, session: &GameSession, actor: PlayerId, action: NightAction) -> Result<()> {
        let reject = |reason| EngineError::InvalidActor { actor, reason };

        let player = session
            .roster()
            .get(actor)
            .ok_or(reject(ActorRejection::UnknownPlayer))?;
        if !player.alive {
            return Err(reject(ActorRejection::Dead));
        }

        if !self.pending.contains(&actor) {
            let reason = match self.submissions.iter().find(|s| s.actor == actor) {
                Some(s) if s.implicit && player.silenced => ActorRejection::Silenced,
                Some(s) if s.implicit && player.out_of_charges() => ActorRejection::OutOfCharges,
                Some(s) if s.implicit => ActorRejection::NoNightAbility,
                _ => ActorRejection::AlreadyActed,
            };
            return Err(reject(reason));
        }

        if let Some(ability) = action.ability() {
            if !player.has_ability(ability) {
                return Err(reject(ActorRejection::AbilityNotGranted(ability)));
            }
            if player.out_of_charges() {
                return Err(reject(ActorRejection::OutOfCharges));
            }
        }

        if let Some(target) = action.target() {
            let bad_target = |reason| EngineError::InvalidTarget { target, reason };
            if session.roster().get(target).is_none() {
                return Err(bad_target(TargetRejection::UnknownPlayer));
            }
            if !session.roster().is_alive(target) {
                return Err(bad_target(TargetRejection::Dead));
            }
            if target == actor {
                let self_allowed = action.ability().is_some_and(|a| a.allows_self_target());
                if !self_allowed {
                    return Err(bad_target(TargetRejection::SelfTarget));
                }
                if player.remaining_uses(LimitedUse::SelfProtect) == Some(0) {
                    return Err(bad_target(TargetRejection::SelfProtectExhausted));
                }
            }
        }

        debug!("night {}: {} submitted {:?}", self.round, actor, action);
        self.pending.retain(|&p| p != actor);
        self.submissions.push(Submission {
            actor,
            action,
            implicit: false,
        });
        Ok(())
    }

    /// Resolve every submission against the session.
    ///
    /// Fails with `ActionsPending` while eligible actors have not submitted.
    /// Returns one result per submission in resolution order.
    pub fn resolve(&mut self, session: &mut GameSession, catalog: &RoleCatalog) -> Result<Vec<NightResult>> {
        if self.stage == NightStage::Applied {
            return Err(EngineError::AlreadyResolved);
        }
        if !self.pending.is_empty() {
            return Err(EngineError::ActionsPending {
                pending: self.pending.len(),
            });
        }

        self.stage = NightStage::Resolving;
        let order = resolution_order(&self.submissions, session, catalog);

        // Effect pass
        let mut results = Vec::with_capacity(order.len());
        let mut marked = FxHashSet::default();
        for submission in &order {
            let outcome = effect(session, submission, &order, &mut marked);
            debug!("night {}: {} -> {:?}", self.round, submission.actor, outcome);
            results.push(NightResult {
                actor: submission.actor,
                action: submission.action.clone(),
                outcome,
            });
        }

        // Apply pass
        for result in &results {
            apply(session, result, self.round);
        }
        session.end_night();

        self.stage = NightStage::Applied;
        let deaths = session
            .eliminations_in(self.round)
            .filter(|r| r.cause == EliminationCause::Night)
            .count();
        info!("night {} resolved: {} action(s), {} elimination(s)", self.round, results.len(), deaths);

        Ok(results)
    }
}

/// Submissions sorted by (role priority, seat).
fn resolution_order(submissions: &[Submission], session: &GameSession, catalog: &RoleCatalog) -> Vec<Submission> {
    let priority = |actor: PlayerId| {
        session
            .roster()
            .get(actor)
            .and_then(|p| p.role)
            .map_or(u8::MAX, |role| catalog.priority(role))
    };

    let mut order = submissions.to_vec();
    order.sort_by_key(|s| (priority(s.actor), s.actor));
    order
}

/// Compute one action's outcome, applying the single-night effects that
/// later actions depend on.
fn effect(
    session: &mut GameSession,
    submission: &Submission,
    batch: &[Submission],
    marked: &mut FxHashSet<PlayerId>,
) -> NightOutcome {
    let actor_blocked = session
        .roster()
        .get(submission.actor)
        .is_some_and(|p| p.blocked);
    if actor_blocked && !submission.action.is_skip() {
        return NightOutcome::ActionBlocked;
    }

    match submission.action {
        NightAction::Skip => NightOutcome::Skipped,

        NightAction::Block { target } => {
            if let Some(player) = session.roster_mut().get_mut(target) {
                player.blocked = true;
            }
            NightOutcome::Blocked { target }
        }

        NightAction::Protect { target } => {
            if let Some(player) = session.roster_mut().get_mut(target) {
                player.protected = true;
            }
            NightOutcome::Protected { target }
        }

        NightAction::Hack { target, suspicious } => {
            session.plant_hack(HackedTarget { target, suspicious });
            NightOutcome::Hacked { target }
        }

        NightAction::Eliminate { target } => {
            if session.roster().get(target).is_some_and(|p| p.protected) {
                NightOutcome::EliminationPrevented { target }
            } else if !marked.insert(target) {
                NightOutcome::AlreadyEliminated { target }
            } else {
                NightOutcome::Eliminated { target }
            }
        }

        NightAction::Investigate { target } => {
            let suspicious = match session.take_hack(target) {
                Some(planted) => planted,
                None => session
                    .roster()
                    .get(target)
                    .is_some_and(|p| p.is_team(Team::Evil)),
            };
            NightOutcome::Investigated { target, suspicious }
        }

        NightAction::Watch { target } => {
            let visited = batch
                .iter()
                .find(|s| s.actor == target)
                .and_then(|s| s.action.target());
            NightOutcome::Watched { target, visited }
        }

        NightAction::Invent { ref invention } => NightOutcome::Invented {
            invention: invention.clone(),
        },
    }
}

/// Commit the permanent consequences of one result.
fn apply(session: &mut GameSession, result: &NightResult, round: u32) {
    let actor = result.actor;

    match &result.outcome {
        NightOutcome::Eliminated { target } => {
            session.eliminate(*target, EliminationCause::Night);
        }
        NightOutcome::Investigated { target, suspicious } => {
            push_note(session, actor, Note::Investigation {
                round,
                target: *target,
                suspicious: *suspicious,
            });
        }
        NightOutcome::Watched { target, visited } => {
            push_note(session, actor, Note::Watch {
                round,
                target: *target,
                visited: *visited,
            });
        }
        NightOutcome::Invented { invention } => {
            session.register_invention(Invention {
                name: invention.clone(),
                creator: actor,
                round,
                active: true,
            });
        }
        NightOutcome::Protected { target } if *target == actor => {
            if let Some(player) = session.roster_mut().get_mut(actor) {
                player.spend_limited_use(LimitedUse::SelfProtect);
            }
        }
        _ => {}
    }

    if result.outcome.resolved() {
        if let Some(player) = session.roster_mut().get_mut(actor) {
            player.spend_charge();
        }
    }
}

fn push_note(session: &mut GameSession, player: PlayerId, note: Note) {
    if let Some(player) = session.roster_mut().get_mut(player) {
        player.notes.push(note);
    }
}
