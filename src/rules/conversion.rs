//! Conversion: convertible good roles turn evil when the conversion role
//! falls in a trigger round.
//!
//! The rule fires when the current round is one of
//! `RulesConfig::conversion_rounds` and a player holding
//! `RulesConfig::conversion_role` was eliminated (night or day) during that
//! round. Every living, not-yet-converted player of a convertible role is
//! rewritten into the conversion role. Each player converts at most once.

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::{GameSession, PlayerId, Result, RulesConfig};
use crate::roles::{RoleCatalog, RoleId};

/// One applied conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub player: PlayerId,
    pub round: u32,
    pub from: RoleId,
    pub to: RoleId,
}

/// Whether the conversion trigger holds for the session's current round.
#[must_use]
pub fn conversion_triggered(session: &GameSession, config: &RulesConfig) -> bool {
    let round = session.round();
    config.is_conversion_round(round)
        && session
            .eliminations_in(round)
            .any(|r| r.role == Some(config.conversion_role))
}

/// Apply the conversion rule. Returns the conversions made by this call;
/// calling it again in the same round converts nobody new.
pub fn apply_conversions(
    session: &mut GameSession,
    catalog: &RoleCatalog,
    config: &RulesConfig,
) -> Result<Vec<ConversionRecord>> {
    if !conversion_triggered(session, config) {
        return Ok(Vec::new());
    }

    let target_role = catalog.require(config.conversion_role)?;
    let candidates: Vec<PlayerId> = session
        .roster()
        .living()
        .filter(|p| !p.converted)
        .filter(|p| p.role.and_then(|r| catalog.get(r)).is_some_and(|r| r.convertible))
        .map(|p| p.id)
        .collect();

    let round = session.round();
    let mut records = Vec::with_capacity(candidates.len());
    for id in candidates {
        let Some(player) = session.roster_mut().get_mut(id) else {
            continue;
        };
        if let Some(from) = player.convert_to(target_role, round) {
            info!("round {}: {} has been converted", round, id);
            records.push(ConversionRecord {
                player: id,
                round,
                from,
                to: target_role.id,
            });
        }
    }

    Ok(records)
}
