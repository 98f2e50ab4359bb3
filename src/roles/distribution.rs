//! Role distribution and secret assignment.
//!
//! `distribute` decides *which* roles exist at a table of a given size; it is
//! a deterministic step function of the player count. `deal` decides *who*
//! gets which: a uniform shuffle of that list, zipped with seating order.

use log::{debug, info};

use super::catalog::RoleCatalog;
use super::definition::RoleId;
use crate::core::{EngineError, GameRng, KnownPlayer, Result, Roster, RulesConfig};

/// Roles to deal at a table of `player_count`, in canonical order.
///
/// Fails with `InvalidPlayerCount` outside the configured range.
///
/// ```
/// use saboteur_engine::core::RulesConfig;
/// use saboteur_engine::roles::{distribute, RoleId};
///
/// let roles = distribute(5, &RulesConfig::default()).unwrap();
/// assert_eq!(
///     roles,
///     vec![RoleId::SABOTEUR, RoleId::MEDIC, RoleId::INVESTIGATOR, RoleId::STUDENT, RoleId::STUDENT]
/// );
/// ```
pub fn distribute(player_count: usize, config: &RulesConfig) -> Result<Vec<RoleId>> {
    if !config.supports(player_count) {
        return Err(EngineError::InvalidPlayerCount {
            count: player_count,
            min: config.min_players,
            max: config.max_players,
        });
    }

    let mut roles = Vec::with_capacity(player_count);

    roles.push(RoleId::SABOTEUR);
    if player_count >= config.second_evil_min_players {
        roles.push(RoleId::HACKER);
    }

    roles.push(RoleId::MEDIC);
    roles.push(RoleId::INVESTIGATOR);

    if player_count >= config.mentor_min_players {
        roles.push(RoleId::PROFESSOR);
        roles.push(RoleId::INNOVATOR);
    }
    if player_count >= config.security_min_players {
        roles.push(RoleId::SECURITY);
    }

    roles.resize(player_count, RoleId::STUDENT);
    Ok(roles)
}

/// Deal roles to every seat of `roster`.
///
/// Distributes for the roster size, shuffles uniformly with `rng`, binds each
/// seat to its role and wires the knowledge links. Returns the dealt roles in
/// seating order.
pub fn deal(
    roster: &mut Roster,
    catalog: &RoleCatalog,
    config: &RulesConfig,
    rng: &mut GameRng,
) -> Result<Vec<RoleId>> {
    let mut roles = distribute(roster.len(), config)?;
    rng.shuffle(&mut roles);
    bind_in_order(roster, catalog, &roles)?;
    info!("dealt {} roles", roles.len());
    Ok(roles)
}

/// Bind `roles[i]` to seat `i` without shuffling, then wire knowledge links.
///
/// Every role is checked against the catalog before any seat is touched.
pub fn bind_in_order(roster: &mut Roster, catalog: &RoleCatalog, roles: &[RoleId]) -> Result<()> {
    if roles.len() != roster.len() {
        return Err(EngineError::RosterMismatch {
            players: roster.len(),
            roles: roles.len(),
        });
    }

    let definitions = roles
        .iter()
        .map(|&id| catalog.require(id))
        .collect::<Result<Vec<_>>>()?;

    for (player, role) in roster.iter_mut().zip(definitions) {
        player.bind_role(role);
        debug!("{} ({}) is {}", player.name, player.id, role.name);
    }

    wire_knowledge(roster, catalog);
    Ok(())
}

/// One-time asymmetric knowledge pass: a role that `knows` another learns
/// the identity of its holder, if both were dealt.
fn wire_knowledge(roster: &mut Roster, catalog: &RoleCatalog) {
    let links: Vec<_> = roster
        .iter()
        .filter_map(|knower| {
            let known_role = catalog.get(knower.role?)?.knows?;
            let known = roster.find_role(known_role)?;
            Some((knower.id, KnownPlayer {
                player: known.id,
                role: known_role,
                confirmed: true,
            }))
        })
        .collect();

    for (knower, link) in links {
        if let Some(player) = roster.get_mut(knower) {
            player.known_players.push(link);
        }
    }
}
