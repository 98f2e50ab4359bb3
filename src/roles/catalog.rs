//! Role catalog for definition lookup.
//!
//! `RoleCatalog::standard()` is the shipped ruleset. Custom catalogs can be
//! assembled with `register` for variants and scripted tests.
//!
//! ## Resolution order
//!
//! Priorities put every ability that changes another ability's outcome
//! ahead of the abilities it changes: blocking first, then protection and
//! hacking, then elimination, then investigation and watching.

use rustc_hash::FxHashMap;

use super::definition::{Ability, LimitedUse, RoleDefinition, RoleId, Team};
use crate::core::{EngineError, Result};

/// Registry of role definitions.
///
/// ## Example
///
/// ```
/// use saboteur_engine::roles::{RoleCatalog, RoleId, Team};
///
/// let catalog = RoleCatalog::standard();
/// let saboteur = catalog.get(RoleId::SABOTEUR).unwrap();
/// assert_eq!(saboteur.team, Team::Evil);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RoleCatalog {
    roles: FxHashMap<RoleId, RoleDefinition>,
}

impl RoleCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard role table.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        catalog.register(
            RoleDefinition::new(RoleId::SECURITY, "Security", Team::Good, 1)
                .with_ability(Ability::Block)
                .with_ability(Ability::Watch)
                .with_text(
                    "Watch someone at night, or block one person from acting.",
                    "Watch suspicious players. Block confirmed threats.",
                ),
        );
        catalog.register(
            RoleDefinition::new(RoleId::MEDIC, "Medic", Team::Good, 2)
                .with_ability(Ability::Protect)
                .with_limited_use(LimitedUse::SelfProtect, 1)
                .with_text(
                    "Protect someone from elimination. Can self-protect once per game.",
                    "Save your self-protect for crucial moments. Watch voting patterns.",
                ),
        );
        catalog.register(
            RoleDefinition::new(RoleId::HACKER, "Hacker", Team::Evil, 3)
                .with_ability(Ability::Hack)
                .with_text(
                    "Falsify investigation results to frame or clear players.",
                    "Misdirect investigations. Frame active good players.",
                ),
        );
        catalog.register(
            RoleDefinition::new(RoleId::SABOTEUR, "Saboteur", Team::Evil, 4)
                .with_ability(Ability::Eliminate)
                .with_text(
                    "Eliminate students each night. Win when saboteurs equal or outnumber students.",
                    "Blend in during the day. Coordinate with other saboteurs if there are any.",
                ),
        );
        catalog.register(
            RoleDefinition::new(RoleId::INVESTIGATOR, "Investigator", Team::Good, 5)
                .with_ability(Ability::Investigate)
                .with_ability(Ability::Watch)
                .with_charges(3)
                .with_text(
                    "Learn if someone is a saboteur, or track whom someone visited. Three uses.",
                    "Investigate suspicious players. Share info carefully to avoid being targeted.",
                ),
        );
        catalog.register(
            RoleDefinition::new(RoleId::INNOVATOR, "Innovator", Team::Good, 6)
                .with_ability(Ability::Invent)
                .convertible()
                .with_text(
                    "Create tools for the team. Turns evil if the Saboteur falls in round 2 or 4.",
                    "Your inventions help everyone. Be careful of conversion.",
                ),
        );
        catalog.register(
            RoleDefinition::new(RoleId::PROFESSOR, "Professor", Team::Good, 7)
                .knowing(RoleId::INNOVATOR)
                .with_text(
                    "Knows who the Innovator is from the start.",
                    "Use what you know to guide the vote. Mentor wisely.",
                ),
        );
        catalog.register(
            RoleDefinition::new(RoleId::STUDENT, "STEM Student", Team::Good, 8).with_text(
                "No special abilities, but your vote matters.",
                "Watch for suspicious behavior. Vote based on logic and evidence.",
            ),
        );

        catalog
    }

    /// Register a role definition.
    ///
    /// Panics if a role with the same ID already exists.
    pub fn register(&mut self, role: RoleDefinition) {
        if self.roles.contains_key(&role.id) {
            panic!("Role with ID {:?} already registered", role.id);
        }
        self.roles.insert(role.id, role);
    }

    /// Get a role definition by ID.
    #[must_use]
    pub fn get(&self, id: RoleId) -> Option<&RoleDefinition> {
        self.roles.get(&id)
    }

    /// Get a role definition, failing with `UnknownRole`.
    pub fn require(&self, id: RoleId) -> Result<&RoleDefinition> {
        self.get(id).ok_or(EngineError::UnknownRole(id))
    }

    /// Check if a role ID is registered.
    #[must_use]
    pub fn contains(&self, id: RoleId) -> bool {
        self.roles.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Iterate over all role definitions.
    pub fn iter(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.roles.values()
    }

    /// Find roles by team.
    pub fn find_by_team(&self, team: Team) -> impl Iterator<Item = &RoleDefinition> {
        self.roles.values().filter(move |r| r.team == team)
    }

    /// Resolution priority of a role; unknown roles sort last.
    #[must_use]
    pub fn priority(&self, id: RoleId) -> u8 {
        self.get(id).map_or(u8::MAX, |r| r.priority)
    }

    /// Display name of a role; falls back to the raw ID.
    #[must_use]
    pub fn name(&self, id: RoleId) -> String {
        self.get(id)
            .map_or_else(|| id.to_string(), |r| r.name.clone())
    }
}
