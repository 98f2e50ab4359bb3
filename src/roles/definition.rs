//! Role definitions - static role data.
//!
//! `RoleDefinition` holds the immutable properties of a role: its team, its
//! place in the night resolution order, the abilities it grants and the
//! resources those abilities draw on. Per-seat state (remaining charges,
//! flags) lives on `Player`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Identifier of a role in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(pub u8);

impl RoleId {
    pub const SABOTEUR: RoleId = RoleId(0);
    pub const MEDIC: RoleId = RoleId(1);
    pub const INVESTIGATOR: RoleId = RoleId(2);
    pub const PROFESSOR: RoleId = RoleId(3);
    pub const INNOVATOR: RoleId = RoleId(4);
    pub const SECURITY: RoleId = RoleId(5);
    pub const HACKER: RoleId = RoleId(6);
    pub const STUDENT: RoleId = RoleId(7);

    /// Create a new role ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Role({})", self.0)
    }
}

/// Team membership. Decides win conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Good,
    Evil,
    /// Runs the table; excluded from team counts.
    Moderator,
}

/// Night capabilities a role can grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Eliminate,
    Protect,
    Investigate,
    Watch,
    Block,
    Hack,
    Invent,
}

impl Ability {
    /// Whether using the ability requires picking a player.
    #[must_use]
    pub const fn needs_target(self) -> bool {
        !matches!(self, Ability::Invent)
    }

    /// Whether the ability may be aimed at its own user.
    #[must_use]
    pub const fn allows_self_target(self) -> bool {
        matches!(self, Ability::Protect)
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Ability::Eliminate => "eliminate",
            Ability::Protect => "protect",
            Ability::Investigate => "investigate",
            Ability::Watch => "watch",
            Ability::Block => "block",
            Ability::Hack => "hack",
            Ability::Invent => "invent",
        };
        f.write_str(name)
    }
}

/// Sub-abilities with a per-game use limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitedUse {
    /// Protecting yourself.
    SelfProtect,
}

/// Static role definition.
///
/// ## Example
///
/// ```
/// use saboteur_engine::roles::{Ability, RoleDefinition, RoleId, Team};
///
/// let lookout = RoleDefinition::new(RoleId::new(20), "Lookout", Team::Good, 9)
///     .with_ability(Ability::Watch)
///     .with_charges(2);
///
/// assert!(lookout.grants(Ability::Watch));
/// assert_eq!(lookout.charges, Some(2));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub id: RoleId,
    pub name: String,
    pub team: Team,

    /// Night resolution order; lower resolves first.
    pub priority: u8,

    /// Night abilities. Empty for roles that only vote.
    pub abilities: SmallVec<[Ability; 2]>,

    /// Charges shared by all abilities of the role. `None` = unlimited.
    pub charges: Option<u8>,

    /// Per-game limits on sub-abilities.
    pub limited_uses: FxHashMap<LimitedUse, u8>,

    /// Can be rewritten into the conversion role.
    pub convertible: bool,

    /// Can be silenced for a night.
    pub silenceable: bool,

    /// Role whose holder this role learns at setup.
    pub knows: Option<RoleId>,

    pub description: String,
    pub tip: String,
}

impl RoleDefinition {
    /// Create a role with no abilities.
    #[must_use]
    pub fn new(id: RoleId, name: impl Into<String>, team: Team, priority: u8) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            priority,
            abilities: SmallVec::new(),
            charges: None,
            limited_uses: FxHashMap::default(),
            convertible: false,
            silenceable: true,
            knows: None,
            description: String::new(),
            tip: String::new(),
        }
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        if !self.abilities.contains(&ability) {
            self.abilities.push(ability);
        }
        self
    }

    #[must_use]
    pub fn with_charges(mut self, charges: u8) -> Self {
        self.charges = Some(charges);
        self
    }

    #[must_use]
    pub fn with_limited_use(mut self, kind: LimitedUse, uses: u8) -> Self {
        self.limited_uses.insert(kind, uses);
        self
    }

    #[must_use]
    pub fn convertible(mut self) -> Self {
        self.convertible = true;
        self
    }

    #[must_use]
    pub fn knowing(mut self, role: RoleId) -> Self {
        self.knows = Some(role);
        self
    }

    #[must_use]
    pub fn with_text(mut self, description: impl Into<String>, tip: impl Into<String>) -> Self {
        self.description = description.into();
        self.tip = tip.into();
        self
    }

    #[must_use]
    pub fn grants(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    #[must_use]
    pub fn has_night_ability(&self) -> bool {
        !self.abilities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_id() {
        assert_eq!(RoleId::HACKER.raw(), 6);
        assert_eq!(format!("{}", RoleId::MEDIC), "Role(1)");
    }

    #[test]
    fn test_builder() {
        let role = RoleDefinition::new(RoleId::new(30), "Nurse", Team::Good, 12)
            .with_ability(Ability::Protect)
            .with_ability(Ability::Protect)
            .with_limited_use(LimitedUse::SelfProtect, 2)
            .with_text("Keeps people alive.", "Guard the loud ones.");

        assert_eq!(role.abilities.len(), 1);
        assert_eq!(role.limited_uses.get(&LimitedUse::SelfProtect), Some(&2));
        assert!(role.silenceable);
        assert!(!role.convertible);
        assert_eq!(role.description, "Keeps people alive.");
    }

    #[test]
    fn test_ability_targeting() {
        assert!(Ability::Eliminate.needs_target());
        assert!(!Ability::Invent.needs_target());
        assert!(Ability::Protect.allows_self_target());
        assert!(!Ability::Investigate.allows_self_target());
    }

    #[test]
    fn test_team_serialization() {
        assert_eq!(serde_json::to_string(&Team::Evil).unwrap(), "\"evil\"");
        assert_eq!(serde_json::to_string(&Ability::Hack).unwrap(), "\"hack\"");
    }
}
