//! Role system: definitions, catalog, distribution and assignment.
//!
//! ## Key Types
//!
//! - `RoleId`: Identifier for role definitions
//! - `Team`, `Ability`, `LimitedUse`: closed vocabularies of the ruleset
//! - `RoleDefinition`: Static role data
//! - `RoleCatalog`: Role definition lookup, with the standard table
//! - `distribute` / `deal`: which roles exist, and who gets which

pub mod catalog;
pub mod definition;
pub mod distribution;

pub use catalog::RoleCatalog;
pub use definition::{Ability, LimitedUse, RoleDefinition, RoleId, Team};
pub use distribution::{bind_in_order, deal, distribute};
