//! Ruleset configuration.
//!
//! `RulesConfig` holds every tunable of the ruleset: the supported table
//! sizes, the seat-count thresholds that unlock extra roles, and the
//! conversion trigger. Defaults reproduce the standard 5-10 player game.
//!
//! ```
//! use saboteur_engine::core::RulesConfig;
//!
//! let config = RulesConfig::default().with_conversion_rounds(&[3]);
//! assert!(config.validate().is_ok());
//! assert!(config.is_conversion_round(3));
//! assert!(!config.is_conversion_round(2));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::roles::RoleId;

/// Smallest table the role table can be dealt to.
pub const MIN_SEATS: usize = 3;

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("minimum player count {min} exceeds maximum {max}")]
    PlayerRange { min: usize, max: usize },
    #[error("at least {floor} seats are required (got {min})")]
    TooFewSeats { min: usize, floor: usize },
    #[error("{roles} guaranteed roles do not fit in {seats} seats")]
    RolesExceedSeats { seats: usize, roles: usize },
    #[error("conversion rounds start at 1")]
    ZeroConversionRound,
}

/// Ruleset configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Smallest supported table (inclusive).
    pub min_players: usize,

    /// Largest supported table (inclusive).
    pub max_players: usize,

    /// Tables at least this large add the Professor and the Innovator.
    pub mentor_min_players: usize,

    /// Tables at least this large add a second evil role (the Hacker).
    pub second_evil_min_players: usize,

    /// Tables at least this large add Security.
    pub security_min_players: usize,

    /// Rounds in which the conversion rule can fire.
    pub conversion_rounds: SmallVec<[u32; 4]>,

    /// Role whose elimination triggers conversion, and which converted
    /// players become.
    pub conversion_role: RoleId,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_players: 5,
            max_players: 10,
            mentor_min_players: 6,
            second_evil_min_players: 8,
            security_min_players: 8,
            conversion_rounds: SmallVec::from_slice(&[2, 4]),
            conversion_role: RoleId::SABOTEUR,
        }
    }
}

impl RulesConfig {
    /// Set the supported table size range (inclusive).
    #[must_use]
    pub fn with_player_range(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the conversion trigger rounds.
    #[must_use]
    pub fn with_conversion_rounds(mut self, rounds: &[u32]) -> Self {
        self.conversion_rounds = SmallVec::from_slice(rounds);
        self
    }

    /// Whether `count` is a supported table size.
    #[must_use]
    pub fn supports(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }

    #[must_use]
    pub fn is_conversion_round(&self, round: u32) -> bool {
        self.conversion_rounds.contains(&round)
    }

    /// Number of non-filler roles dealt at a table of `count` players.
    #[must_use]
    pub fn special_role_count(&self, count: usize) -> usize {
        // Saboteur, Medic, Investigator
        let mut roles = 3;
        if count >= self.mentor_min_players {
            roles += 2;
        }
        if count >= self.second_evil_min_players {
            roles += 1;
        }
        if count >= self.security_min_players {
            roles += 1;
        }
        roles
    }

    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players > self.max_players {
            return Err(ConfigError::PlayerRange {
                min: self.min_players,
                max: self.max_players,
            });
        }
        if self.min_players < MIN_SEATS {
            return Err(ConfigError::TooFewSeats {
                min: self.min_players,
                floor: MIN_SEATS,
            });
        }
        if self.conversion_rounds.contains(&0) {
            return Err(ConfigError::ZeroConversionRound);
        }
        for seats in self.min_players..=self.max_players {
            let roles = self.special_role_count(seats);
            if roles > seats {
                return Err(ConfigError::RolesExceedSeats { seats, roles });
            }
        }
        Ok(())
    }
}
