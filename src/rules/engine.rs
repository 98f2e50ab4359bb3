//! The rules engine: owns the session and drives the phase cycle.
//!
//! ```text
//! Setup --assign_roles--> Night --resolve_night--> Day --resolve_day--> Night ...
//!                                      |                     |
//!                                      +------> Over <-------+
//! ```
//!
//! Every resolution ends with the conversion rule and then a win check. Once
//! a result is latched the engine is `Over` and refuses further input.
//!
//! ## Usage
//!
//! ```
//! use saboteur_engine::core::{GamePhase, RulesConfig};
//! use saboteur_engine::rules::RulesEngine;
//!
//! let mut engine = RulesEngine::with_seed(RulesConfig::default(), 7).unwrap();
//! engine.assign_roles(&["Ada", "Grace", "Linus", "Ken", "Barbara"]).unwrap();
//!
//! assert_eq!(engine.phase(), GamePhase::Night);
//! assert_eq!(engine.round(), 1);
//! assert_eq!(engine.roster_view().living().count(), 5);
//! ```

use log::info;

use super::conversion::{apply_conversions, ConversionRecord};
use super::view::{GameSummary, PrivateView, RosterView};
use super::win::{evaluate, WinResult};
use crate::core::{
    EngineError, GamePhase, GameRng, GameSession, PlayerId, Result, Roster, RulesConfig,
    TargetRejection,
};
use crate::day::{Ballot, DayResult, DayVote};
use crate::night::{NightAction, NightResult, NightRound};
use crate::roles::{bind_in_order, deal, Ability, LimitedUse, RoleCatalog, RoleId};

/// Game engine for one session.
#[derive(Clone, Debug)]
pub struct RulesEngine {
    config: RulesConfig,
    catalog: RoleCatalog,
    session: GameSession,
    phase: GamePhase,

    // === Open phase ===
    night: Option<NightRound>,
    day: Option<DayVote>,

    /// Conversions applied so far.
    conversions: Vec<ConversionRecord>,
}

impl RulesEngine {
    /// Create an engine with OS-seeded randomness and the standard catalog.
    pub fn new(config: RulesConfig) -> Result<Self> {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Create an engine with a fixed seed (tests, replays).
    pub fn with_seed(config: RulesConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, GameRng::new(seed))
    }

    fn with_rng(config: RulesConfig, rng: GameRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            catalog: RoleCatalog::standard(),
            session: GameSession::new(rng),
            phase: GamePhase::Setup,
            night: None,
            day: None,
            conversions: Vec::new(),
        })
    }

    /// Replace the role catalog. Only meaningful before roles are dealt.
    #[must_use]
    pub fn with_catalog(mut self, catalog: RoleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.session.round()
    }

    /// Full session state, hidden roles and notes included.
    ///
    /// Moderator, debugging and test access only. Anything shown to players
    /// goes through `roster_view` or `private_view`.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// The night currently collecting actions.
    #[must_use]
    pub fn night(&self) -> Option<&NightRound> {
        self.night.as_ref()
    }

    /// The vote currently collecting ballots.
    #[must_use]
    pub fn day(&self) -> Option<&DayVote> {
        self.day.as_ref()
    }

    #[must_use]
    pub fn conversions(&self) -> &[ConversionRecord] {
        &self.conversions
    }

    fn ensure_phase(&self, expected: GamePhase) -> Result<()> {
        if self.phase == GamePhase::Over {
            return Err(EngineError::GameOver);
        }
        if self.phase != expected {
            return Err(EngineError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    // === Setup ===

    /// Seat the players and deal roles with a uniform shuffle.
    ///
    /// Nothing is committed unless every check passes. Opens night 1.
    pub fn assign_roles<S: AsRef<str>>(&mut self, names: &[S]) -> Result<&Roster> {
        self.ensure_phase(GamePhase::Setup)?;

        let mut roster = Roster::from_names(names)?;
        deal(&mut roster, &self.catalog, &self.config, &mut self.session.rng)?;

        self.session.install_roster(roster);
        self.open_night();
        Ok(self.session.roster())
    }

    /// Seat the players and bind `roles[i]` to seat `i` without shuffling.
    pub fn assign_roles_in_order<S: AsRef<str>>(&mut self, names: &[S], roles: &[RoleId]) -> Result<&Roster> {
        self.ensure_phase(GamePhase::Setup)?;

        let mut roster = Roster::from_names(names)?;
        if !self.config.supports(roster.len()) {
            return Err(EngineError::InvalidPlayerCount {
                count: roster.len(),
                min: self.config.min_players,
                max: self.config.max_players,
            });
        }
        bind_in_order(&mut roster, &self.catalog, roles)?;

        self.session.install_roster(roster);
        self.open_night();
        Ok(self.session.roster())
    }

    // === Night ===

    fn open_night(&mut self) {
        self.night = Some(NightRound::open(&self.session));
        self.phase = GamePhase::Night;
    }

    pub fn submit_night_action(&mut self, actor: PlayerId, action: NightAction) -> Result<()> {
        self.ensure_phase(GamePhase::Night)?;
        let night = self.night.as_mut().ok_or(EngineError::AlreadyResolved)?;
        night.submit(&self.session, actor, action)
    }

    /// Resolve the night, apply conversions and check for a winner.
    ///
    /// Opens the day vote if the game goes on.
    pub fn resolve_night(&mut self) -> Result<Vec<NightResult>> {
        self.ensure_phase(GamePhase::Night)?;
        let night = self.night.as_mut().ok_or(EngineError::AlreadyResolved)?;
        let results = night.resolve(&mut self.session, &self.catalog)?;
        self.night = None;

        self.convert()?;
        if self.check_win_condition().is_none() {
            self.day = Some(DayVote::open(&self.session));
            self.phase = GamePhase::Day;
        }
        Ok(results)
    }

    /// Living players `actor` may aim `ability` at tonight.
    ///
    /// Empty if the actor cannot use the ability at all.
    #[must_use]
    pub fn legal_night_targets(&self, actor: PlayerId, ability: Ability) -> Vec<PlayerId> {
        let Some(player) = self.session.roster().get(actor) else {
            return Vec::new();
        };
        if !player.alive || !player.has_ability(ability) || player.out_of_charges() {
            return Vec::new();
        }
        if !ability.needs_target() {
            return Vec::new();
        }

        let self_ok = ability.allows_self_target()
            && player.remaining_uses(LimitedUse::SelfProtect) != Some(0);
        self.session
            .roster()
            .living()
            .map(|p| p.id)
            .filter(|&id| id != actor || self_ok)
            .collect()
    }

    // === Day ===

    pub fn submit_vote(&mut self, voter: PlayerId, ballot: Ballot) -> Result<()> {
        self.ensure_phase(GamePhase::Day)?;
        let day = self.day.as_mut().ok_or(EngineError::AlreadyResolved)?;
        day.cast(&self.session, voter, ballot)
    }

    /// Resolve the vote, apply conversions and check for a winner.
    ///
    /// If the game goes on, the round advances and the next night opens.
    pub fn resolve_day(&mut self) -> Result<DayResult> {
        self.ensure_phase(GamePhase::Day)?;
        let day = self.day.as_mut().ok_or(EngineError::AlreadyResolved)?;
        let result = day.resolve(&mut self.session)?;
        self.day = None;

        self.convert()?;
        if self.check_win_condition().is_none() {
            self.session.advance_round();
            self.open_night();
        }
        Ok(result)
    }

    /// Candidates `voter` may vote for.
    #[must_use]
    pub fn legal_vote_targets(&self, voter: PlayerId) -> Vec<PlayerId> {
        if !self.session.roster().is_alive(voter) {
            return Vec::new();
        }
        self.session
            .roster()
            .living()
            .map(|p| p.id)
            .filter(|&id| id != voter)
            .collect()
    }

    /// Silence a living player for the coming night.
    pub fn silence(&mut self, player: PlayerId) -> Result<()> {
        self.ensure_phase(GamePhase::Day)?;
        let bad_target = |reason| EngineError::InvalidTarget { target: player, reason };

        let silenceable = {
            let target = self
                .session
                .roster()
                .get(player)
                .ok_or(bad_target(TargetRejection::UnknownPlayer))?;
            if !target.alive {
                return Err(bad_target(TargetRejection::Dead));
            }
            target
                .role
                .and_then(|r| self.catalog.get(r))
                .is_some_and(|r| r.silenceable)
        };
        if !silenceable {
            return Err(bad_target(TargetRejection::NotSilenceable));
        }

        if let Some(target) = self.session.roster_mut().get_mut(player) {
            target.silenced = true;
            info!("{} is silenced for the coming night", player);
        }
        Ok(())
    }

    // === Outcome ===

    fn convert(&mut self) -> Result<()> {
        let records = apply_conversions(&mut self.session, &self.catalog, &self.config)?;
        self.conversions.extend(records);
        Ok(())
    }

    /// Evaluate the win conditions and latch the first result.
    ///
    /// Once latched, the same result is returned forever and the engine is
    /// `Over`.
    pub fn check_win_condition(&mut self) -> Option<WinResult> {
        if let Some(win) = self.session.win() {
            return Some(win.clone());
        }
        if self.phase == GamePhase::Setup {
            return None;
        }

        let result = evaluate(self.session.roster())?;
        self.phase = GamePhase::Over;
        self.night = None;
        self.day = None;
        Some(self.session.latch_win(result).clone())
    }

    /// Public table state. Contains no roles or private knowledge.
    #[must_use]
    pub fn roster_view(&self) -> RosterView {
        RosterView::capture(&self.session, self.phase)
    }

    /// One player's own role screen and notebook.
    pub fn private_view(&self, player: PlayerId) -> Result<PrivateView> {
        PrivateView::capture(&self.session, &self.catalog, player)
    }

    /// End-of-game report, once a result is latched.
    #[must_use]
    pub fn summary(&self) -> Option<GameSummary> {
        self.session
            .win()
            .map(|win| GameSummary::capture(&self.session, &self.catalog, win))
    }
}
