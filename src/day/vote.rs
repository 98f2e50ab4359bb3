//! Day vote: ballot collection, tally and tie-break.
//!
//! Every player alive at day start casts exactly one ballot, either for a
//! living player other than themselves or an abstention. Abstentions count
//! for participation only. The candidate with the most votes is eliminated;
//! a tie is broken by a uniform draw from the session RNG over the tied
//! candidates in seating order, and reported.

use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{
    EliminationCause, EngineError, GameSession, PlayerId, Result, TargetRejection, VoterRejection,
};

/// One player's ballot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ballot {
    For(PlayerId),
    Abstain,
}

impl Ballot {
    /// Candidate this ballot counts for.
    #[must_use]
    pub fn target(self) -> Option<PlayerId> {
        match self {
            Ballot::For(target) => Some(target),
            Ballot::Abstain => None,
        }
    }
}

/// A ballot together with who cast it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastBallot {
    pub voter: PlayerId,
    pub ballot: Ballot,
}

/// Stage of a day vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteStage {
    Voting,
    /// Too few players alive to hold a vote.
    Skipped,
    Tallying,
    Resolved,
}

/// How the day ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOutcome {
    Eliminated { player: PlayerId, votes: u32 },
    /// Nobody received a vote.
    NoElimination,
    /// Fewer than two players were alive at day start.
    InsufficientPlayers,
}

/// Full record of one day vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayResult {
    pub round: u32,
    pub outcome: DayOutcome,
    /// Whether the winner was picked by tie-break.
    pub tie: bool,
    /// Candidates sharing the top count, in seating order. Empty unless `tie`.
    pub tied: Vec<PlayerId>,
    /// Votes per candidate. Players without votes are absent.
    pub tally: FxHashMap<PlayerId, u32>,
    /// Ballots in the order they were cast.
    pub ballots: Vec<CastBallot>,
}

impl DayResult {
    /// Player eliminated by the vote, if any.
    #[must_use]
    pub fn eliminated(&self) -> Option<PlayerId> {
        match self.outcome {
            DayOutcome::Eliminated { player, .. } => Some(player),
            _ => None,
        }
    }

    /// Votes received by `player`.
    #[must_use]
    pub fn votes_for(&self, player: PlayerId) -> u32 {
        self.tally.get(&player).copied().unwrap_or(0)
    }
}

/// Ballot collection state for one day.
#[derive(Clone, Debug)]
pub struct DayVote {
    round: u32,
    stage: VoteStage,
    /// Players alive at day start, in seating order.
    voters: Vec<PlayerId>,
    ballots: Vec<CastBallot>,
}

impl DayVote {
    /// Open the vote for the session's current round.
    #[must_use]
    pub fn open(session: &GameSession) -> Self {
        let voters: Vec<_> = session.roster().living().map(|p| p.id).collect();
        let stage = if voters.len() < 2 {
            info!("day {}: only {} player(s) alive, no vote", session.round(), voters.len());
            VoteStage::Skipped
        } else {
            info!("day {} opens: {} voter(s)", session.round(), voters.len());
            VoteStage::Voting
        };

        Self {
            round: session.round(),
            stage,
            voters,
            ballots: Vec::new(),
        }
    }

    #[must_use]
    pub fn stage(&self) -> VoteStage {
        self.stage
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn voters(&self) -> &[PlayerId] {
        &self.voters
    }

    #[must_use]
    pub fn ballots(&self) -> &[CastBallot] {
        &self.ballots
    }

    /// Voters who have not cast a ballot yet, in seating order.
    pub fn pending(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.voters
            .iter()
            .copied()
            .filter(|&v| !self.has_voted(v))
    }

    fn has_voted(&self, voter: PlayerId) -> bool {
        self.ballots.iter().any(|b| b.voter == voter)
    }

    /// Validate and record one ballot.
    pub fn cast(&mut self, session: &GameSession, voter: PlayerId, ballot: Ballot) -> Result<()> {
        let reject = |reason| EngineError::InvalidVoter { voter, reason };

        if self.stage != VoteStage::Voting {
            return Err(reject(VoterRejection::VotingClosed));
        }
        let Some(player) = session.roster().get(voter) else {
            return Err(reject(VoterRejection::UnknownPlayer));
        };
        if !player.alive || !self.voters.contains(&voter) {
            return Err(reject(VoterRejection::Dead));
        }
        if self.has_voted(voter) {
            return Err(reject(VoterRejection::AlreadyVoted));
        }

        if let Ballot::For(target) = ballot {
            let bad_target = |reason| EngineError::InvalidTarget { target, reason };
            if target == voter {
                return Err(bad_target(TargetRejection::SelfTarget));
            }
            if session.roster().get(target).is_none() {
                return Err(bad_target(TargetRejection::UnknownPlayer));
            }
            if !session.roster().is_alive(target) {
                return Err(bad_target(TargetRejection::Dead));
            }
        }

        self.ballots.push(CastBallot { voter, ballot });
        Ok(())
    }

    /// Tally the ballots and apply the elimination.
    ///
    /// Fails with `ActionsPending` while a voter has not cast a ballot.
    pub fn resolve(&mut self, session: &mut GameSession) -> Result<DayResult> {
        match self.stage {
            VoteStage::Resolved => return Err(EngineError::AlreadyResolved),
            VoteStage::Skipped => {
                self.stage = VoteStage::Resolved;
                return Ok(DayResult {
                    round: self.round,
                    outcome: DayOutcome::InsufficientPlayers,
                    tie: false,
                    tied: Vec::new(),
                    tally: FxHashMap::default(),
                    ballots: Vec::new(),
                });
            }
            VoteStage::Voting | VoteStage::Tallying => {}
        }

        let pending = self.pending().count();
        if pending > 0 {
            return Err(EngineError::ActionsPending { pending });
        }

        self.stage = VoteStage::Tallying;
        let tally = tally(&self.ballots);
        let max = tally.values().copied().max().unwrap_or(0);

        let mut tie = false;
        let mut tied = Vec::new();
        let outcome = if max == 0 {
            DayOutcome::NoElimination
        } else {
            let mut leaders: Vec<_> = tally
                .iter()
                .filter(|&(_, &votes)| votes == max)
                .map(|(&player, _)| player)
                .collect();
            leaders.sort_unstable();

            let chosen = if leaders.len() > 1 {
                tie = true;
                let pick = session.rng.choose(&leaders).copied();
                info!("day {}: tie between {:?}, drew {:?}", self.round, leaders, pick);
                tied = leaders.clone();
                pick
            } else {
                leaders.first().copied()
            };

            match chosen {
                Some(player) => {
                    session.eliminate(player, EliminationCause::Day);
                    DayOutcome::Eliminated { player, votes: max }
                }
                None => DayOutcome::NoElimination,
            }
        };

        self.stage = VoteStage::Resolved;
        info!("day {} resolved: {:?}", self.round, outcome);

        Ok(DayResult {
            round: self.round,
            outcome,
            tie,
            tied,
            tally,
            ballots: self.ballots.clone(),
        })
    }
}

/// Votes per candidate; abstentions are not counted.
fn tally(ballots: &[CastBallot]) -> FxHashMap<PlayerId, u32> {
    let mut counts = FxHashMap::default();
    for target in ballots.iter().filter_map(|b| b.ballot.target()) {
        *counts.entry(target).or_insert(0) += 1;
    }
    counts
}
