//! Day phase: one ballot per living player, then a single tally.

pub mod vote;

pub use vote::{Ballot, CastBallot, DayOutcome, DayResult, DayVote, VoteStage};
