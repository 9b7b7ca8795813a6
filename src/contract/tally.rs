//! Voting tally
//!
//! One vote per (proposal, voter). Counts live on the proposal itself, the
//! tally only remembers who has voted.

use crate::contract::error::ContractError;
use crate::contract::proposal::{Proposal, ProposalKind};
use crate::principal::Principal;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct VotingTally {
    ballots: HashSet<(ProposalKind, u64, Principal)>,
}

impl VotingTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `voter`'s vote on an open proposal and return the new count
    pub fn cast(&mut self, proposal: &mut Proposal, voter: &Principal) -> Result<u64, ContractError> {
        if proposal.status.is_final() {
            // closed proposals are no longer votable
            return Err(ContractError::NotFound(format!("open {}", proposal.label())));
        }

        let key = (proposal.kind(), proposal.id, voter.clone());
        if self.ballots.contains(&key) {
            return Err(ContractError::AlreadyVoted {
                proposal: proposal.label(),
                voter: voter.clone(),
            });
        }

        self.ballots.insert(key);
        proposal.votes += 1;
        Ok(proposal.votes)
    }

    pub fn has_voted(&self, kind: ProposalKind, id: u64, voter: &Principal) -> bool {
        self.ballots.contains(&(kind, id, voter.clone()))
    }
}
