//! Approval gate
//!
//! Finalizes proposals. Approval needs the configured quorum; rejection is
//! reserved for the contract owner. Both outcomes are terminal.

use crate::contract::error::ContractError;
use crate::contract::proposal::{ProposalKind, ProposalStatus};
use crate::contract::{LanguageContract, TxContext};
use tracing::info;

impl LanguageContract {
    /// Approve an open proposal that has reached quorum
    ///
    /// Approving a word grants its author the full ownership share. Every
    /// approval credits the author's score.
    pub fn approve(&mut self, kind: ProposalKind, id: u64, ctx: &TxContext) -> Result<(), ContractError> {
        let quorum = self.params.quorum;
        let proposal = self.registry.get_mut(kind, id)?;

        if proposal.status.is_final() {
            return Err(ContractError::AlreadyFinalized(proposal.label()));
        }
        if proposal.votes < quorum {
            return Err(ContractError::ThresholdNotMet {
                proposal: proposal.label(),
                votes: proposal.votes,
                quorum,
            });
        }

        proposal.finalize(ProposalStatus::Approved, &ctx.sender, ctx.block_height);
        let author = proposal.author.clone();

        if kind == ProposalKind::Word {
            self.ownership.grant(id, &author);
        }
        let score = self
            .scores
            .credit(&author, self.params.rewards.for_kind(kind));

        info!(
            "✅ {} approved by {}; {} now has score {}",
            kind.label(id),
            ctx.sender,
            author,
            score
        );
        Ok(())
    }

    /// Reject an open proposal (contract owner only)
    pub fn reject(&mut self, kind: ProposalKind, id: u64, ctx: &TxContext) -> Result<(), ContractError> {
        if ctx.sender != self.params.owner {
            return Err(ContractError::Unauthorized {
                caller: ctx.sender.clone(),
                action: "reject proposals",
            });
        }

        let proposal = self.registry.get_mut(kind, id)?;
        if proposal.status.is_final() {
            return Err(ContractError::AlreadyFinalized(proposal.label()));
        }

        proposal.finalize(ProposalStatus::Rejected, &ctx.sender, ctx.block_height);
        info!("❌ {} rejected by {}", kind.label(id), ctx.sender);
        Ok(())
    }
}
