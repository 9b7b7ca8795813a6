//! Language evolution contract
//!
//! The state machine behind every ledger call: proposals, votes, approvals,
//! word ownership, translations and contributor scores. All state lives in
//! [`LanguageContract`]; each public function validates everything it needs
//! before its first write, so a failed call leaves no trace.

pub mod abi;
mod approval;
pub mod error;
pub mod ownership;
pub mod proposal;
pub mod registry;
pub mod score;
pub mod tally;
pub mod translation;

pub use abi::{AbiError, PublicCall, ReadOnlyCall};
pub use error::ContractError;
pub use proposal::{Proposal, ProposalBody, ProposalKind, ProposalStatus};
pub use translation::Translation;

use crate::clarity::ClarityValue;
use crate::principal::Principal;
use ownership::OwnershipLedger;
use registry::ProposalRegistry;
use score::ScoreTracker;
use serde::{Deserialize, Serialize};
use tally::VotingTally;
use tracing::info;
use translation::TranslationIndex;

/// Maximum lengths of `string-ascii` content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLimits {
    pub word: usize,
    pub definition: usize,
    pub description: usize,
    pub term: usize,
    pub language: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            word: 50,
            definition: 500,
            description: 500,
            term: 100,
            language: 32,
        }
    }
}

/// Score credited to a contributor for each accepted contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRewards {
    pub word: u64,
    pub grammatical_rule: u64,
    pub phonetic_change: u64,
    pub translation: u64,
}

impl ScoreRewards {
    pub fn for_kind(&self, kind: ProposalKind) -> u64 {
        match kind {
            ProposalKind::Word => self.word,
            ProposalKind::GrammaticalRule => self.grammatical_rule,
            ProposalKind::PhoneticChange => self.phonetic_change,
        }
    }
}

impl Default for ScoreRewards {
    fn default() -> Self {
        Self {
            word: 10,
            grammatical_rule: 5,
            phonetic_change: 5,
            translation: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContractParams {
    /// Principal allowed to reject proposals
    pub owner: Principal,
    /// Votes needed before a proposal can be approved
    pub quorum: u64,
    pub limits: ContentLimits,
    pub rewards: ScoreRewards,
}

impl ContractParams {
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            quorum: 1,
            limits: ContentLimits::default(),
            rewards: ScoreRewards::default(),
        }
    }
}

/// Who is calling, and in which block
#[derive(Debug, Clone)]
pub struct TxContext {
    pub sender: Principal,
    pub block_height: u64,
}

pub struct LanguageContract {
    params: ContractParams,
    registry: ProposalRegistry,
    tally: VotingTally,
    ownership: OwnershipLedger,
    translations: TranslationIndex,
    scores: ScoreTracker,
}

impl LanguageContract {
    pub fn new(params: ContractParams) -> Self {
        Self {
            params,
            registry: ProposalRegistry::new(),
            tally: VotingTally::new(),
            ownership: OwnershipLedger::new(),
            translations: TranslationIndex::new(),
            scores: ScoreTracker::new(),
        }
    }

    pub fn params(&self) -> &ContractParams {
        &self.params
    }

    // =========================================================================
    // PUBLIC FUNCTIONS
    // =========================================================================

    /// Apply a decoded public call; the returned value is the call's `ok` result
    pub fn execute(&mut self, call: PublicCall, ctx: &TxContext) -> Result<ClarityValue, ContractError> {
        match call {
            PublicCall::Propose(body) => self.propose(body, ctx).map(ClarityValue::uint),
            PublicCall::Vote(kind, id) => self.vote(kind, id, ctx).map(ClarityValue::uint),
            PublicCall::Approve(kind, id) => self.approve(kind, id, ctx).map(|_| ClarityValue::from(true)),
            PublicCall::Reject(kind, id) => self.reject(kind, id, ctx).map(|_| ClarityValue::from(true)),
            PublicCall::TransferWordOwnership {
                word_id,
                recipient,
                percent,
            } => self
                .transfer_word_ownership(word_id, &recipient, percent, ctx)
                .map(|_| ClarityValue::from(true)),
            PublicCall::AddTranslation {
                source,
                target,
                language,
            } => self
                .add_translation(source, target, language, ctx)
                .map(ClarityValue::uint),
        }
    }

    pub fn propose(&mut self, body: ProposalBody, ctx: &TxContext) -> Result<u64, ContractError> {
        let kind = body.kind();
        let id = self
            .registry
            .propose(body, &ctx.sender, ctx.block_height, &self.params.limits)?;
        info!("📝 {} proposed by {}", kind.label(id), ctx.sender);
        Ok(id)
    }

    /// Cast the sender's vote; returns the proposal's new vote count
    pub fn vote(&mut self, kind: ProposalKind, id: u64, ctx: &TxContext) -> Result<u64, ContractError> {
        let proposal = self.registry.get_mut(kind, id)?;
        let votes = self.tally.cast(proposal, &ctx.sender)?;
        info!("🗳️  {} voted on {} ({} votes)", ctx.sender, kind.label(id), votes);
        Ok(votes)
    }

    pub fn transfer_word_ownership(
        &mut self,
        word_id: u64,
        recipient: &Principal,
        percent: u64,
        ctx: &TxContext,
    ) -> Result<(), ContractError> {
        if percent == 0 || percent > u64::from(ownership::FULL_SHARE) {
            return Err(ContractError::InvalidPercent(percent));
        }
        self.registry.get(ProposalKind::Word, word_id)?;
        self.ownership
            .transfer(word_id, &ctx.sender, recipient, percent)?;
        info!(
            "🔁 {}% of word #{} transferred from {} to {}",
            percent, word_id, ctx.sender, recipient
        );
        Ok(())
    }

    pub fn add_translation(
        &mut self,
        source: String,
        target: String,
        language: String,
        ctx: &TxContext,
    ) -> Result<u64, ContractError> {
        let id = self.translations.add(
            source,
            target,
            language,
            &ctx.sender,
            ctx.block_height,
            &self.params.limits,
        )?;
        self.scores
            .credit(&ctx.sender, self.params.rewards.translation);
        info!("🌐 translation #{} added by {}", id, ctx.sender);
        Ok(id)
    }

    // =========================================================================
    // READ-ONLY FUNCTIONS
    // =========================================================================

    /// Evaluate a read-only call; absent records come back as `none`
    pub fn evaluate(&self, call: &ReadOnlyCall) -> ClarityValue {
        match call {
            ReadOnlyCall::GetProposal(kind, id) => match self.proposal(*kind, *id) {
                Ok(proposal) => ClarityValue::some(proposal.to_value()),
                Err(_) => ClarityValue::none(),
            },
            ReadOnlyCall::GetWordOwnership { word_id, owner } => {
                match self.word_ownership(*word_id, owner) {
                    Ok(share) if share > 0 => ClarityValue::some(ClarityValue::tuple([(
                        "percentage",
                        ClarityValue::uint(u64::from(share)),
                    )])),
                    _ => ClarityValue::none(),
                }
            }
            ReadOnlyCall::GetTranslation(id) => match self.translation(*id) {
                Ok(translation) => ClarityValue::some(translation.to_value()),
                Err(_) => ClarityValue::none(),
            },
            ReadOnlyCall::GetUserScore(user) => ClarityValue::uint(self.user_score(user)),
            ReadOnlyCall::GetCount(kind) => ClarityValue::uint(self.count(*kind)),
        }
    }

    pub fn proposal(&self, kind: ProposalKind, id: u64) -> Result<&Proposal, ContractError> {
        self.registry.get(kind, id)
    }

    /// Share held by `owner`; 0 when they hold none
    pub fn word_ownership(&self, word_id: u64, owner: &Principal) -> Result<u8, ContractError> {
        self.registry.get(ProposalKind::Word, word_id)?;
        Ok(self.ownership.share(word_id, owner))
    }

    pub fn word_holders(&self, word_id: u64) -> Vec<(Principal, u8)> {
        self.ownership.holders(word_id)
    }

    pub fn translation(&self, id: u64) -> Result<&Translation, ContractError> {
        self.translations.get(id)
    }

    pub fn user_score(&self, user: &Principal) -> u64 {
        self.scores.get(user)
    }

    pub fn count(&self, kind: ProposalKind) -> u64 {
        self.registry.count(kind)
    }

    pub fn translation_count(&self) -> u64 {
        self.translations.count()
    }

    pub fn has_voted(&self, kind: ProposalKind, id: u64, voter: &Principal) -> bool {
        self.tally.has_voted(kind, id, voter)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::principal::fixtures::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn contract_with_quorum(quorum: u64) -> LanguageContract {
        LanguageContract::new(ContractParams {
            quorum,
            ..ContractParams::new(deployer())
        })
    }

    pub(crate) fn ctx(sender: Principal, block_height: u64) -> TxContext {
        TxContext {
            sender,
            block_height,
        }
    }

    pub(crate) fn new_word() -> ProposalBody {
        ProposalBody::Word {
            word: "newword".into(),
            definition: "definition of the new word".into(),
        }
    }

    #[test]
    fn test_end_to_end_word_lifecycle() {
        let mut contract = contract_with_quorum(1);

        let id = contract.propose(new_word(), &ctx(sender(), 1)).unwrap();
        contract
            .vote(ProposalKind::Word, id, &ctx(recipient(), 2))
            .unwrap();
        contract
            .approve(ProposalKind::Word, id, &ctx(sender(), 3))
            .unwrap();
        assert_eq!(contract.word_ownership(id, &sender()), Ok(100));

        contract
            .transfer_word_ownership(id, &recipient(), 50, &ctx(sender(), 4))
            .unwrap();
        assert_eq!(contract.word_ownership(id, &sender()), Ok(50));
        assert_eq!(contract.word_ownership(id, &recipient()), Ok(50));
        assert_eq!(contract.user_score(&sender()), ScoreRewards::default().word);
    }

    #[test]
    fn test_transfer_of_unknown_word() {
        let mut contract = contract_with_quorum(1);
        assert_eq!(
            contract.transfer_word_ownership(3, &recipient(), 10, &ctx(sender(), 1)),
            Err(ContractError::NotFound("word #3".into()))
        );
        assert_eq!(
            contract.transfer_word_ownership(3, &recipient(), 0, &ctx(sender(), 1)),
            Err(ContractError::InvalidPercent(0))
        );
    }

    #[test]
    fn test_transfer_of_unapproved_word() {
        let mut contract = contract_with_quorum(1);
        let id = contract.propose(new_word(), &ctx(sender(), 1)).unwrap();
        assert!(matches!(
            contract.transfer_word_ownership(id, &recipient(), 10, &ctx(sender(), 2)),
            Err(ContractError::InsufficientShare { held: 0, .. })
        ));
    }

    #[test]
    fn test_translation_credits_contributor() {
        let mut contract = contract_with_quorum(1);
        let id = contract
            .add_translation(
                "source".into(),
                "target".into(),
                "language".into(),
                &ctx(recipient(), 1),
            )
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(contract.translation(1).unwrap().contributor, recipient());
        assert_eq!(contract.user_score(&recipient()), 1);
        assert_eq!(contract.translation_count(), 1);
    }

    #[test]
    fn test_read_only_values() {
        let mut contract = contract_with_quorum(1);
        assert_eq!(
            contract.evaluate(&ReadOnlyCall::GetProposal(ProposalKind::Word, 1)),
            ClarityValue::none()
        );
        assert_eq!(
            contract.evaluate(&ReadOnlyCall::GetCount(ProposalKind::Word)),
            ClarityValue::uint(0)
        );

        let id = contract.propose(new_word(), &ctx(sender(), 1)).unwrap();
        let word = contract
            .evaluate(&ReadOnlyCall::GetProposal(ProposalKind::Word, id))
            .into_option()
            .unwrap();
        assert_eq!(word.get("word").and_then(ClarityValue::as_str), Some("newword"));
        assert_eq!(
            contract.evaluate(&ReadOnlyCall::GetWordOwnership {
                word_id: id,
                owner: sender(),
            }),
            ClarityValue::none()
        );
        assert_eq!(
            contract.evaluate(&ReadOnlyCall::GetUserScore(sender())),
            ClarityValue::uint(0)
        );
        assert_eq!(
            contract.evaluate(&ReadOnlyCall::GetTranslation(1)),
            ClarityValue::none()
        );
    }

    #[test]
    fn test_execute_results() {
        let mut contract = contract_with_quorum(1);
        let propose = PublicCall::Propose(ProposalBody::PhoneticChange {
            description: "New phonetic change description".into(),
        });
        assert_eq!(
            contract.execute(propose, &ctx(sender(), 1)),
            Ok(ClarityValue::uint(1))
        );
        assert_eq!(
            contract.execute(
                PublicCall::Vote(ProposalKind::PhoneticChange, 1),
                &ctx(sender(), 2)
            ),
            Ok(ClarityValue::uint(1))
        );
        assert_eq!(
            contract.execute(
                PublicCall::Approve(ProposalKind::PhoneticChange, 1),
                &ctx(sender(), 3)
            ),
            Ok(ClarityValue::from(true))
        );
    }
}
