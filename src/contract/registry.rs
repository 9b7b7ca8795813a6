//! Proposal registry
//!
//! Owns the per-kind id counters and every proposal ever submitted.

use crate::clarity::check_ascii;
use crate::contract::error::ContractError;
use crate::contract::proposal::{Proposal, ProposalBody, ProposalKind};
use crate::contract::ContentLimits;
use crate::principal::Principal;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ProposalRegistry {
    proposals: HashMap<(ProposalKind, u64), Proposal>,
    counters: HashMap<ProposalKind, u64>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new proposal and return its id
    pub fn propose(
        &mut self,
        body: ProposalBody,
        author: &Principal,
        height: u64,
        limits: &ContentLimits,
    ) -> Result<u64, ContractError> {
        validate_body(&body, limits)?;

        let kind = body.kind();
        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        let id = *counter;

        self.proposals
            .insert((kind, id), Proposal::new(id, body, author.clone(), height));
        debug!("Registered {} by {}", kind.label(id), author);
        Ok(id)
    }

    pub fn get(&self, kind: ProposalKind, id: u64) -> Result<&Proposal, ContractError> {
        self.proposals
            .get(&(kind, id))
            .ok_or_else(|| ContractError::NotFound(kind.label(id)))
    }

    pub fn get_mut(&mut self, kind: ProposalKind, id: u64) -> Result<&mut Proposal, ContractError> {
        self.proposals
            .get_mut(&(kind, id))
            .ok_or_else(|| ContractError::NotFound(kind.label(id)))
    }

    /// Number of proposals ever submitted of this kind
    pub fn count(&self, kind: ProposalKind) -> u64 {
        self.counters.get(&kind).copied().unwrap_or(0)
    }
}

fn validate_body(body: &ProposalBody, limits: &ContentLimits) -> Result<(), ContractError> {
    match body {
        ProposalBody::Word { word, definition } => {
            check_field("word", word, limits.word)?;
            check_field("definition", definition, limits.definition)
        }
        ProposalBody::GrammaticalRule { description }
        | ProposalBody::PhoneticChange { description } => {
            check_field("description", description, limits.description)
        }
    }
}

pub(crate) fn check_field(field: &str, value: &str, max_len: usize) -> Result<(), ContractError> {
    check_ascii(value, max_len).map_err(|e| ContractError::InvalidContent(format!("{}: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::proposal::ProposalStatus;
    use crate::principal::fixtures::*;
    use pretty_assertions::assert_eq;

    fn word(word: &str, definition: &str) -> ProposalBody {
        ProposalBody::Word {
            word: word.into(),
            definition: definition.into(),
        }
    }

    #[test]
    fn test_propose_then_get_round_trips_content() {
        let mut registry = ProposalRegistry::new();
        let limits = ContentLimits::default();
        let body = word("newword", "definition of the new word");

        let id = registry.propose(body.clone(), &sender(), 1, &limits).unwrap();
        let stored = registry.get(ProposalKind::Word, id).unwrap();

        assert_eq!(stored.body, body);
        assert_eq!(stored.author, sender());
        assert_eq!(stored.status, ProposalStatus::Proposed);
        assert_eq!(stored.votes, 0);
    }

    #[test]
    fn test_ids_are_sequential_per_kind() {
        let mut registry = ProposalRegistry::new();
        let limits = ContentLimits::default();
        let rule = || ProposalBody::GrammaticalRule {
            description: "New grammatical rule description".into(),
        };

        assert_eq!(registry.propose(word("a", "b"), &sender(), 1, &limits).unwrap(), 1);
        assert_eq!(registry.propose(rule(), &sender(), 2, &limits).unwrap(), 1);
        assert_eq!(registry.propose(word("c", "d"), &sender(), 3, &limits).unwrap(), 2);
        assert_eq!(registry.propose(rule(), &sender(), 4, &limits).unwrap(), 2);

        assert_eq!(registry.count(ProposalKind::Word), 2);
        assert_eq!(registry.count(ProposalKind::GrammaticalRule), 2);
        assert_eq!(registry.count(ProposalKind::PhoneticChange), 0);
    }

    #[test]
    fn test_invalid_content_is_not_stored() {
        let mut registry = ProposalRegistry::new();
        let limits = ContentLimits {
            word: 5,
            ..ContentLimits::default()
        };

        let too_long = registry.propose(word("toolong", "x"), &sender(), 1, &limits);
        assert!(matches!(too_long, Err(ContractError::InvalidContent(_))));

        let empty = registry.propose(
            ProposalBody::PhoneticChange {
                description: String::new(),
            },
            &sender(),
            1,
            &limits,
        );
        assert!(matches!(empty, Err(ContractError::InvalidContent(_))));

        assert_eq!(registry.count(ProposalKind::Word), 0);
        assert_eq!(registry.count(ProposalKind::PhoneticChange), 0);
    }

    #[test]
    fn test_get_unknown_id() {
        let registry = ProposalRegistry::new();
        assert_eq!(
            registry.get(ProposalKind::PhoneticChange, 9),
            Err(ContractError::NotFound("phonetic change #9".into()))
        );
    }
}
