//! Proposal data models
//!
//! Words, grammatical rules and phonetic changes share one lifecycle:
//! proposed, then approved or rejected. Finalized proposals never change.

use crate::clarity::ClarityValue;
use crate::principal::Principal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three kinds of proposals, each with its own id sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalKind {
    Word,
    GrammaticalRule,
    PhoneticChange,
}

impl ProposalKind {
    pub const ALL: [ProposalKind; 3] = [
        ProposalKind::Word,
        ProposalKind::GrammaticalRule,
        ProposalKind::PhoneticChange,
    ];

    /// Suffix used in contract function names (`vote-word`, `get-phonetic-change`, ...)
    pub fn slug(&self) -> &'static str {
        match self {
            ProposalKind::Word => "word",
            ProposalKind::GrammaticalRule => "grammatical-rule",
            ProposalKind::PhoneticChange => "phonetic-change",
        }
    }

    /// Human-readable reference such as `word #3`
    pub fn label(&self, id: u64) -> String {
        format!("{} #{}", self, id)
    }
}

impl fmt::Display for ProposalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposalKind::Word => f.write_str("word"),
            ProposalKind::GrammaticalRule => f.write_str("grammatical rule"),
            ProposalKind::PhoneticChange => f.write_str("phonetic change"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Open for votes
    #[default]
    Proposed,
    Approved,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Proposed => "proposed",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Rejected => "rejected",
        }
    }

    pub fn is_final(&self) -> bool {
        !matches!(self, ProposalStatus::Proposed)
    }
}

/// What is being proposed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ProposalBody {
    Word { word: String, definition: String },
    GrammaticalRule { description: String },
    PhoneticChange { description: String },
}

impl ProposalBody {
    pub fn kind(&self) -> ProposalKind {
        match self {
            ProposalBody::Word { .. } => ProposalKind::Word,
            ProposalBody::GrammaticalRule { .. } => ProposalKind::GrammaticalRule,
            ProposalBody::PhoneticChange { .. } => ProposalKind::PhoneticChange,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: u64,
    pub body: ProposalBody,
    pub author: Principal,
    pub votes: u64,
    pub status: ProposalStatus,
    /// Block height of the proposing transaction
    pub proposed_at: u64,
    pub finalized_at: Option<u64>,
    pub finalized_by: Option<Principal>,
}

impl Proposal {
    pub fn new(id: u64, body: ProposalBody, author: Principal, proposed_at: u64) -> Self {
        Self {
            id,
            body,
            author,
            votes: 0,
            status: ProposalStatus::Proposed,
            proposed_at,
            finalized_at: None,
            finalized_by: None,
        }
    }

    pub fn kind(&self) -> ProposalKind {
        self.body.kind()
    }

    pub fn label(&self) -> String {
        self.kind().label(self.id)
    }

    pub(crate) fn finalize(&mut self, status: ProposalStatus, by: &Principal, height: u64) {
        self.status = status;
        self.finalized_at = Some(height);
        self.finalized_by = Some(by.clone());
    }

    /// Tuple returned by the `get-*` read-only functions
    pub fn to_value(&self) -> ClarityValue {
        let mut fields = vec![
            ("id", ClarityValue::uint(self.id)),
            ("author", ClarityValue::from(self.author.clone())),
            ("votes", ClarityValue::uint(self.votes)),
            (
                "status",
                ClarityValue::StringAscii {
                    value: self.status.as_str().to_string(),
                },
            ),
            ("proposed-at", ClarityValue::uint(self.proposed_at)),
        ];
        match &self.body {
            ProposalBody::Word { word, definition } => {
                fields.push(("word", ClarityValue::StringAscii { value: word.clone() }));
                fields.push((
                    "definition",
                    ClarityValue::StringAscii {
                        value: definition.clone(),
                    },
                ));
            }
            ProposalBody::GrammaticalRule { description }
            | ProposalBody::PhoneticChange { description } => {
                fields.push((
                    "description",
                    ClarityValue::StringAscii {
                        value: description.clone(),
                    },
                ));
            }
        }
        ClarityValue::tuple(fields)
    }
}
