//! Contract error kinds
//!
//! Every failing public function aborts with one of these. Codes are stable
//! and mirror the `(err uN)` values a caller sees on chain.

use crate::principal::Principal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("{caller} is not allowed to {action}")]
    Unauthorized {
        caller: Principal,
        action: &'static str,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("{voter} has already voted on {proposal}")]
    AlreadyVoted { proposal: String, voter: Principal },

    #[error("{0} is already finalized")]
    AlreadyFinalized(String),

    #[error("{proposal} has {votes} votes, quorum is {quorum}")]
    ThresholdNotMet {
        proposal: String,
        votes: u64,
        quorum: u64,
    },

    #[error("{holder} holds {held}% of word #{word_id}, cannot transfer {requested}%")]
    InsufficientShare {
        word_id: u64,
        holder: Principal,
        held: u8,
        requested: u64,
    },

    #[error("percent must be between 1 and 100, got {0}")]
    InvalidPercent(u64),

    #[error("invalid content: {0}")]
    InvalidContent(String),
}

impl ContractError {
    /// Numeric abort code
    pub fn code(&self) -> u32 {
        match self {
            ContractError::Unauthorized { .. } => 100,
            ContractError::NotFound(_) => 101,
            ContractError::AlreadyVoted { .. } => 102,
            ContractError::AlreadyFinalized(_) => 103,
            ContractError::ThresholdNotMet { .. } => 104,
            ContractError::InsufficientShare { .. } => 105,
            ContractError::InvalidPercent(_) => 106,
            ContractError::InvalidContent(_) => 107,
        }
    }

    /// Machine-readable kind, used as the API error code
    pub fn kind(&self) -> &'static str {
        match self {
            ContractError::Unauthorized { .. } => "UNAUTHORIZED",
            ContractError::NotFound(_) => "NOT_FOUND",
            ContractError::AlreadyVoted { .. } => "ALREADY_VOTED",
            ContractError::AlreadyFinalized(_) => "ALREADY_FINALIZED",
            ContractError::ThresholdNotMet { .. } => "THRESHOLD_NOT_MET",
            ContractError::InsufficientShare { .. } => "INSUFFICIENT_SHARE",
            ContractError::InvalidPercent(_) => "INVALID_PERCENT",
            ContractError::InvalidContent(_) => "INVALID_CONTENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            ContractError::NotFound("word #1".into()),
            ContractError::AlreadyFinalized("word #1".into()),
            ContractError::InvalidPercent(0),
            ContractError::InvalidContent("empty".into()),
            ContractError::ThresholdNotMet {
                proposal: "word #1".into(),
                votes: 0,
                quorum: 1,
            },
        ];
        let codes: HashSet<u32> = errors.iter().map(ContractError::code).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_carries_context() {
        let err = ContractError::ThresholdNotMet {
            proposal: "grammatical rule #4".into(),
            votes: 2,
            quorum: 3,
        };
        assert_eq!(err.to_string(), "grammatical rule #4 has 2 votes, quorum is 3");
    }
}
