//! Translation index (append-only)

use crate::clarity::ClarityValue;
use crate::contract::error::ContractError;
use crate::contract::registry::check_field;
use crate::contract::ContentLimits;
use crate::principal::Principal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub id: u64,
    pub source: String,
    pub target: String,
    pub language: String,
    pub contributor: Principal,
    pub added_at: u64,
}

impl Translation {
    pub fn to_value(&self) -> ClarityValue {
        ClarityValue::tuple([
            ("id", ClarityValue::uint(self.id)),
            ("source", ClarityValue::StringAscii { value: self.source.clone() }),
            ("target", ClarityValue::StringAscii { value: self.target.clone() }),
            ("language", ClarityValue::StringAscii { value: self.language.clone() }),
            ("contributor", ClarityValue::from(self.contributor.clone())),
            ("added-at", ClarityValue::uint(self.added_at)),
        ])
    }
}

#[derive(Debug, Default)]
pub struct TranslationIndex {
    entries: Vec<Translation>,
}

impl TranslationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        source: String,
        target: String,
        language: String,
        contributor: &Principal,
        height: u64,
        limits: &ContentLimits,
    ) -> Result<u64, ContractError> {
        check_field("source", &source, limits.term)?;
        check_field("target", &target, limits.term)?;
        check_field("language", &language, limits.language)?;

        let id = self.entries.len() as u64 + 1;
        self.entries.push(Translation {
            id,
            source,
            target,
            language,
            contributor: contributor.clone(),
            added_at: height,
        });
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Result<&Translation, ContractError> {
        id.checked_sub(1)
            .and_then(|idx| self.entries.get(idx as usize))
            .ok_or_else(|| ContractError::NotFound(format!("translation #{}", id)))
    }

    pub fn count(&self) -> u64 {
        self.entries.len() as u64
    }
}
