//! Word ownership ledger
//!
//! Percentage shares keyed by (word id, owner). Shares of a word always sum
//! to 100 once the word is approved; transfers move shares, never mint them.

use crate::contract::error::ContractError;
use crate::principal::Principal;
use std::collections::HashMap;

pub const FULL_SHARE: u8 = 100;

#[derive(Debug, Default)]
pub struct OwnershipLedger {
    shares: HashMap<(u64, Principal), u8>,
}

impl OwnershipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give the whole word to `owner`
    pub fn grant(&mut self, word_id: u64, owner: &Principal) {
        self.shares.insert((word_id, owner.clone()), FULL_SHARE);
    }

    pub fn share(&self, word_id: u64, owner: &Principal) -> u8 {
        self.shares
            .get(&(word_id, owner.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Move `percent` of `word_id` from `from` to `to`
    pub fn transfer(
        &mut self,
        word_id: u64,
        from: &Principal,
        to: &Principal,
        percent: u64,
    ) -> Result<(), ContractError> {
        if percent == 0 || percent > u64::from(FULL_SHARE) {
            return Err(ContractError::InvalidPercent(percent));
        }
        let held = self.share(word_id, from);
        if u64::from(held) < percent {
            return Err(ContractError::InsufficientShare {
                word_id,
                holder: from.clone(),
                held,
                requested: percent,
            });
        }
        // percent <= held <= 100
        let amount = percent as u8;
        if from == to {
            return Ok(());
        }

        let remaining = held - amount;
        if remaining == 0 {
            self.shares.remove(&(word_id, from.clone()));
        } else {
            self.shares.insert((word_id, from.clone()), remaining);
        }
        *self.shares.entry((word_id, to.clone())).or_insert(0) += amount;
        Ok(())
    }

    /// All holders of a word, largest share first
    pub fn holders(&self, word_id: u64) -> Vec<(Principal, u8)> {
        let mut holders: Vec<_> = self
            .shares
            .iter()
            .filter(|((id, _), _)| *id == word_id)
            .map(|((_, owner), share)| (owner.clone(), *share))
            .collect();
        holders.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        holders
    }

    pub fn total(&self, word_id: u64) -> u32 {
        self.holders(word_id).iter().map(|(_, s)| u32::from(*s)).sum()
    }
}
