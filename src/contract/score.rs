//! Contributor reputation

use crate::principal::Principal;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ScoreTracker {
    scores: HashMap<Principal, u64>,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&mut self, address: &Principal, amount: u64) -> u64 {
        let score = self.scores.entry(address.clone()).or_insert(0);
        *score = score.saturating_add(amount);
        *score
    }

    pub fn get(&self, address: &Principal) -> u64 {
        self.scores.get(address).copied().unwrap_or(0)
    }
}
