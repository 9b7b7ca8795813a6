//! Application state management
//!
//! Contains shared state accessible across all handlers.

use crate::config::{ConfigError, ContractConfig};
use crate::ledger::LocalLedger;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Ledger holding the deployed contract (has internal locking)
    pub ledger: LocalLedger,

    /// Deployment settings the contract was created from
    pub contract: ContractConfig,
}

impl AppState {
    /// Deploy a fresh contract from its settings
    pub fn new(contract: ContractConfig) -> Result<Self, ConfigError> {
        let params = contract.params()?;
        Ok(Self {
            ledger: LocalLedger::new(params),
            contract,
        })
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
