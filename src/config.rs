//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use crate::contract::{ContentLimits, ContractParams, ScoreRewards};
use crate::principal::Principal;
use serde::Deserialize;
use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read contract settings: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
    /// Largest accepted request body, in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to 0.0.0.0 for Docker
            port: 3000,
            max_body_bytes: 64 * 1024,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        }
    }
}

/// Contract deployment and governance parameters (`CONTRACT_*` variables)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Deployer address; also the principal allowed to reject proposals
    pub address: String,
    pub name: String,
    pub quorum: u64,
    pub max_word_length: usize,
    pub max_definition_length: usize,
    pub max_description_length: usize,
    pub max_term_length: usize,
    pub max_language_length: usize,
    pub word_score: u64,
    pub grammatical_rule_score: u64,
    pub phonetic_change_score: u64,
    pub translation_score: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        let limits = ContentLimits::default();
        let rewards = ScoreRewards::default();
        Self {
            address: "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".to_string(),
            name: "language-evolution".to_string(),
            quorum: 1,
            max_word_length: limits.word,
            max_definition_length: limits.definition,
            max_description_length: limits.description,
            max_term_length: limits.term,
            max_language_length: limits.language,
            word_score: rewards.word,
            grammatical_rule_score: rewards.grammatical_rule,
            phonetic_change_score: rewards.phonetic_change,
            translation_score: rewards.translation,
        }
    }
}

impl ContractConfig {
    /// Validate and convert into contract parameters
    pub fn params(&self) -> Result<ContractParams, ConfigError> {
        let owner = Principal::parse(&self.address)
            .map_err(|e| ConfigError::InvalidValue(format!("CONTRACT_ADDRESS: {}", e)))?;

        if self.quorum == 0 {
            return Err(ConfigError::InvalidValue(
                "CONTRACT_QUORUM must be at least 1".to_string(),
            ));
        }

        let limits = ContentLimits {
            word: self.max_word_length,
            definition: self.max_definition_length,
            description: self.max_description_length,
            term: self.max_term_length,
            language: self.max_language_length,
        };
        if [limits.word, limits.definition, limits.description, limits.term, limits.language].contains(&0) {
            return Err(ConfigError::InvalidValue(
                "Content length limits must be positive".to_string(),
            ));
        }

        Ok(ContractParams {
            owner,
            quorum: self.quorum,
            limits,
            rewards: ScoreRewards {
                word: self.word_score,
                grammatical_rule: self.grammatical_rule_score,
                phonetic_change: self.phonetic_change_score,
                translation: self.translation_score,
            },
        })
    }

    /// Fully qualified contract identifier, `<address>.<name>`
    pub fn identifier(&self) -> String {
        format!("{}.{}", self.address, self.name)
    }
}

/// Complete application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub contract: ContractConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: std::env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
        };

        let cors = CorsConfig {
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|| CorsConfig::default().allowed_origins),
        };

        let contract = Self::load_contract(config::Environment::with_prefix("CONTRACT"))?;
        contract.params()?;

        Ok(Self {
            server,
            cors,
            contract,
        })
    }

    fn load_contract(source: config::Environment) -> Result<ContractConfig, ConfigError> {
        let contract = config::Config::builder()
            .add_source(source.try_parsing(true))
            .build()?
            .try_deserialize::<ContractConfig>()?;
        Ok(contract)
    }
}
