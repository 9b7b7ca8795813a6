//! Ledger principals
//!
//! Standard account addresses as used by the ledger. Only the shape of the
//! address is checked here; signatures and checksums belong to the chain.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// `S` + network/version char + c32 body (c32 has no I, L, O or U)
static STANDARD_PRINCIPAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^S[PMTN][0-9A-HJKMNP-TV-Z]{38,39}$").expect("principal pattern is valid")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid principal '{0}': expected a standard address such as ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM")]
pub struct InvalidPrincipal(pub String);

/// A validated standard principal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    pub fn parse(address: impl Into<String>) -> Result<Self, InvalidPrincipal> {
        let address = address.into();
        if STANDARD_PRINCIPAL.is_match(&address) {
            Ok(Self(address))
        } else {
            Err(InvalidPrincipal(address))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Principal {
    type Err = InvalidPrincipal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Principal {
    type Error = InvalidPrincipal;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Principal> for String {
    fn from(principal: Principal) -> Self {
        principal.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
