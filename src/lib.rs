//! Lexicon Ledger - governance for an evolving language
//!
//! Contributors propose words, grammatical rules and phonetic changes, vote
//! on them, and approve them once quorum is reached. Approved words become
//! transferable property; translations and approvals build contributor scores.
//!
//! The [`contract`] module holds the state machine. [`client`] is the typed
//! facade over any [`client::LedgerClient`]; [`ledger`] provides the in-process
//! one served over HTTP by [`routes`].

pub mod clarity;
pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod ledger;
pub mod models;
pub mod principal;
pub mod routes;
pub mod state;
