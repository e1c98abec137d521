//! FORKFUND — fork-chain token funding
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod ledger;
pub mod presets;
pub mod engine;
pub mod storage;
