//! Ledger integrations.
//!
//! Defines the `TokenLedger` trait the acquisition engine drives, and the
//! error taxonomy that separates per-holder rejections from harness
//! failures. `anvil` provides the implementation for Anvil forks.

pub mod anvil;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

/// Errors surfaced by a ledger.
///
/// Only `Rejected` is a business condition. Everything else means the
/// harness itself is broken and must abort the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Transfer from {holder} rejected: {reason}")]
    Rejected { holder: Address, reason: String },

    #[error("Ledger transport error: {0}")]
    Transport(String),

    #[error("Malformed ledger request or response: {0}")]
    Malformed(String),
}

impl LedgerError {
    /// Whether the acquisition loop may log this and move to the next holder.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LedgerError::Rejected { .. })
    }
}

/// Abstraction over an ERC20-capable chain with sender impersonation.
///
/// Implementors must complete each call before returning; the engine
/// never issues two calls concurrently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Current `balanceOf(holder)` for `token`.
    async fn balance_of(&self, token: Address, holder: Address) -> Result<U256, LedgerError>;

    /// Allow transactions to be sent as `holder` without its key.
    async fn impersonate(&self, holder: Address) -> Result<(), LedgerError>;

    /// Revoke a previous `impersonate`.
    async fn stop_impersonating(&self, holder: Address) -> Result<(), LedgerError>;

    /// `token.transfer(to, amount)` sent from `from`.
    ///
    /// Returns `Rejected` when the chain refuses the transfer.
    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError>;
}
