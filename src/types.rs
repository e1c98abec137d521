//! Shared types for FORKFUND.
//!
//! These types form the data model used across the engine, ledger and
//! storage modules. Amounts are always `U256` in the token's base units.

use alloy::primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Holder list
// ---------------------------------------------------------------------------

/// Ordered list of addresses known to hold a large balance of a token.
///
/// Order is draw priority. The list is not required to be sorted by
/// balance, and duplicates are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderList(Vec<Address>);

impl HolderList {
    pub fn new(holders: Vec<Address>) -> Self {
        Self(holders)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Address>> for HolderList {
    fn from(holders: Vec<Address>) -> Self {
        Self(holders)
    }
}

impl From<&[Address]> for HolderList {
    fn from(holders: &[Address]) -> Self {
        Self(holders.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Acquisition target
// ---------------------------------------------------------------------------

/// What a single acquisition run is trying to achieve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionTarget {
    pub token: Address,
    pub recipient: Address,
    /// Desired amount in token base units.
    pub desired: U256,
}

impl AcquisitionTarget {
    pub fn new(token: Address, recipient: Address, desired: U256) -> Self {
        Self {
            token,
            recipient,
            desired,
        }
    }
}

// ---------------------------------------------------------------------------
// Transfer outcome
// ---------------------------------------------------------------------------

/// Why a holder was passed over without a transfer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    EmptyBalance,
}

/// Per-holder result of one acquisition step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransferOutcome {
    Transferred { amount: U256 },
    Rejected { reason: String },
    Skipped { reason: SkipReason },
}

impl TransferOutcome {
    pub fn transferred(&self) -> U256 {
        match self {
            TransferOutcome::Transferred { amount } => *amount,
            _ => U256::ZERO,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, TransferOutcome::Rejected { .. })
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferOutcome::Transferred { amount } => write!(f, "transferred {amount}"),
            TransferOutcome::Rejected { reason } => write!(f, "rejected: {reason}"),
            TransferOutcome::Skipped { reason } => write!(f, "skipped ({reason:?})"),
        }
    }
}

/// A single holder's entry in an acquisition report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderAttempt {
    pub holder: Address,
    /// Balance observed right before the attempt.
    pub balance: U256,
    pub outcome: TransferOutcome,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Result of draining a holder list for one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionReport {
    pub target: AcquisitionTarget,
    pub acquired: U256,
    /// Holders touched, in processing order.
    pub attempts: Vec<HolderAttempt>,
}

impl AcquisitionReport {
    pub fn empty(target: AcquisitionTarget) -> Self {
        Self {
            target,
            acquired: U256::ZERO,
            attempts: Vec::new(),
        }
    }

    /// How much of the desired amount was not acquired.
    pub fn shortfall(&self) -> U256 {
        self.target.desired.saturating_sub(self.acquired)
    }

    pub fn is_complete(&self) -> bool {
        self.acquired >= self.target.desired
    }

    pub fn rejected(&self) -> impl Iterator<Item = &HolderAttempt> {
        self.attempts.iter().filter(|a| a.outcome.is_rejected())
    }
}

impl fmt::Display for AcquisitionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "token {} → {}: acquired {}/{} from {} holders ({} rejected)",
            self.target.token,
            self.target.recipient,
            self.acquired,
            self.target.desired,
            self.attempts.len(),
            self.rejected().count(),
        )
    }
}

/// Funding result for one token of a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenFunding {
    pub symbol: String,
    pub balance_before: U256,
    pub balance_after: U256,
    pub acquisition: AcquisitionReport,
    /// `Some(true)` if the recipient's balance moved by exactly the
    /// acquired amount. `None` when the check was not requested.
    pub verified: Option<bool>,
}

/// Result of a full funding run across all configured tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub tokens: Vec<TokenFunding>,
}

impl FundingReport {
    /// Tokens whose acquisition fell short of the desired amount.
    pub fn shortfalls(&self) -> Vec<&TokenFunding> {
        self.tokens
            .iter()
            .filter(|t| !t.acquisition.is_complete())
            .collect()
    }

    /// Tokens whose exact-balance check failed.
    pub fn verification_failures(&self) -> Vec<&TokenFunding> {
        self.tokens
            .iter()
            .filter(|t| t.verified == Some(false))
            .collect()
    }

    pub fn is_fully_funded(&self) -> bool {
        self.shortfalls().is_empty() && self.verification_failures().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
