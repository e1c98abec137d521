//! Funding plan runner.
//!
//! Runs the acquirer once per token for a single recipient, recording the
//! recipient's balance on either side so the run can be checked
//! afterwards. A missed target is reported, never raised.

use alloy::primitives::{Address, U256};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::acquirer::acquire_balance;
use crate::ledger::{LedgerError, TokenLedger};
use crate::types::{AcquisitionTarget, FundingReport, HolderList, TokenFunding};

/// One token to fund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub symbol: String,
    pub token: Address,
    pub holders: HolderList,
    /// Amount in base units.
    pub desired: U256,
    /// Check that the recipient's balance moved by exactly the acquired
    /// amount.
    pub expect_exact_balance: bool,
}

/// Everything to fund for one recipient, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingPlan {
    pub recipient: Address,
    pub entries: Vec<PlanEntry>,
}

pub struct Funder<'a, L: TokenLedger + ?Sized> {
    ledger: &'a L,
}

impl<'a, L: TokenLedger + ?Sized> Funder<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    /// Fund every entry of `plan`, one token at a time.
    pub async fn run(&self, plan: &FundingPlan) -> Result<FundingReport, LedgerError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(
            %run_id,
            recipient = %plan.recipient,
            tokens = plan.entries.len(),
            "Funding run starting"
        );

        let mut tokens = Vec::with_capacity(plan.entries.len());
        for entry in &plan.entries {
            tokens.push(self.fund_one(plan.recipient, entry).await?);
        }

        let report = FundingReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            tokens,
        };

        info!(
            %run_id,
            funded = report.tokens.len() - report.shortfalls().len(),
            short = report.shortfalls().len(),
            "Funding run complete"
        );
        Ok(report)
    }

    async fn fund_one(
        &self,
        recipient: Address,
        entry: &PlanEntry,
    ) -> Result<TokenFunding, LedgerError> {
        let balance_before = self.ledger.balance_of(entry.token, recipient).await?;

        let target = AcquisitionTarget::new(entry.token, recipient, entry.desired);
        let acquisition = acquire_balance(self.ledger, &target, &entry.holders).await?;

        let balance_after = self.ledger.balance_of(entry.token, recipient).await?;

        let verified = entry.expect_exact_balance.then(|| {
            balance_before
                .checked_add(acquisition.acquired)
                .is_some_and(|expected| expected == balance_after)
        });

        if verified == Some(false) {
            warn!(
                symbol = %entry.symbol,
                before = %balance_before,
                after = %balance_after,
                acquired = %acquisition.acquired,
                "Recipient balance does not match acquired amount"
            );
        }

        info!(symbol = %entry.symbol, %acquisition, "Token funded");

        Ok(TokenFunding {
            symbol: entry.symbol.clone(),
            balance_before,
            balance_after,
            acquisition,
            verified,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
