//! Mock ledger for integration testing.
//!
//! Provides a deterministic `TokenLedger` implementation that tracks
//! balances, impersonation and every call made against it — all in-memory
//! with no node required.

#![allow(dead_code)]

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use forkfund::ledger::{LedgerError, TokenLedger};

/// A ledger call, as recorded by `MockLedger`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    BalanceOf { token: Address, holder: Address },
    Impersonate(Address),
    StopImpersonating(Address),
    Transfer {
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    },
}

/// In-memory ERC20 ledger with Anvil-style impersonation.
///
/// Transfers only go through while the sender is impersonated, the same
/// way an unsigned `eth_sendTransaction` behaves on a fork.
#[derive(Default)]
pub struct MockLedger {
    balances: Mutex<HashMap<(Address, Address), U256>>,
    impersonating: Mutex<HashSet<Address>>,
    /// Holders whose transfers revert (e.g. a USDC blacklist).
    blocked: Mutex<HashSet<Address>>,
    /// Holders whose balance query fails at the transport level.
    unreachable: Mutex<HashSet<Address>>,
    calls: Mutex<Vec<LedgerCall>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&self, token: Address, holder: Address, amount: u64) {
        self.balances
            .lock()
            .unwrap()
            .insert((token, holder), U256::from(amount));
    }

    pub fn block(&self, holder: Address) {
        self.blocked.lock().unwrap().insert(holder);
    }

    pub fn make_unreachable(&self, holder: Address) {
        self.unreachable.lock().unwrap().insert(holder);
    }

    pub fn balance(&self, token: Address, holder: Address) -> U256 {
        self.balances
            .lock()
            .unwrap()
            .get(&(token, holder))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    pub fn calls(&self) -> Vec<LedgerCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn transfers(&self) -> Vec<LedgerCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, LedgerCall::Transfer { .. }))
            .collect()
    }

    pub fn active_impersonations(&self) -> usize {
        self.impersonating.lock().unwrap().len()
    }

    fn record(&self, call: LedgerCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TokenLedger for MockLedger {
    async fn balance_of(&self, token: Address, holder: Address) -> Result<U256, LedgerError> {
        self.record(LedgerCall::BalanceOf { token, holder });
        if self.unreachable.lock().unwrap().contains(&holder) {
            return Err(LedgerError::Transport("connection refused".into()));
        }
        Ok(self.balance(token, holder))
    }

    async fn impersonate(&self, holder: Address) -> Result<(), LedgerError> {
        self.record(LedgerCall::Impersonate(holder));
        self.impersonating.lock().unwrap().insert(holder);
        Ok(())
    }

    async fn stop_impersonating(&self, holder: Address) -> Result<(), LedgerError> {
        self.record(LedgerCall::StopImpersonating(holder));
        self.impersonating.lock().unwrap().remove(&holder);
        Ok(())
    }

    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.record(LedgerCall::Transfer {
            token,
            from,
            to,
            amount,
        });

        if !self.impersonating.lock().unwrap().contains(&from) {
            return Err(LedgerError::Malformed(format!(
                "No signer available for {from}"
            )));
        }
        if self.blocked.lock().unwrap().contains(&from) {
            return Err(LedgerError::Rejected {
                holder: from,
                reason: "execution reverted: Blacklistable: account is blacklisted".into(),
            });
        }

        let mut balances = self.balances.lock().unwrap();
        let from_balance = balances.get(&(token, from)).copied().unwrap_or(U256::ZERO);
        if from_balance < amount {
            return Err(LedgerError::Rejected {
                holder: from,
                reason: "execution reverted: ERC20: transfer amount exceeds balance".into(),
            });
        }
        balances.insert((token, from), from_balance - amount);
        let to_balance = balances.get(&(token, to)).copied().unwrap_or(U256::ZERO);
        balances.insert((token, to), to_balance + amount);
        Ok(())
    }
}
