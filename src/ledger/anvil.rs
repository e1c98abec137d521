//! Anvil fork ledger.
//!
//! Talks JSON-RPC to an Anvil node (either already running, or spawned
//! here as a mainnet fork). Transfers are sent unsigned through
//! `eth_sendTransaction`, which Anvil accepts for impersonated senders.
//!
//! Methods used:
//! - `eth_call` for `IERC20.balanceOf`
//! - `anvil_impersonateAccount` / `anvil_stopImpersonatingAccount`
//! - `eth_call` to dry-run `IERC20.transfer`, then `eth_sendTransaction` +
//!   `eth_getTransactionReceipt` to execute it

use alloy::network::ReceiptResponse as _;
use alloy::node_bindings::{Anvil, AnvilInstance};
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::ext::AnvilApi as _;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use alloy::transports::{RpcError, TransportError};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, info};

use super::{LedgerError, TokenLedger};

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// How long to wait for a transfer to be mined before giving up on the node.
const RECEIPT_TIMEOUT: Duration = Duration::from_secs(60);

/// Provider stack for impersonated sends.
///
/// Nonces are fetched fresh for every transaction. A cached nonce can run
/// ahead of the chain when a holder's transfer is rejected at gas
/// estimation, and the same holder may be drawn again for another token.
fn fork_provider(url: alloy::transports::http::reqwest::Url) -> DynProvider {
    ProviderBuilder::new()
        .disable_recommended_fillers()
        .with_gas_estimation()
        .with_simple_nonce_management()
        .fetch_chain_id()
        .connect_http(url)
        .erased()
}

/// Ledger backed by an Anvil node.
pub struct AnvilLedger {
    provider: DynProvider,
    /// Held so a spawned node lives exactly as long as the ledger.
    _anvil: Option<AnvilInstance>,
}

impl AnvilLedger {
    /// Wrap an existing provider. The node behind it must expose the
    /// `anvil_*` namespace.
    pub fn new(provider: impl Provider + 'static) -> Self {
        Self {
            provider: provider.erased(),
            _anvil: None,
        }
    }

    /// Attach to a running node at `rpc_url`.
    pub async fn connect(rpc_url: &str) -> Result<Self, LedgerError> {
        let url = rpc_url
            .parse()
            .map_err(|e| LedgerError::Malformed(format!("invalid rpc url {rpc_url}: {e}")))?;
        let provider = fork_provider(url);

        let block = provider.get_block_number().await.map_err(node_error)?;
        info!(rpc_url, block, "Connected to fork node");

        Ok(Self::new(provider))
    }

    /// Spawn a local Anvil process forking `fork_url`, optionally pinned
    /// to `fork_block`. Requires the `anvil` binary on `PATH`.
    pub async fn spawn_fork(
        fork_url: &SecretString,
        fork_block: Option<u64>,
    ) -> Result<Self, LedgerError> {
        let mut anvil = Anvil::new().fork(fork_url.expose_secret().clone());
        if let Some(block) = fork_block {
            anvil = anvil.fork_block_number(block);
        }
        let instance = anvil
            .try_spawn()
            .map_err(|e| LedgerError::Transport(format!("failed to spawn anvil: {e}")))?;

        let provider = fork_provider(instance.endpoint_url());
        let block = provider.get_block_number().await.map_err(node_error)?;
        info!(
            endpoint = %instance.endpoint(),
            block,
            "Spawned anvil fork"
        );

        Ok(Self {
            provider,
            _anvil: Some(instance),
        })
    }
}

// ---------------------------------------------------------------------------
// Error classification
// ---------------------------------------------------------------------------

/// Errors from node-level calls (impersonation, connection). A JSON-RPC
/// error here means the node is not an Anvil-compatible fork.
fn node_error(err: TransportError) -> LedgerError {
    match err {
        RpcError::ErrorResp(payload) => LedgerError::Malformed(payload.message.to_string()),
        other => LedgerError::Transport(other.to_string()),
    }
}

/// Errors from a read-only contract call. None of them are recoverable.
fn call_error(err: alloy::contract::Error) -> LedgerError {
    match err {
        alloy::contract::Error::TransportError(inner) => node_error(inner),
        other => LedgerError::Malformed(other.to_string()),
    }
}

/// Errors from sending a transfer. A JSON-RPC error response means the
/// chain refused this holder's transaction (revert during gas estimation
/// or submission); that is the only recoverable case.
fn send_error(holder: Address, err: alloy::contract::Error) -> LedgerError {
    match err {
        alloy::contract::Error::TransportError(RpcError::ErrorResp(payload)) => {
            LedgerError::Rejected {
                holder,
                reason: payload.message.to_string(),
            }
        }
        alloy::contract::Error::TransportError(other) => LedgerError::Transport(other.to_string()),
        other => LedgerError::Malformed(other.to_string()),
    }
}

/// Interpret the return data of a dry-run `transfer`.
///
/// Tokens that return nothing (USDT-style) count as success; a decoded
/// `false` means the token refused without reverting.
fn transfer_return(holder: Address, data: &Bytes) -> Result<(), LedgerError> {
    if data.is_empty() {
        return Ok(());
    }
    if data.len() < 32 {
        return Err(LedgerError::Malformed(format!(
            "transfer returned {} bytes, expected a bool",
            data.len()
        )));
    }
    if data[..32].iter().all(|b| *b == 0) {
        return Err(LedgerError::Rejected {
            holder,
            reason: "transfer returned false".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TokenLedger trait implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl TokenLedger for AnvilLedger {
    async fn balance_of(&self, token: Address, holder: Address) -> Result<U256, LedgerError> {
        IERC20::new(token, &self.provider)
            .balanceOf(holder)
            .call()
            .await
            .map_err(call_error)
    }

    async fn impersonate(&self, holder: Address) -> Result<(), LedgerError> {
        self.provider
            .anvil_impersonate_account(holder)
            .await
            .map_err(node_error)
    }

    async fn stop_impersonating(&self, holder: Address) -> Result<(), LedgerError> {
        self.provider
            .anvil_stop_impersonating_account(holder)
            .await
            .map_err(node_error)
    }

    async fn transfer(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let erc20 = IERC20::new(token, &self.provider);
        let call = erc20.transfer(to, amount).from(from);

        let simulated = call
            .call_raw()
            .await
            .map_err(|e| send_error(from, e))?;
        transfer_return(from, &simulated)?;

        let pending = call.send().await.map_err(|e| send_error(from, e))?;

        let receipt = pending
            .with_timeout(Some(RECEIPT_TIMEOUT))
            .get_receipt()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        if !receipt.status() {
            return Err(LedgerError::Rejected {
                holder: from,
                reason: format!("transaction {} reverted", receipt.transaction_hash),
            });
        }

        debug!(
            %token, %from, %to, %amount,
            tx = %receipt.transaction_hash,
            "Transfer mined"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use alloy::rpc::json_rpc::ErrorPayload;
    use alloy::transports::TransportErrorKind;

    const HOLDER: Address = address!("D6153F5af5679a75cC85D8974463545181f48772");

    fn revert(message: &'static str) -> TransportError {
        RpcError::ErrorResp(ErrorPayload {
            code: 3,
            message: message.into(),
            data: None,
        })
    }

    #[test]
    fn test_revert_on_send_is_rejection() {
        let err = alloy::contract::Error::TransportError(revert(
            "execution reverted: Blacklistable: account is blacklisted",
        ));
        match send_error(HOLDER, err) {
            LedgerError::Rejected { holder, reason } => {
                assert_eq!(holder, HOLDER);
                assert!(reason.contains("blacklisted"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_connection_failure_on_send_is_fatal() {
        let err = alloy::contract::Error::TransportError(TransportErrorKind::custom_str(
            "connection refused",
        ));
        let classified = send_error(HOLDER, err);
        assert!(matches!(classified, LedgerError::Transport(_)));
        assert!(!classified.is_recoverable());
    }

    #[test]
    fn test_revert_on_balance_query_is_fatal() {
        let err = alloy::contract::Error::TransportError(revert("execution reverted"));
        let classified = call_error(err);
        assert!(matches!(classified, LedgerError::Malformed(_)));
    }

    #[test]
    fn test_abi_failure_is_malformed() {
        let err = alloy::contract::Error::UnknownFunction("transfer".into());
        assert!(matches!(send_error(HOLDER, err), LedgerError::Malformed(_)));
    }

    #[test]
    fn test_false_return_is_rejection() {
        let data = Bytes::from(vec![0u8; 32]);
        assert_eq!(
            transfer_return(HOLDER, &data),
            Err(LedgerError::Rejected {
                holder: HOLDER,
                reason: "transfer returned false".into(),
            })
        );
    }

    #[test]
    fn test_true_or_empty_return_is_success() {
        let mut word = vec![0u8; 32];
        word[31] = 1;
        assert_eq!(transfer_return(HOLDER, &Bytes::from(word)), Ok(()));
        assert_eq!(transfer_return(HOLDER, &Bytes::new()), Ok(()));
    }

    #[test]
    fn test_truncated_return_is_malformed() {
        let data = Bytes::from(vec![0u8, 1]);
        assert!(matches!(
            transfer_return(HOLDER, &data),
            Err(LedgerError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_node_is_transport_error() {
        // Nothing listens on port 1.
        let ledger = AnvilLedger {
            provider: fork_provider("http://127.0.0.1:1".parse().unwrap()),
            _anvil: None,
        };
        let result = ledger.impersonate(HOLDER).await;
        assert!(matches!(result, Err(LedgerError::Transport(_))));
    }

    #[test]
    fn test_node_without_anvil_namespace() {
        let classified = node_error(revert("Method not found"));
        assert_eq!(
            classified,
            LedgerError::Malformed("Method not found".into())
        );
    }
}
