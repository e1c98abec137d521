//! Balance acquirer.
//!
//! Drains an ordered holder list into a recipient until the desired
//! amount is reached or the holders run out. Each holder either gives
//! everything it has (when that is not enough) or exactly what is still
//! missing (and then the run stops). Rejected transfers are logged and
//! skipped; any other ledger error aborts the run.

use alloy::primitives::{Address, U256};
use tracing::{debug, info, warn};

use crate::ledger::{LedgerError, TokenLedger};
use crate::types::{
    AcquisitionReport, AcquisitionTarget, HolderAttempt, HolderList, SkipReason, TransferOutcome,
};

/// Pull `target.desired` of `target.token` into `target.recipient` from
/// `holders`, in list order.
///
/// Never fails because the target was not met; check
/// [`AcquisitionReport::shortfall`] for that.
pub async fn acquire_balance<L>(
    ledger: &L,
    target: &AcquisitionTarget,
    holders: &HolderList,
) -> Result<AcquisitionReport, LedgerError>
where
    L: TokenLedger + ?Sized,
{
    let mut report = AcquisitionReport::empty(target.clone());

    if target.desired.is_zero() {
        debug!(token = %target.token, "Nothing to acquire");
        return Ok(report);
    }

    info!(
        token = %target.token,
        recipient = %target.recipient,
        desired = %target.desired,
        holders = holders.len(),
        "Acquiring balance from holders"
    );

    let mut remaining = target.desired;

    for &holder in holders.iter() {
        let balance = ledger.balance_of(target.token, holder).await?;

        if balance.is_zero() {
            debug!(%holder, "Holder has no balance, skipping");
            report.attempts.push(HolderAttempt {
                holder,
                balance,
                outcome: TransferOutcome::Skipped {
                    reason: SkipReason::EmptyBalance,
                },
            });
            continue;
        }

        // Take everything when it is not enough, otherwise just the rest.
        let covers_rest = remaining <= balance;
        let amount = if covers_rest { remaining } else { balance };

        debug!(%holder, %balance, %amount, covers_rest, "Attempting transfer");

        let outcome =
            match transfer_as(ledger, target.token, holder, target.recipient, amount).await {
                Ok(()) => {
                    remaining -= amount;
                    TransferOutcome::Transferred { amount }
                }
                Err(e) if e.is_recoverable() => {
                    warn!(%holder, error = %e, "Holder transfer rejected, trying next holder");
                    TransferOutcome::Rejected {
                        reason: e.to_string(),
                    }
                }
                Err(e) => return Err(e),
            };

        let done = covers_rest && !outcome.is_rejected();
        report.attempts.push(HolderAttempt {
            holder,
            balance,
            outcome,
        });
        if done {
            break;
        }
    }

    report.acquired = target.desired - remaining;

    if report.is_complete() {
        info!(token = %target.token, acquired = %report.acquired, "Target acquired");
    } else {
        warn!(
            token = %target.token,
            acquired = %report.acquired,
            shortfall = %report.shortfall(),
            "Holders exhausted before target was met"
        );
    }

    Ok(report)
}

/// One transfer inside its own impersonation scope.
///
/// The scope is always closed, whatever the transfer returned. A failure
/// to open or close it is a harness failure and wins over the transfer
/// result.
async fn transfer_as<L>(
    ledger: &L,
    token: Address,
    holder: Address,
    recipient: Address,
    amount: U256,
) -> Result<(), LedgerError>
where
    L: TokenLedger + ?Sized,
{
    ledger.impersonate(holder).await?;
    let result = ledger.transfer(token, holder, recipient, amount).await;
    ledger.stop_impersonating(holder).await?;
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
