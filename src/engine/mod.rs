//! Funding engine.
//!
//! `acquirer` drains a holder list for one token; `funder` runs it across
//! a whole plan and checks the recipient's balances.

pub mod acquirer;
pub mod funder;

pub use acquirer::acquire_balance;
pub use funder::{Funder, FundingPlan, PlanEntry};
