//! Cross-chain call relay ("anyCall") logic, independent of the chain it runs on.
//!
//! The relay is split into four components, each an extension trait over [`RelayHost`]:
//!
//! - [`AuthorityRegistry`]: the execution authority and its two-phase, timelocked transfer.
//! - [`PermissionStore`]: per-route whitelist plus a requester blacklist.
//! - [`BudgetLedger`]: prepaid execution budgets, premium and accrued fees.
//! - [`ExecutionCore`]: call requests, authority executions, call context and fallbacks.
//!
//! The Stylus contract implements [`RelayHost`] over persistent storage; tests use the
//! in-memory [`mock::MockRelay`].

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod abi;
pub mod authority;
pub mod budget;
pub mod constants;
pub mod errors;
pub mod events;
pub mod execution;
pub mod host;
pub mod permissions;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use authority::AuthorityRegistry;
pub use budget::{execution_cost, BudgetLedger};
pub use errors::RelayError;
pub use events::RelayEvent;
pub use execution::ExecutionCore;
pub use host::RelayHost;
pub use permissions::PermissionStore;
pub use types::{AuthorityState, BatchCall, CallContext, CallOutcome, FeeData};
