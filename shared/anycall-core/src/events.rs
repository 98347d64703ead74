//! Relay events as plain Rust values.
//!
//! The contract converts each variant into the matching `sol!` event in [`crate::abi`] when
//! logging; field order follows the on-chain event layout.

use alloc::vec::Vec;

use alloy_primitives::{Address, Bytes, U256};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayEvent {
    /// `LogAnyCall`: a single-target call request, observed by the relayer.
    CallRequested {
        from: Address,
        to: Address,
        data: Bytes,
        fallback: Address,
        to_chain_id: U256,
    },
    /// `LogAnyCallBatch`: a multi-target call request.
    BatchRequested {
        from: Address,
        to: Vec<Address>,
        data: Vec<Bytes>,
        callbacks: Vec<Address>,
        nonces: Vec<U256>,
        from_chain_id: U256,
        to_chain_id: U256,
    },
    /// `LogAnyExec`: outcome of an authority execution.
    Executed {
        from: Address,
        to: Address,
        data: Bytes,
        success: bool,
        result: Bytes,
        fallback: Address,
        from_chain_id: U256,
        to_chain_id: U256,
    },
    /// `LogAnyExecBatch`: aggregate outcome of a multi-target execution.
    BatchExecuted {
        from: Address,
        to: Vec<Address>,
        data: Vec<Bytes>,
        success: Vec<bool>,
        result: Vec<Bytes>,
        callbacks: Vec<Address>,
        nonces: Vec<U256>,
        from_chain_id: U256,
        to_chain_id: U256,
    },
    Deposit {
        account: Address,
        amount: U256,
    },
    Withdrawal {
        account: Address,
        amount: U256,
    },
    PermissionSet {
        from: Address,
        to: Address,
        to_chain_id: U256,
        allowed: bool,
    },
    BlacklistSet {
        account: Address,
        flag: bool,
    },
    AuthorityChangeProposed {
        old_authority: Address,
        new_authority: Address,
        effective_at: u64,
    },
    AuthorityChangeApplied {
        old_authority: Address,
        new_authority: Address,
        applied_at: u64,
    },
    PremiumUpdated {
        old_premium: U256,
        new_premium: U256,
    },
}
