//! Value types shared by the relay components.

use alloc::vec::Vec;

use alloy_primitives::{Address, Bytes, U256};

use crate::errors::RelayError;

/// Current execution authority plus at most one pending transfer.
///
/// All three fields are written together through [`crate::RelayHost::store_authority`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthorityState {
    pub current: Address,
    /// `Address::ZERO` when no transfer is pending.
    pub pending: Address,
    /// Unix time from which `pending` may apply; zero when nothing is pending.
    pub effective_at: u64,
}

impl AuthorityState {
    pub fn has_pending(&self) -> bool {
        self.pending != Address::ZERO
    }
}

/// Fee record: accrued protocol fees and the per-gas premium, mutated as one unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeData {
    pub accrued_fees: U256,
    pub premium: U256,
}

/// Logical cross-chain caller visible to a destination contract during an execution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallContext {
    pub sender: Address,
    pub from_chain_id: U256,
}

impl CallContext {
    pub const EMPTY: Self = Self {
        sender: Address::ZERO,
        from_chain_id: U256::ZERO,
    };

    pub fn new(sender: Address, from_chain_id: U256) -> Self {
        Self {
            sender,
            from_chain_id,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// Result of one destination invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallOutcome {
    pub success: bool,
    /// Return data on success, revert data on failure.
    pub result: Bytes,
}

/// Parallel arrays describing a multi-target request or execution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchCall {
    pub to: Vec<Address>,
    pub data: Vec<Bytes>,
    pub callbacks: Vec<Address>,
    pub nonces: Vec<U256>,
}

impl BatchCall {
    pub fn len(&self) -> usize {
        self.to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to.is_empty()
    }

    /// Reject batches whose arrays disagree on length.
    pub fn validate(&self) -> Result<(), RelayError> {
        let n = self.to.len();
        if self.data.len() != n || self.callbacks.len() != n || self.nonces.len() != n {
            return Err(RelayError::LengthMismatch);
        }
        Ok(())
    }
}
