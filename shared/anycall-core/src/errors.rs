use alloy_primitives::{Address, U256};

/// Reasons a relay operation is rejected.
///
/// Every variant aborts the whole operation; the contract maps each one onto a Solidity
/// custom error so the transaction reverts without partial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Caller is not the current authority.
    OnlyAuthority { caller: Address },
    /// Caller is not the pending authority.
    OnlyPendingAuthority { caller: Address },
    ZeroAddress,
    /// Execution on behalf of the relay itself.
    SelfCall,
    /// Destination or source chain equals the local chain.
    ForbiddenChain { chain_id: U256 },
    /// Authority transfer applied before its effective time.
    TimelockPending { effective_at: u64 },
    Blacklisted { account: Address },
    NotWhitelisted { from: Address, to: Address, chain_id: U256 },
    /// Permission update that would not change anything.
    NothingChanged,
    InsufficientBudget { account: Address, balance: U256, required: U256 },
    Overflow,
    TransferFailed { to: Address, amount: U256 },
    /// Execution entered while another execution holds the lock.
    Reentrant,
    /// Parallel batch arrays of different lengths.
    LengthMismatch,
}
