//! Solidity custom errors returned by the relay.

use alloy_sol_types::sol;
use anycall_core::RelayError;
use stylus_sdk::{alloy_primitives::U256, stylus_proc::SolidityError};

sol! {
    error OnlyAuthority(address caller);
    error OnlyPendingAuthority(address caller);
    error ZeroAddress();
    error SelfCall();
    error ForbiddenChain(uint256 chainId);
    error TimelockPending(uint256 effectiveAt);
    error Blacklisted(address account);
    error NotWhitelisted(address from, address to, uint256 chainId);
    error NothingChanged();
    error InsufficientBudget(address account, uint256 balance, uint256 required);
    error Overflow();
    error TransferFailed(address to, uint256 amount);
    error Reentrant();
    error LengthMismatch();
}

#[derive(SolidityError)]
pub enum AnyCallError {
    OnlyAuthority(OnlyAuthority),
    OnlyPendingAuthority(OnlyPendingAuthority),
    ZeroAddress(ZeroAddress),
    SelfCall(SelfCall),
    ForbiddenChain(ForbiddenChain),
    TimelockPending(TimelockPending),
    Blacklisted(Blacklisted),
    NotWhitelisted(NotWhitelisted),
    NothingChanged(NothingChanged),
    InsufficientBudget(InsufficientBudget),
    Overflow(Overflow),
    TransferFailed(TransferFailed),
    Reentrant(Reentrant),
    LengthMismatch(LengthMismatch),
}

impl From<RelayError> for AnyCallError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::OnlyAuthority { caller } => Self::OnlyAuthority(OnlyAuthority { caller }),
            RelayError::OnlyPendingAuthority { caller } => {
                Self::OnlyPendingAuthority(OnlyPendingAuthority { caller })
            }
            RelayError::ZeroAddress => Self::ZeroAddress(ZeroAddress {}),
            RelayError::SelfCall => Self::SelfCall(SelfCall {}),
            RelayError::ForbiddenChain { chain_id } => {
                Self::ForbiddenChain(ForbiddenChain { chainId: chain_id })
            }
            RelayError::TimelockPending { effective_at } => Self::TimelockPending(TimelockPending {
                effectiveAt: U256::from(effective_at),
            }),
            RelayError::Blacklisted { account } => Self::Blacklisted(Blacklisted { account }),
            RelayError::NotWhitelisted { from, to, chain_id } => {
                Self::NotWhitelisted(NotWhitelisted {
                    from,
                    to,
                    chainId: chain_id,
                })
            }
            RelayError::NothingChanged => Self::NothingChanged(NothingChanged {}),
            RelayError::InsufficientBudget {
                account,
                balance,
                required,
            } => Self::InsufficientBudget(InsufficientBudget {
                account,
                balance,
                required,
            }),
            RelayError::Overflow => Self::Overflow(Overflow {}),
            RelayError::TransferFailed { to, amount } => {
                Self::TransferFailed(TransferFailed { to, amount })
            }
            RelayError::Reentrant => Self::Reentrant(Reentrant {}),
            RelayError::LengthMismatch => Self::LengthMismatch(LengthMismatch {}),
        }
    }
}
