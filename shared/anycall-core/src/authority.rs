//! Authority Registry: the single source of truth for who may execute and govern.
//!
//! Transfers are two-phase: the current authority proposes, and only the proposed address may
//! apply once [`AUTHORITY_DELAY`] has elapsed. Proposing again overwrites an unapplied
//! proposal; there is no explicit cancel.

use alloy_primitives::Address;

use crate::{
    constants::AUTHORITY_DELAY, errors::RelayError, events::RelayEvent, host::RelayHost,
    types::AuthorityState,
};

pub trait AuthorityRegistry: RelayHost {
    fn authority(&self) -> Address {
        self.load_authority().current
    }

    fn pending_authority(&self) -> Address {
        self.load_authority().pending
    }

    fn authority_effective_at(&self) -> u64 {
        self.load_authority().effective_at
    }

    /// Install the first authority. Used once, at construction.
    fn init_authority(&mut self, authority: Address) -> Result<(), RelayError> {
        if authority == Address::ZERO {
            return Err(RelayError::ZeroAddress);
        }
        self.store_authority(AuthorityState {
            current: authority,
            ..AuthorityState::default()
        });
        Ok(())
    }

    /// Gate for authority-only operations; returns the caller on success.
    fn only_authority(&self) -> Result<Address, RelayError> {
        let caller = self.msg_sender();
        if caller != self.authority() {
            return Err(RelayError::OnlyAuthority { caller });
        }
        Ok(caller)
    }

    /// Propose `new_authority`, effective after the timelock.
    fn change_authority(&mut self, new_authority: Address) -> Result<(), RelayError> {
        self.only_authority()?;
        if new_authority == Address::ZERO {
            return Err(RelayError::ZeroAddress);
        }

        let mut state = self.load_authority();
        state.pending = new_authority;
        state.effective_at = self.block_timestamp().saturating_add(AUTHORITY_DELAY);
        self.store_authority(state);

        self.emit(RelayEvent::AuthorityChangeProposed {
            old_authority: state.current,
            new_authority,
            effective_at: state.effective_at,
        });
        Ok(())
    }

    /// Commit the pending transfer. Callable by the pending authority once the delay elapsed.
    fn apply_authority(&mut self) -> Result<(), RelayError> {
        let caller = self.msg_sender();
        let state = self.load_authority();
        if !state.has_pending() || caller != state.pending {
            return Err(RelayError::OnlyPendingAuthority { caller });
        }
        let now = self.block_timestamp();
        if now < state.effective_at {
            return Err(RelayError::TimelockPending {
                effective_at: state.effective_at,
            });
        }

        self.store_authority(AuthorityState {
            current: state.pending,
            pending: Address::ZERO,
            effective_at: 0,
        });

        self.emit(RelayEvent::AuthorityChangeApplied {
            old_authority: state.current,
            new_authority: state.pending,
            applied_at: now,
        });
        Ok(())
    }
}

impl<H: RelayHost> AuthorityRegistry for H {}
