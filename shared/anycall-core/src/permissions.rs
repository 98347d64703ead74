//! Permission Store: `(requester, target, chain)` whitelist and a requester blacklist.
//!
//! The blacklist is an unconditional override checked before anything else. Whitelist entries
//! for the local chain can never be created, so same-chain routes are always refused.
//! Each `(requester, chain)` pair also keeps an enumerable list of targets; removal swaps the
//! removed entry with the last one, so list order is not stable.

use alloc::vec::Vec;

use alloy_primitives::{Address, U256};

use crate::{
    authority::AuthorityRegistry, errors::RelayError, events::RelayEvent, host::RelayHost,
};

pub trait PermissionStore: AuthorityRegistry {
    fn is_blacklisted(&self, account: Address) -> bool {
        self.load_blacklisted(account)
    }

    fn is_whitelisted(&self, from: Address, to: Address, chain_id: U256) -> bool {
        self.load_whitelist_slot(from, to, chain_id) != 0
    }

    fn whitelisted_targets(&self, from: Address, chain_id: U256) -> Vec<Address> {
        (0..self.whitelist_len(from, chain_id))
            .map(|i| self.whitelist_at(from, chain_id, i))
            .collect()
    }

    fn local_chain_id(&self) -> U256 {
        U256::from(self.chain_id())
    }

    /// Grant or revoke `(from, to, chain_id)`. Rejects updates that change nothing.
    fn set_permission(
        &mut self,
        from: Address,
        to: Address,
        chain_id: U256,
        allowed: bool,
    ) -> Result<(), RelayError> {
        self.only_authority()?;
        if chain_id == self.local_chain_id() {
            return Err(RelayError::ForbiddenChain { chain_id });
        }
        if self.is_whitelisted(from, to, chain_id) == allowed {
            return Err(RelayError::NothingChanged);
        }

        if allowed {
            self.whitelist_push(from, chain_id, to);
            let len = self.whitelist_len(from, chain_id);
            self.store_whitelist_slot(from, to, chain_id, len);
        } else {
            let index = self.load_whitelist_slot(from, to, chain_id) - 1;
            let last = self.whitelist_len(from, chain_id) - 1;
            if index != last {
                let moved = self.whitelist_at(from, chain_id, last);
                self.whitelist_replace(from, chain_id, index, moved);
                self.store_whitelist_slot(from, moved, chain_id, index + 1);
            }
            self.whitelist_pop(from, chain_id);
            self.store_whitelist_slot(from, to, chain_id, 0);
        }

        self.emit(RelayEvent::PermissionSet {
            from,
            to,
            to_chain_id: chain_id,
            allowed,
        });
        Ok(())
    }

    fn set_blacklist(&mut self, account: Address, flag: bool) -> Result<(), RelayError> {
        self.only_authority()?;
        self.store_blacklisted(account, flag);
        self.emit(RelayEvent::BlacklistSet { account, flag });
        Ok(())
    }

    fn ensure_not_blacklisted(&self, account: Address) -> Result<(), RelayError> {
        if self.is_blacklisted(account) {
            return Err(RelayError::Blacklisted { account });
        }
        Ok(())
    }

    fn ensure_remote_chain(&self, chain_id: U256) -> Result<(), RelayError> {
        if chain_id == self.local_chain_id() {
            return Err(RelayError::ForbiddenChain { chain_id });
        }
        Ok(())
    }

    /// Full gate for a route: blacklist, then same-chain, then whitelist.
    fn ensure_permitted(
        &self,
        from: Address,
        to: Address,
        chain_id: U256,
    ) -> Result<(), RelayError> {
        self.ensure_not_blacklisted(from)?;
        self.ensure_remote_chain(chain_id)?;
        if !self.is_whitelisted(from, to, chain_id) {
            return Err(RelayError::NotWhitelisted { from, to, chain_id });
        }
        Ok(())
    }
}

impl<H: RelayHost> PermissionStore for H {}
