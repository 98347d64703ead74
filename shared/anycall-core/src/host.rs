//! Host abstraction the relay components run against.
//!
//! On-chain this is the Stylus contract (storage + VM hostios); in tests it is
//! [`crate::mock::MockRelay`]. Storage accessors are deliberately dumb: every rule lives in
//! the component traits.

use alloc::vec::Vec;

use alloy_primitives::{Address, U256};

use crate::{
    errors::RelayError,
    events::RelayEvent,
    types::{AuthorityState, CallContext, FeeData},
};

pub trait RelayHost {
    // ---- execution environment ----

    fn msg_sender(&self) -> Address;
    fn msg_value(&self) -> U256;
    fn block_timestamp(&self) -> u64;
    fn chain_id(&self) -> u64;
    fn contract_address(&self) -> Address;
    fn gas_left(&self) -> u64;
    fn tx_gas_price(&self) -> U256;

    /// Call `to` with `data` and zero value. Never fails: a revert is reported as
    /// `(false, revert_data)`.
    fn invoke(&mut self, to: Address, data: &[u8]) -> (bool, Vec<u8>);

    /// Send native value out of the relay; the whole operation must revert on failure.
    fn transfer_value(&mut self, to: Address, amount: U256) -> Result<(), RelayError>;

    fn emit(&mut self, event: RelayEvent);

    // ---- persistent state ----

    fn load_authority(&self) -> AuthorityState;
    fn store_authority(&mut self, state: AuthorityState);

    fn load_fees(&self) -> FeeData;
    fn store_fees(&mut self, fees: FeeData);

    fn load_budget(&self, account: Address) -> U256;
    fn store_budget(&mut self, account: Address, amount: U256);

    fn load_blacklisted(&self, account: Address) -> bool;
    fn store_blacklisted(&mut self, account: Address, flag: bool);

    /// 1-based position of `to` in the `(from, chain_id)` whitelist; 0 when absent.
    fn load_whitelist_slot(&self, from: Address, to: Address, chain_id: U256) -> u64;
    fn store_whitelist_slot(&mut self, from: Address, to: Address, chain_id: U256, slot: u64);

    fn whitelist_len(&self, from: Address, chain_id: U256) -> u64;
    /// `Address::ZERO` when `index` is out of range.
    fn whitelist_at(&self, from: Address, chain_id: U256, index: u64) -> Address;
    fn whitelist_push(&mut self, from: Address, chain_id: U256, to: Address);
    fn whitelist_replace(&mut self, from: Address, chain_id: U256, index: u64, to: Address);
    fn whitelist_pop(&mut self, from: Address, chain_id: U256);

    fn load_context(&self) -> CallContext;
    fn store_context(&mut self, context: CallContext);

    fn load_exec_lock(&self) -> bool;
    fn store_exec_lock(&mut self, locked: bool);
}
