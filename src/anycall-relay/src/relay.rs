//! Storage layout and Solidity ABI surface of the relay contract.
//!
//! Each public method is a thin wrapper over the matching `anycall-core` component; the rules
//! themselves are not duplicated here.

use alloc::vec::Vec;

use anycall_core::{
    AuthorityRegistry, BatchCall, BudgetLedger, ExecutionCore, FeeData, PermissionStore, RelayHost,
};
use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{self, Address, U256},
    console,
    prelude::*,
};

use crate::errors::AnyCallError;

sol_storage! {
    /// Fee record; written as one unit through `RelayHost::store_fees`.
    pub struct StoredFees {
        uint256 accrued_fees;
        uint256 premium;
    }

    /// Logical caller of the execution in flight.
    pub struct StoredContext {
        address sender;
        uint256 from_chain_id;
    }

    #[entrypoint]
    pub struct AnyCallRelay {
        address authority;
        /// Zero when no transfer is pending.
        address pending_authority;
        uint256 authority_effective_at;

        StoredFees fees;
        mapping(address => uint256) execution_budget;

        mapping(address => bool) blacklist;
        /// (from, to, chainId) => 1-based index into `whitelists[from][chainId]`; 0 when absent.
        mapping(address => mapping(address => mapping(uint256 => uint256))) whitelist_slot;
        mapping(address => mapping(uint256 => address[])) whitelists;

        StoredContext context;
        bool exec_lock;
    }
}

fn to_core_bytes(data: Bytes) -> alloy_primitives::Bytes {
    data.to_vec().into()
}

fn to_batch(
    to: Vec<Address>,
    data: Vec<Bytes>,
    callbacks: Vec<Address>,
    nonces: Vec<U256>,
) -> BatchCall {
    BatchCall {
        to,
        data: data.into_iter().map(to_core_bytes).collect(),
        callbacks,
        nonces,
    }
}

#[public]
impl AnyCallRelay {
    #[constructor]
    pub fn constructor(&mut self, authority: Address, premium: U256) -> Result<(), AnyCallError> {
        AuthorityRegistry::init_authority(self, authority)?;
        RelayHost::store_fees(
            self,
            FeeData {
                accrued_fees: U256::ZERO,
                premium,
            },
        );
        Ok(())
    }

    // ---- Authority Registry ----

    pub fn authority(&self) -> Address {
        AuthorityRegistry::authority(self)
    }

    pub fn pending_authority(&self) -> Address {
        AuthorityRegistry::pending_authority(self)
    }

    pub fn authority_effective_at(&self) -> U256 {
        U256::from(AuthorityRegistry::authority_effective_at(self))
    }

    pub fn change_authority(&mut self, new_authority: Address) -> Result<(), AnyCallError> {
        Ok(AuthorityRegistry::change_authority(self, new_authority)?)
    }

    /// Must be sent by the pending authority once the delay has elapsed.
    pub fn apply_authority(&mut self) -> Result<(), AnyCallError> {
        Ok(AuthorityRegistry::apply_authority(self)?)
    }

    // ---- Permission Store ----

    pub fn set_permission(
        &mut self,
        from: Address,
        to: Address,
        to_chain_id: U256,
        allowed: bool,
    ) -> Result<(), AnyCallError> {
        Ok(PermissionStore::set_permission(self, from, to, to_chain_id, allowed)?)
    }

    pub fn set_blacklist(&mut self, account: Address, flag: bool) -> Result<(), AnyCallError> {
        Ok(PermissionStore::set_blacklist(self, account, flag)?)
    }

    pub fn is_whitelisted(&self, from: Address, to: Address, chain_id: U256) -> bool {
        PermissionStore::is_whitelisted(self, from, to, chain_id)
    }

    pub fn is_blacklisted(&self, account: Address) -> bool {
        PermissionStore::is_blacklisted(self, account)
    }

    pub fn whitelist_length(&self, from: Address, chain_id: U256) -> U256 {
        U256::from(RelayHost::whitelist_len(self, from, chain_id))
    }

    /// Zero address when `index` is out of range.
    pub fn whitelist_at(&self, from: Address, chain_id: U256, index: U256) -> Address {
        match u64::try_from(index) {
            Ok(index) => RelayHost::whitelist_at(self, from, chain_id, index),
            Err(_) => Address::ZERO,
        }
    }

    pub fn whitelisted_targets(&self, from: Address, chain_id: U256) -> Vec<Address> {
        PermissionStore::whitelisted_targets(self, from, chain_id)
    }

    pub fn chain_id(&self) -> U256 {
        PermissionStore::local_chain_id(self)
    }

    // ---- Budget Ledger ----

    /// Credit `account` with the attached value; returns the new budget.
    #[payable]
    pub fn deposit(&mut self, account: Address) -> Result<U256, AnyCallError> {
        Ok(BudgetLedger::deposit(self, account)?)
    }

    pub fn withdraw(&mut self, amount: U256) -> Result<(), AnyCallError> {
        Ok(BudgetLedger::withdraw(self, amount)?)
    }

    pub fn withdraw_accrued_fees(&mut self) -> Result<U256, AnyCallError> {
        Ok(BudgetLedger::withdraw_accrued_fees(self)?)
    }

    pub fn set_premium(&mut self, premium: U256) -> Result<(), AnyCallError> {
        Ok(BudgetLedger::set_premium(self, premium)?)
    }

    pub fn execution_budget(&self, account: Address) -> U256 {
        BudgetLedger::execution_budget(self, account)
    }

    pub fn accrued_fees(&self) -> U256 {
        BudgetLedger::accrued_fees(self)
    }

    pub fn premium(&self) -> U256 {
        BudgetLedger::premium(self)
    }

    // ---- Execution Core ----

    /// Emits `LogAnyCall` for the relayer; nothing is invoked on this chain.
    pub fn request_call(
        &mut self,
        to: Address,
        data: Bytes,
        fallback: Address,
        to_chain_id: U256,
    ) -> Result<(), AnyCallError> {
        Ok(ExecutionCore::request_call(
            self,
            to,
            to_core_bytes(data),
            fallback,
            to_chain_id,
        )?)
    }

    pub fn request_batch(
        &mut self,
        to: Vec<Address>,
        data: Vec<Bytes>,
        callbacks: Vec<Address>,
        nonces: Vec<U256>,
        to_chain_id: U256,
    ) -> Result<(), AnyCallError> {
        let batch = to_batch(to, data, callbacks, nonces);
        Ok(ExecutionCore::request_batch(self, batch, to_chain_id)?)
    }

    /// Returns whether the destination call succeeded. A failing destination does not revert.
    pub fn execute_call(
        &mut self,
        from: Address,
        to: Address,
        data: Bytes,
        fallback: Address,
        from_chain_id: U256,
    ) -> Result<bool, AnyCallError> {
        let outcome = ExecutionCore::execute_call(
            self,
            from,
            to,
            to_core_bytes(data),
            fallback,
            from_chain_id,
        )?;
        console!(
            "executeCall from={} to={} chain={} success={}",
            from,
            to,
            from_chain_id,
            outcome.success
        );
        Ok(outcome.success)
    }

    pub fn execute_batch(
        &mut self,
        from: Address,
        to: Vec<Address>,
        data: Vec<Bytes>,
        callbacks: Vec<Address>,
        nonces: Vec<U256>,
        from_chain_id: U256,
    ) -> Result<Vec<bool>, AnyCallError> {
        let batch = to_batch(to, data, callbacks, nonces);
        let outcomes = ExecutionCore::execute_batch(self, from, batch, from_chain_id)?;
        console!("executeBatch from={} calls={}", from, outcomes.len());
        Ok(outcomes.into_iter().map(|o| o.success).collect())
    }

    /// `(sender, fromChainID)` of the execution in flight; zeroes outside of one.
    pub fn context(&self) -> (Address, U256) {
        let ctx = ExecutionCore::context(self);
        (ctx.sender, ctx.from_chain_id)
    }
}
