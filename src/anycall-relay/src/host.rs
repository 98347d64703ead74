//! `RelayHost` binding for the Stylus contract: storage accessors, VM environment, raw calls
//! and event logging.

use alloc::vec::Vec;

use anycall_core::{
    abi::{
        Deposit, LogAnyCall, LogAnyCallBatch, LogAnyExec, LogAnyExecBatch, LogApplyAuthority,
        LogChangeAuthority, SetBlacklist, SetPermission, UpdatePremium, Withdrawal,
    },
    AuthorityState, CallContext, FeeData, RelayError, RelayEvent, RelayHost,
};
use stylus_sdk::{
    alloy_primitives::{Address, U256},
    call::RawCall,
    console,
    prelude::*,
    stylus_core::log,
};

use crate::relay::AnyCallRelay;

impl RelayHost for AnyCallRelay {
    fn msg_sender(&self) -> Address {
        self.vm().msg_sender()
    }

    fn msg_value(&self) -> U256 {
        self.vm().msg_value()
    }

    fn block_timestamp(&self) -> u64 {
        self.vm().block_timestamp()
    }

    fn chain_id(&self) -> u64 {
        self.vm().chain_id()
    }

    fn contract_address(&self) -> Address {
        self.vm().contract_address()
    }

    fn gas_left(&self) -> u64 {
        self.vm().evm_gas_left()
    }

    fn tx_gas_price(&self) -> U256 {
        self.vm().tx_gas_price()
    }

    fn invoke(&mut self, to: Address, data: &[u8]) -> (bool, Vec<u8>) {
        // The callee may read `context()` back and may re-enter the relay: pending writes
        // must reach storage first, and every read after the call must hit storage again.
        match unsafe { RawCall::new().clear_storage_cache().call(to, data) } {
            Ok(ret) => (true, ret),
            Err(revert) => {
                console!("invoke {} reverted ({} bytes)", to, revert.len());
                (false, revert)
            }
        }
    }

    fn transfer_value(&mut self, to: Address, amount: U256) -> Result<(), RelayError> {
        unsafe {
            RawCall::new_with_value(amount)
                .clear_storage_cache()
                .skip_return_data()
                .call(to, &[])
        }
        .map(|_| ())
        .map_err(|_| RelayError::TransferFailed { to, amount })
    }

    fn emit(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::CallRequested {
                from,
                to,
                data,
                fallback,
                to_chain_id,
            } => log(
                self.vm(),
                LogAnyCall {
                    from,
                    to,
                    data,
                    _fallback: fallback,
                    toChainID: to_chain_id,
                },
            ),
            RelayEvent::BatchRequested {
                from,
                to,
                data,
                callbacks,
                nonces,
                from_chain_id,
                to_chain_id,
            } => log(
                self.vm(),
                LogAnyCallBatch {
                    from,
                    to,
                    data,
                    callbacks,
                    nonces,
                    fromChainID: from_chain_id,
                    toChainID: to_chain_id,
                },
            ),
            RelayEvent::Executed {
                from,
                to,
                data,
                success,
                result,
                fallback,
                from_chain_id,
                to_chain_id,
            } => log(
                self.vm(),
                LogAnyExec {
                    from,
                    to,
                    data,
                    success,
                    result,
                    _fallback: fallback,
                    fromChainID: from_chain_id,
                    toChainID: to_chain_id,
                },
            ),
            RelayEvent::BatchExecuted {
                from,
                to,
                data,
                success,
                result,
                callbacks,
                nonces,
                from_chain_id,
                to_chain_id,
            } => log(
                self.vm(),
                LogAnyExecBatch {
                    from,
                    to,
                    data,
                    success,
                    result,
                    callbacks,
                    nonces,
                    fromChainID: from_chain_id,
                    toChainID: to_chain_id,
                },
            ),
            RelayEvent::Deposit { account, amount } => {
                log(self.vm(), Deposit { account, amount })
            }
            RelayEvent::Withdrawal { account, amount } => {
                log(self.vm(), Withdrawal { account, amount })
            }
            RelayEvent::PermissionSet {
                from,
                to,
                to_chain_id,
                allowed,
            } => log(
                self.vm(),
                SetPermission {
                    from,
                    to,
                    toChainID: to_chain_id,
                    flag: allowed,
                },
            ),
            RelayEvent::BlacklistSet { account, flag } => {
                log(self.vm(), SetBlacklist { account, flag })
            }
            RelayEvent::AuthorityChangeProposed {
                old_authority,
                new_authority,
                effective_at,
            } => log(
                self.vm(),
                LogChangeAuthority {
                    oldAuthority: old_authority,
                    newAuthority: new_authority,
                    effectiveTime: U256::from(effective_at),
                },
            ),
            RelayEvent::AuthorityChangeApplied {
                old_authority,
                new_authority,
                applied_at,
            } => log(
                self.vm(),
                LogApplyAuthority {
                    oldAuthority: old_authority,
                    newAuthority: new_authority,
                    appliedTime: U256::from(applied_at),
                },
            ),
            RelayEvent::PremiumUpdated {
                old_premium,
                new_premium,
            } => log(
                self.vm(),
                UpdatePremium {
                    oldPremium: old_premium,
                    newPremium: new_premium,
                },
            ),
        }
    }

    fn load_authority(&self) -> AuthorityState {
        AuthorityState {
            current: self.authority.get(),
            pending: self.pending_authority.get(),
            effective_at: self.authority_effective_at.get().saturating_to(),
        }
    }

    fn store_authority(&mut self, state: AuthorityState) {
        self.authority.set(state.current);
        self.pending_authority.set(state.pending);
        self.authority_effective_at.set(U256::from(state.effective_at));
    }

    fn load_fees(&self) -> FeeData {
        FeeData {
            accrued_fees: self.fees.accrued_fees.get(),
            premium: self.fees.premium.get(),
        }
    }

    fn store_fees(&mut self, fees: FeeData) {
        self.fees.accrued_fees.set(fees.accrued_fees);
        self.fees.premium.set(fees.premium);
    }

    fn load_budget(&self, account: Address) -> U256 {
        self.execution_budget.get(account)
    }

    fn store_budget(&mut self, account: Address, amount: U256) {
        self.execution_budget.insert(account, amount);
    }

    fn load_blacklisted(&self, account: Address) -> bool {
        self.blacklist.get(account)
    }

    fn store_blacklisted(&mut self, account: Address, flag: bool) {
        self.blacklist.insert(account, flag);
    }

    fn load_whitelist_slot(&self, from: Address, to: Address, chain_id: U256) -> u64 {
        self.whitelist_slot
            .getter(from)
            .getter(to)
            .get(chain_id)
            .saturating_to()
    }

    fn store_whitelist_slot(&mut self, from: Address, to: Address, chain_id: U256, slot: u64) {
        self.whitelist_slot
            .setter(from)
            .setter(to)
            .insert(chain_id, U256::from(slot));
    }

    fn whitelist_len(&self, from: Address, chain_id: U256) -> u64 {
        self.whitelists.getter(from).getter(chain_id).len() as u64
    }

    fn whitelist_at(&self, from: Address, chain_id: U256, index: u64) -> Address {
        self.whitelists
            .getter(from)
            .getter(chain_id)
            .get(index)
            .unwrap_or_default()
    }

    fn whitelist_push(&mut self, from: Address, chain_id: U256, to: Address) {
        self.whitelists.setter(from).setter(chain_id).push(to);
    }

    fn whitelist_replace(&mut self, from: Address, chain_id: U256, index: u64, to: Address) {
        if let Some(mut entry) = self.whitelists.setter(from).setter(chain_id).setter(index) {
            entry.set(to);
        }
    }

    fn whitelist_pop(&mut self, from: Address, chain_id: U256) {
        self.whitelists.setter(from).setter(chain_id).pop();
    }

    fn load_context(&self) -> CallContext {
        CallContext::new(self.context.sender.get(), self.context.from_chain_id.get())
    }

    fn store_context(&mut self, context: CallContext) {
        self.context.sender.set(context.sender);
        self.context.from_chain_id.set(context.from_chain_id);
    }

    fn load_exec_lock(&self) -> bool {
        self.exec_lock.get()
    }

    fn store_exec_lock(&mut self, locked: bool) {
        self.exec_lock.set(locked);
    }
}
