//! In-memory [`RelayHost`] with EVM-like call frames.
//!
//! - Every top-level [`MockRelay::transact`] runs against a snapshot and rolls back on error,
//!   the way a reverted transaction leaves no state behind.
//! - Destination contracts are closures registered with [`MockRelay::set_target`]; they receive
//!   the relay itself, so they can read the call context or re-enter the relay. A target that
//!   returns `Err` reverts its own effects and reports the error bytes as revert data.
//! - Value transfers to a registered target run it with empty calldata (a `receive` hook).

use alloc::{collections::BTreeMap, rc::Rc, vec::Vec};

use alloy_primitives::{Address, U256};

use crate::{
    authority::AuthorityRegistry,
    budget::BudgetLedger,
    errors::RelayError,
    events::RelayEvent,
    host::RelayHost,
    types::{AuthorityState, CallContext, FeeData},
};

/// Gas consumed by a destination call unless overridden with [`MockRelay::set_call_gas`].
pub const DEFAULT_CALL_GAS: u64 = 21_000;

/// Gas available at the start of every top-level transaction.
pub const TX_GAS_LIMIT: u64 = 30_000_000;

/// A destination contract: `(relay, calldata) -> Ok(return data) | Err(revert data)`.
pub type Target = Rc<dyn Fn(&mut MockRelay, &[u8]) -> Result<Vec<u8>, Vec<u8>>>;

/// Everything a revert must roll back.
#[derive(Clone, Debug, Default)]
pub struct MockState {
    pub authority: AuthorityState,
    pub fees: FeeData,
    pub budgets: BTreeMap<Address, U256>,
    pub blacklist: BTreeMap<Address, bool>,
    pub whitelist_slots: BTreeMap<(Address, Address, U256), u64>,
    pub whitelists: BTreeMap<(Address, U256), Vec<Address>>,
    pub context: CallContext,
    pub exec_lock: bool,
    /// Native balances, including the relay's own.
    pub balances: BTreeMap<Address, U256>,
    pub events: Vec<RelayEvent>,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    sender: Address,
    value: U256,
}

pub struct MockRelay {
    pub state: MockState,
    pub address: Address,
    pub chain_id: u64,
    pub timestamp: u64,
    pub gas_price: U256,
    gas_left: u64,
    frames: Vec<Frame>,
    targets: BTreeMap<Address, Target>,
    call_gas: BTreeMap<Address, u64>,
}

impl MockRelay {
    /// Deploy a relay at `address` on `chain_id` with the given authority and premium.
    pub fn deploy(
        address: Address,
        chain_id: u64,
        authority: Address,
        premium: U256,
    ) -> Result<Self, RelayError> {
        let mut relay = Self {
            state: MockState::default(),
            address,
            chain_id,
            timestamp: 1_700_000_000,
            gas_price: U256::from(1u64),
            gas_left: TX_GAS_LIMIT,
            frames: Vec::new(),
            targets: BTreeMap::new(),
            call_gas: BTreeMap::new(),
        };
        relay.init_authority(authority)?;
        relay.state.fees.premium = premium;
        Ok(relay)
    }

    /// Run `f` as a call from `sender` carrying `value`; all state is rolled back on error.
    pub fn transact<R>(
        &mut self,
        sender: Address,
        value: U256,
        f: impl FnOnce(&mut Self) -> Result<R, RelayError>,
    ) -> Result<R, RelayError> {
        if self.frames.is_empty() {
            self.gas_left = TX_GAS_LIMIT;
        }
        let snapshot = self.state.clone();
        let relay = self.address;
        if let Err(e) = self.move_value(sender, relay, value) {
            self.state = snapshot;
            return Err(e);
        }

        self.frames.push(Frame { sender, value });
        let result = f(self);
        self.frames.pop();

        if result.is_err() {
            self.state = snapshot;
        }
        result
    }

    pub fn set_target(
        &mut self,
        address: Address,
        target: impl Fn(&mut MockRelay, &[u8]) -> Result<Vec<u8>, Vec<u8>> + 'static,
    ) {
        self.targets.insert(address, Rc::new(target));
    }

    pub fn set_call_gas(&mut self, address: Address, gas: u64) {
        self.call_gas.insert(address, gas);
    }

    pub fn fund(&mut self, account: Address, amount: U256) {
        self.state.balances.insert(account, amount);
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.state.balances.get(&account).copied().unwrap_or_default()
    }

    pub fn advance_time(&mut self, seconds: u64) {
        self.timestamp += seconds;
    }

    pub fn events(&self) -> &[RelayEvent] {
        &self.state.events
    }

    pub fn clear_events(&mut self) {
        self.state.events.clear();
    }

    /// Sum of all budgets plus accrued fees; must match the relay's native balance.
    pub fn liabilities(&self) -> U256 {
        self.state
            .budgets
            .values()
            .fold(self.accrued_fees(), |acc, b| acc + *b)
    }

    fn move_value(&mut self, from: Address, to: Address, amount: U256) -> Result<(), RelayError> {
        if amount.is_zero() {
            return Ok(());
        }
        let from_balance = self.balance_of(from);
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(RelayError::TransferFailed { to, amount })?;
        self.state.balances.insert(from, remaining);
        let to_balance = self.balance_of(to);
        self.state.balances.insert(to, to_balance + amount);
        Ok(())
    }

    /// Run a registered target as a call frame whose caller (towards the relay) is `address`.
    fn run_target(&mut self, address: Address, data: &[u8]) -> Option<Result<Vec<u8>, Vec<u8>>> {
        let target = self.targets.get(&address).cloned()?;
        let snapshot = self.state.clone();
        self.frames.push(Frame {
            sender: address,
            value: U256::ZERO,
        });
        let result = target(self, data);
        self.frames.pop();
        if result.is_err() {
            self.state = snapshot;
        }
        Some(result)
    }
}

impl RelayHost for MockRelay {
    fn msg_sender(&self) -> Address {
        self.frames.last().map(|f| f.sender).unwrap_or_default()
    }

    fn msg_value(&self) -> U256 {
        self.frames.last().map(|f| f.value).unwrap_or_default()
    }

    fn block_timestamp(&self) -> u64 {
        self.timestamp
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn contract_address(&self) -> Address {
        self.address
    }

    fn gas_left(&self) -> u64 {
        self.gas_left
    }

    fn tx_gas_price(&self) -> U256 {
        self.gas_price
    }

    fn invoke(&mut self, to: Address, data: &[u8]) -> (bool, Vec<u8>) {
        let cost = self.call_gas.get(&to).copied().unwrap_or(DEFAULT_CALL_GAS);
        self.gas_left = self.gas_left.saturating_sub(cost);
        match self.run_target(to, data) {
            Some(Ok(ret)) => (true, ret),
            Some(Err(revert)) => (false, revert),
            // No code at `to`: the call succeeds with empty return data.
            None => (true, Vec::new()),
        }
    }

    fn transfer_value(&mut self, to: Address, amount: U256) -> Result<(), RelayError> {
        let relay = self.address;
        self.move_value(relay, to, amount)?;
        match self.run_target(to, &[]) {
            Some(Err(_)) => Err(RelayError::TransferFailed { to, amount }),
            _ => Ok(()),
        }
    }

    fn emit(&mut self, event: RelayEvent) {
        self.state.events.push(event);
    }

    fn load_authority(&self) -> AuthorityState {
        self.state.authority
    }

    fn store_authority(&mut self, state: AuthorityState) {
        self.state.authority = state;
    }

    fn load_fees(&self) -> FeeData {
        self.state.fees
    }

    fn store_fees(&mut self, fees: FeeData) {
        self.state.fees = fees;
    }

    fn load_budget(&self, account: Address) -> U256 {
        self.state.budgets.get(&account).copied().unwrap_or_default()
    }

    fn store_budget(&mut self, account: Address, amount: U256) {
        self.state.budgets.insert(account, amount);
    }

    fn load_blacklisted(&self, account: Address) -> bool {
        self.state.blacklist.get(&account).copied().unwrap_or(false)
    }

    fn store_blacklisted(&mut self, account: Address, flag: bool) {
        self.state.blacklist.insert(account, flag);
    }

    fn load_whitelist_slot(&self, from: Address, to: Address, chain_id: U256) -> u64 {
        self.state
            .whitelist_slots
            .get(&(from, to, chain_id))
            .copied()
            .unwrap_or(0)
    }

    fn store_whitelist_slot(&mut self, from: Address, to: Address, chain_id: U256, slot: u64) {
        self.state.whitelist_slots.insert((from, to, chain_id), slot);
    }

    fn whitelist_len(&self, from: Address, chain_id: U256) -> u64 {
        self.state
            .whitelists
            .get(&(from, chain_id))
            .map_or(0, |list| list.len() as u64)
    }

    fn whitelist_at(&self, from: Address, chain_id: U256, index: u64) -> Address {
        self.state
            .whitelists
            .get(&(from, chain_id))
            .and_then(|list| list.get(index as usize))
            .copied()
            .unwrap_or_default()
    }

    fn whitelist_push(&mut self, from: Address, chain_id: U256, to: Address) {
        self.state
            .whitelists
            .entry((from, chain_id))
            .or_default()
            .push(to);
    }

    fn whitelist_replace(&mut self, from: Address, chain_id: U256, index: u64, to: Address) {
        if let Some(entry) = self
            .state
            .whitelists
            .get_mut(&(from, chain_id))
            .and_then(|list| list.get_mut(index as usize))
        {
            *entry = to;
        }
    }

    fn whitelist_pop(&mut self, from: Address, chain_id: U256) {
        if let Some(list) = self.state.whitelists.get_mut(&(from, chain_id)) {
            list.pop();
        }
    }

    fn load_context(&self) -> CallContext {
        self.state.context
    }

    fn store_context(&mut self, context: CallContext) {
        self.state.context = context;
    }

    fn load_exec_lock(&self) -> bool {
        self.state.exec_lock
    }

    fn store_exec_lock(&mut self, locked: bool) {
        self.state.exec_lock = locked;
    }
}
