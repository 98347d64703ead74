//! Budget Ledger: prepaid execution budgets and protocol fees.
//!
//! Every path that sends value out mutates the ledger first and transfers last, so a
//! re-entering receiver only ever sees the already-debited state.

use alloy_primitives::{Address, U256};

use crate::{
    authority::AuthorityRegistry, constants::EXECUTION_OVERHEAD, errors::RelayError,
    events::RelayEvent, host::RelayHost,
};

/// `(gas_used + EXECUTION_OVERHEAD) * (gas_price + premium)`; `None` on overflow.
pub fn execution_cost(gas_used: u64, gas_price: U256, premium: U256) -> Option<U256> {
    let gas = U256::from(gas_used).checked_add(U256::from(EXECUTION_OVERHEAD))?;
    let price = gas_price.checked_add(premium)?;
    gas.checked_mul(price)
}

pub trait BudgetLedger: AuthorityRegistry {
    fn execution_budget(&self, account: Address) -> U256 {
        self.load_budget(account)
    }

    fn accrued_fees(&self) -> U256 {
        self.load_fees().accrued_fees
    }

    fn premium(&self) -> U256 {
        self.load_fees().premium
    }

    /// Credit `account` with the attached value. Anyone may fund any account.
    fn deposit(&mut self, account: Address) -> Result<U256, RelayError> {
        let amount = self.msg_value();
        let balance = self
            .load_budget(account)
            .checked_add(amount)
            .ok_or(RelayError::Overflow)?;
        self.store_budget(account, balance);
        self.emit(RelayEvent::Deposit { account, amount });
        Ok(balance)
    }

    /// Debit the caller's own budget, then send `amount` back to them.
    fn withdraw(&mut self, amount: U256) -> Result<(), RelayError> {
        let account = self.msg_sender();
        self.debit(account, amount)?;
        self.emit(RelayEvent::Withdrawal { account, amount });
        self.transfer_value(account, amount)
    }

    /// Sweep all accrued fees to the authority.
    fn withdraw_accrued_fees(&mut self) -> Result<U256, RelayError> {
        let authority = self.only_authority()?;
        let mut fees = self.load_fees();
        let amount = fees.accrued_fees;
        fees.accrued_fees = U256::ZERO;
        self.store_fees(fees);
        self.transfer_value(authority, amount)?;
        Ok(amount)
    }

    fn set_premium(&mut self, premium: U256) -> Result<(), RelayError> {
        self.only_authority()?;
        let mut fees = self.load_fees();
        let old_premium = fees.premium;
        fees.premium = premium;
        self.store_fees(fees);
        self.emit(RelayEvent::PremiumUpdated {
            old_premium,
            new_premium: premium,
        });
        Ok(())
    }

    /// Charge `from` for `gas_used` and accrue the same amount as protocol fees.
    fn charge(&mut self, from: Address, gas_used: u64) -> Result<U256, RelayError> {
        let mut fees = self.load_fees();
        let cost = execution_cost(gas_used, self.tx_gas_price(), fees.premium)
            .ok_or(RelayError::Overflow)?;
        self.debit(from, cost)?;
        fees.accrued_fees = fees
            .accrued_fees
            .checked_add(cost)
            .ok_or(RelayError::Overflow)?;
        self.store_fees(fees);
        Ok(cost)
    }

    fn debit(&mut self, account: Address, amount: U256) -> Result<(), RelayError> {
        let balance = self.load_budget(account);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(RelayError::InsufficientBudget {
                account,
                balance,
                required: amount,
            })?;
        self.store_budget(account, remaining);
        Ok(())
    }
}

impl<H: RelayHost> BudgetLedger for H {}
