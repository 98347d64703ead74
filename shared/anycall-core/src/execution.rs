//! Execution Core: call requests on the origin chain and authority executions on the
//! destination chain.
//!
//! An execution sets the call context to the logical cross-chain caller, invokes the target,
//! then restores whatever context was active before. The requester's budget is charged for the
//! measured gas afterwards; if that charge fails the whole execution is rejected, destination
//! call included. A failing destination is reported in the outcome event, never as an error.

use alloc::vec::Vec;

use alloy_primitives::{Address, Bytes, U256};

use crate::{
    abi::encode_fallback,
    budget::BudgetLedger,
    constants::FORBIDDEN_RESULT,
    errors::RelayError,
    events::RelayEvent,
    host::RelayHost,
    permissions::PermissionStore,
    types::{BatchCall, CallContext, CallOutcome},
};

pub trait ExecutionCore: PermissionStore + BudgetLedger + Sized {
    /// Context of the execution in flight; empty outside of one.
    fn context(&self) -> CallContext {
        self.load_context()
    }

    /// Announce a call to `to` on `to_chain_id`. Performs no invocation.
    fn request_call(
        &mut self,
        to: Address,
        data: Bytes,
        fallback: Address,
        to_chain_id: U256,
    ) -> Result<(), RelayError> {
        let from = self.msg_sender();
        self.ensure_permitted(from, to, to_chain_id)?;
        self.emit(RelayEvent::CallRequested {
            from,
            to,
            data,
            fallback,
            to_chain_id,
        });
        Ok(())
    }

    /// Announce a multi-target call; every target must be whitelisted.
    fn request_batch(&mut self, batch: BatchCall, to_chain_id: U256) -> Result<(), RelayError> {
        let from = self.msg_sender();
        batch.validate()?;
        self.ensure_not_blacklisted(from)?;
        self.ensure_remote_chain(to_chain_id)?;
        for to in &batch.to {
            if !self.is_whitelisted(from, *to, to_chain_id) {
                return Err(RelayError::NotWhitelisted {
                    from,
                    to: *to,
                    chain_id: to_chain_id,
                });
            }
        }

        self.emit(RelayEvent::BatchRequested {
            from,
            to: batch.to,
            data: batch.data,
            callbacks: batch.callbacks,
            nonces: batch.nonces,
            from_chain_id: self.local_chain_id(),
            to_chain_id,
        });
        Ok(())
    }

    /// Execute a call requested by `from` on `from_chain_id`. Authority only.
    fn execute_call(
        &mut self,
        from: Address,
        to: Address,
        data: Bytes,
        fallback: Address,
        from_chain_id: U256,
    ) -> Result<CallOutcome, RelayError> {
        self.with_exec_lock(|core| {
            core.only_authority()?;
            core.ensure_executable(from)?;
            core.ensure_permitted(from, to, from_chain_id)?;

            let gas_start = core.gas_left();
            let outcome = core.invoke_in_context(CallContext::new(from, from_chain_id), to, &data);
            let gas_used = gas_start.saturating_sub(core.gas_left());
            core.charge(from, gas_used)?;

            core.emit(RelayEvent::Executed {
                from,
                to,
                data: data.clone(),
                success: outcome.success,
                result: outcome.result.clone(),
                fallback,
                from_chain_id,
                to_chain_id: core.local_chain_id(),
            });

            if !outcome.success && fallback != Address::ZERO {
                core.emit(RelayEvent::CallRequested {
                    from,
                    to: fallback,
                    data: encode_fallback(to, &data),
                    fallback: Address::ZERO,
                    to_chain_id: from_chain_id,
                });
            }
            Ok(outcome)
        })
    }

    /// Execute every sub-call of `batch` independently. Authority only.
    ///
    /// A sub-call whose target is not whitelisted is skipped and reported as failed with
    /// [`FORBIDDEN_RESULT`]; it does not abort the remaining sub-calls.
    fn execute_batch(
        &mut self,
        from: Address,
        batch: BatchCall,
        from_chain_id: U256,
    ) -> Result<Vec<CallOutcome>, RelayError> {
        self.with_exec_lock(|core| {
            core.only_authority()?;
            batch.validate()?;
            core.ensure_executable(from)?;
            core.ensure_not_blacklisted(from)?;
            core.ensure_remote_chain(from_chain_id)?;

            let context = CallContext::new(from, from_chain_id);
            let gas_start = core.gas_left();
            let outcomes: Vec<CallOutcome> = batch
                .to
                .iter()
                .zip(&batch.data)
                .map(|(to, data)| {
                    if core.is_whitelisted(from, *to, from_chain_id) {
                        core.invoke_in_context(context, *to, data)
                    } else {
                        CallOutcome {
                            success: false,
                            result: Bytes::from_static(FORBIDDEN_RESULT),
                        }
                    }
                })
                .collect();
            let gas_used = gas_start.saturating_sub(core.gas_left());
            core.charge(from, gas_used)?;

            core.emit(RelayEvent::BatchExecuted {
                from,
                to: batch.to.clone(),
                data: batch.data.clone(),
                success: outcomes.iter().map(|o| o.success).collect(),
                result: outcomes.iter().map(|o| o.result.clone()).collect(),
                callbacks: batch.callbacks.clone(),
                nonces: batch.nonces.clone(),
                from_chain_id,
                to_chain_id: core.local_chain_id(),
            });
            Ok(outcomes)
        })
    }

    /// Run `f` holding the execution lock; the lock is released on every exit path.
    fn with_exec_lock<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, RelayError>,
    ) -> Result<R, RelayError> {
        if self.load_exec_lock() {
            return Err(RelayError::Reentrant);
        }
        self.store_exec_lock(true);
        let result = f(self);
        self.store_exec_lock(false);
        result
    }

    /// Invoke `to` with `context` active, restoring the previous context afterwards.
    fn invoke_in_context(&mut self, context: CallContext, to: Address, data: &[u8]) -> CallOutcome {
        let prior = self.load_context();
        self.store_context(context);
        let (success, result) = self.invoke(to, data);
        self.store_context(prior);
        CallOutcome {
            success,
            result: result.into(),
        }
    }

    fn ensure_executable(&self, from: Address) -> Result<(), RelayError> {
        if from == Address::ZERO {
            return Err(RelayError::ZeroAddress);
        }
        if from == self.contract_address() {
            return Err(RelayError::SelfCall);
        }
        Ok(())
    }
}

impl<H: RelayHost> ExecutionCore for H {}
