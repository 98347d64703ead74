use alloy_primitives::{Address, FixedBytes, B256, U256};
use alloy_sol_types::{SolCall, SolEvent};
use anycall_core::abi::{
    executeBatchCall, executeCallCall, LogAnyCall, LogAnyCallBatch, LogAnyExec, LogAnyExecBatch,
};
use sha3::{Digest, Keccak256};

use crate::types::{
    BatchRequest, CallRequest, CodecError, ExecBatchOutcome, ExecOutcome, RawLog, RelayLog,
};

pub fn keccak256_bytes(bytes: &[u8]) -> FixedBytes<32> {
    let mut h = Keccak256::new();
    h.update(bytes);
    let out = h.finalize();
    let mut b = [0u8; 32];
    b.copy_from_slice(out.as_slice());
    FixedBytes(b)
}

/// topic0 of an event, from its canonical signature (`Name(type,...)`).
pub fn event_topic(signature: &str) -> B256 {
    keccak256_bytes(signature.as_bytes())
}

/// 4-byte function selector from its canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256_bytes(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode one relay log, dispatching on topic0.
pub fn decode_log(log: &RawLog) -> Result<RelayLog, CodecError> {
    let topic0 = *log.topics.first().ok_or(CodecError::MissingTopic)?;
    let topics = log.topics.iter().copied();
    let malformed = |e: alloy_sol_types::Error| CodecError::Malformed(e.to_string());

    if topic0 == LogAnyCall::SIGNATURE_HASH {
        let ev = LogAnyCall::decode_raw_log(topics, &log.data, true).map_err(malformed)?;
        Ok(RelayLog::Call(CallRequest {
            from: ev.from,
            to: ev.to,
            data: ev.data,
            fallback: ev._fallback,
            to_chain_id: ev.toChainID,
        }))
    } else if topic0 == LogAnyCallBatch::SIGNATURE_HASH {
        let ev = LogAnyCallBatch::decode_raw_log(topics, &log.data, true).map_err(malformed)?;
        if ev.data.len() != ev.to.len()
            || ev.callbacks.len() != ev.to.len()
            || ev.nonces.len() != ev.to.len()
        {
            return Err(CodecError::Malformed("batch arrays differ in length".into()));
        }
        Ok(RelayLog::Batch(BatchRequest {
            from: ev.from,
            to: ev.to,
            data: ev.data,
            callbacks: ev.callbacks,
            nonces: ev.nonces,
            from_chain_id: ev.fromChainID,
            to_chain_id: ev.toChainID,
        }))
    } else if topic0 == LogAnyExec::SIGNATURE_HASH {
        let ev = LogAnyExec::decode_raw_log(topics, &log.data, true).map_err(malformed)?;
        Ok(RelayLog::Exec(ExecOutcome {
            from: ev.from,
            to: ev.to,
            success: ev.success,
            result: ev.result,
            fallback: ev._fallback,
            from_chain_id: ev.fromChainID,
            to_chain_id: ev.toChainID,
        }))
    } else if topic0 == LogAnyExecBatch::SIGNATURE_HASH {
        let ev = LogAnyExecBatch::decode_raw_log(topics, &log.data, true).map_err(malformed)?;
        Ok(RelayLog::ExecBatch(ExecBatchOutcome {
            from: ev.from,
            to: ev.to,
            success: ev.success,
            result: ev.result,
            nonces: ev.nonces,
            from_chain_id: ev.fromChainID,
            to_chain_id: ev.toChainID,
        }))
    } else {
        Err(CodecError::UnknownEvent(topic0))
    }
}

/// `executeCall` calldata for a request observed on `origin_chain_id`.
///
/// `LogAnyCall` does not carry its origin chain, so the relayer supplies the id of the chain it
/// was watching.
pub fn encode_execute_call(request: &CallRequest, origin_chain_id: U256) -> Vec<u8> {
    executeCallCall {
        from: request.from,
        to: request.to,
        data: request.data.clone(),
        _fallback: request.fallback,
        fromChainID: origin_chain_id,
    }
    .abi_encode()
}

/// `executeBatch` calldata; the origin chain travels in the batch log itself.
pub fn encode_execute_batch(request: &BatchRequest) -> Vec<u8> {
    executeBatchCall {
        from: request.from,
        to: request.to.clone(),
        data: request.data.clone(),
        callbacks: request.callbacks.clone(),
        nonces: request.nonces.clone(),
        fromChainID: request.from_chain_id,
    }
    .abi_encode()
}

/// Whether `log` is a request targeting `chain_id`; relayers skip logs destined elsewhere.
pub fn is_destined_for(log: &RelayLog, chain_id: U256) -> bool {
    match log {
        RelayLog::Call(r) => r.to_chain_id == chain_id,
        RelayLog::Batch(r) => r.to_chain_id == chain_id,
        RelayLog::Exec(_) | RelayLog::ExecBatch(_) => false,
    }
}

/// Requester of a request or outcome log.
pub fn requester(log: &RelayLog) -> Address {
    match log {
        RelayLog::Call(r) => r.from,
        RelayLog::Batch(r) => r.from,
        RelayLog::Exec(o) => o.from,
        RelayLog::ExecBatch(o) => o.from,
    }
}
