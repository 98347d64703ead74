use core::fmt;

use alloy_primitives::{Address, Bytes, B256, U256};

/// A log as returned by `eth_getLogs`: topics plus the non-indexed data blob.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawLog {
    pub topics: Vec<B256>,
    pub data: Vec<u8>,
}

/// Decoded `LogAnyCall`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    /// Zero when the requester wants no failure notification.
    pub fallback: Address,
    pub to_chain_id: U256,
}

/// Decoded `LogAnyCallBatch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchRequest {
    pub from: Address,
    pub to: Vec<Address>,
    pub data: Vec<Bytes>,
    pub callbacks: Vec<Address>,
    pub nonces: Vec<U256>,
    pub from_chain_id: U256,
    pub to_chain_id: U256,
}

/// Decoded `LogAnyExec`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecOutcome {
    pub from: Address,
    pub to: Address,
    pub success: bool,
    /// Return data on success, revert data otherwise.
    pub result: Bytes,
    pub fallback: Address,
    pub from_chain_id: U256,
    pub to_chain_id: U256,
}

/// Decoded `LogAnyExecBatch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecBatchOutcome {
    pub from: Address,
    pub to: Vec<Address>,
    pub success: Vec<bool>,
    pub result: Vec<Bytes>,
    pub nonces: Vec<U256>,
    pub from_chain_id: U256,
    pub to_chain_id: U256,
}

/// Any relay log a relayer acts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayLog {
    Call(CallRequest),
    Batch(BatchRequest),
    Exec(ExecOutcome),
    ExecBatch(ExecBatchOutcome),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// The log has no topics (anonymous logs are never emitted by the relay).
    MissingTopic,
    /// topic0 is not one of the relay's call/exec events.
    UnknownEvent(B256),
    /// The log matched an event signature but its body did not decode.
    Malformed(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::MissingTopic => write!(f, "log has no topics"),
            CodecError::UnknownEvent(topic) => write!(f, "unknown event topic {topic}"),
            CodecError::Malformed(reason) => write!(f, "malformed relay log: {reason}"),
        }
    }
}

impl std::error::Error for CodecError {}
