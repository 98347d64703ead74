//! Off-chain codec used by relayers.
//!
//! Turns `LogAnyCall` / `LogAnyCallBatch` logs observed on the origin chain into
//! `executeCall` / `executeBatch` calldata for the destination chain, and reads back the
//! `LogAnyExec*` outcome logs.

pub mod encoder;
pub mod types;

#[cfg(test)]
mod tests;

pub use encoder::{
    decode_log, encode_execute_batch, encode_execute_call, event_topic, is_destined_for,
    keccak256_bytes, requester, selector, to_hex,
};
pub use types::{
    BatchRequest, CallRequest, CodecError, ExecBatchOutcome, ExecOutcome, RawLog, RelayLog,
};
