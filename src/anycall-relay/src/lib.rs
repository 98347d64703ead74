//! Stylus deployment of the cross-chain call relay.
//!
//! The relay rules live in `anycall-core`; this crate provides persistent storage, the
//! Solidity ABI surface and the bindings to the Stylus VM.

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

pub mod errors;
mod host;
mod relay;

pub use errors::AnyCallError;
pub use relay::AnyCallRelay;
