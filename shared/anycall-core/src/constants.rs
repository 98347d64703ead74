//! Protocol constants shared by the contract and off-chain tooling.

/// Delay between proposing and applying an authority transfer (2 days, in seconds).
pub const AUTHORITY_DELAY: u64 = 2 * 24 * 60 * 60;

/// Gas added to every measured execution to cover the relay's own bookkeeping.
pub const EXECUTION_OVERHEAD: u64 = 100_000;

/// Result payload recorded for a batch sub-call whose target is not whitelisted.
pub const FORBIDDEN_RESULT: &[u8] = b"forbidden";
