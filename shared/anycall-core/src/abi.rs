//! Solidity ABI surface of the relay: events observed by relayers and the calls they submit.
//!
//! Shared between the Stylus contract (logging) and the off-chain encoder (decoding), so
//! topics and layouts cannot drift apart.

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{sol, SolCall};

sol! {
    event LogAnyCall(
        address indexed from,
        address indexed to,
        bytes data,
        address _fallback,
        uint256 indexed toChainID
    );

    event LogAnyCallBatch(
        address indexed from,
        address[] to,
        bytes[] data,
        address[] callbacks,
        uint256[] nonces,
        uint256 fromChainID,
        uint256 indexed toChainID
    );

    event LogAnyExec(
        address indexed from,
        address indexed to,
        bytes data,
        bool success,
        bytes result,
        address _fallback,
        uint256 indexed fromChainID,
        uint256 toChainID
    );

    event LogAnyExecBatch(
        address indexed from,
        address[] to,
        bytes[] data,
        bool[] success,
        bytes[] result,
        address[] callbacks,
        uint256[] nonces,
        uint256 indexed fromChainID,
        uint256 toChainID
    );

    event Deposit(address indexed account, uint256 amount);
    event Withdrawal(address indexed account, uint256 amount);
    event SetPermission(address indexed from, address indexed to, uint256 indexed toChainID, bool flag);
    event SetBlacklist(address indexed account, bool flag);
    event LogChangeAuthority(address indexed oldAuthority, address indexed newAuthority, uint256 effectiveTime);
    event LogApplyAuthority(address indexed oldAuthority, address indexed newAuthority, uint256 appliedTime);
    event UpdatePremium(uint256 oldPremium, uint256 newPremium);

    /// Entry point a fallback receiver on the origin chain implements.
    function anyFallback(address to, bytes data);

    /// Authority entry points, as submitted by the relayer on the destination chain.
    function executeCall(address from, address to, bytes data, address _fallback, uint256 fromChainID);
    function executeBatch(
        address from,
        address[] to,
        bytes[] data,
        address[] callbacks,
        uint256[] nonces,
        uint256 fromChainID
    );
}

/// ABI-encoded `anyFallback(to, data)` routed back to the origin chain after a failed execution.
pub fn encode_fallback(to: Address, data: &[u8]) -> Bytes {
    anyFallbackCall {
        to,
        data: Bytes::copy_from_slice(data),
    }
    .abi_encode()
    .into()
}
