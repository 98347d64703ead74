use alloy_primitives::{Address, U256};

use crate::{mock::MockRelay, PermissionStore};

mod permissions;

pub const LOCAL_CHAIN: u64 = 42_161;
pub const REMOTE_CHAIN: u64 = 56;

pub const RELAY: Address = Address::new([0xac; 20]);
pub const AUTHORITY: Address = Address::new([0xa1; 20]);
pub const ALICE: Address = Address::new([0x11; 20]);
pub const BOB: Address = Address::new([0x22; 20]);
pub const CAROL: Address = Address::new([0x23; 20]);
pub const TARGET: Address = Address::new([0x33; 20]);
pub const OTHER_TARGET: Address = Address::new([0x34; 20]);
pub const FALLBACK: Address = Address::new([0x44; 20]);

pub fn remote() -> U256 {
    U256::from(REMOTE_CHAIN)
}

pub fn local() -> U256 {
    U256::from(LOCAL_CHAIN)
}

pub fn eth(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

pub fn deploy() -> MockRelay {
    MockRelay::deploy(RELAY, LOCAL_CHAIN, AUTHORITY, U256::ZERO).unwrap()
}

pub fn allow(relay: &mut MockRelay, from: Address, to: Address, chain_id: U256) {
    relay
        .transact(AUTHORITY, U256::ZERO, |r| r.set_permission(from, to, chain_id, true))
        .unwrap();
}
