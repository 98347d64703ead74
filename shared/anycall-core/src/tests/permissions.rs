use std::collections::BTreeSet;

use alloy_primitives::{Address, U256};

use super::*;
use crate::{ExecutionCore, PermissionStore, RelayError, RelayEvent};

#[test]
fn set_permission_grants_route() {
    let mut relay = deploy();
    relay
        .transact(AUTHORITY, U256::ZERO, |r| r.set_permission(ALICE, TARGET, remote(), true))
        .unwrap();

    assert!(relay.is_whitelisted(ALICE, TARGET, remote()));
    assert!(!relay.is_whitelisted(BOB, TARGET, remote()));
    assert!(!relay.is_whitelisted(ALICE, TARGET, U256::from(1u64)));
    assert_eq!(relay.whitelisted_targets(ALICE, remote()), vec![TARGET]);
    assert_eq!(
        relay.events(),
        &[RelayEvent::PermissionSet {
            from: ALICE,
            to: TARGET,
            to_chain_id: remote(),
            allowed: true,
        }]
    );
}

#[test]
fn set_permission_rejects_local_chain() {
    let mut relay = deploy();
    let res = relay.transact(AUTHORITY, U256::ZERO, |r| {
        r.set_permission(ALICE, TARGET, local(), true)
    });
    assert_eq!(res, Err(RelayError::ForbiddenChain { chain_id: local() }));
    assert!(!relay.is_whitelisted(ALICE, TARGET, local()));
}

#[test]
fn set_permission_rejects_unchanged_value() {
    let mut relay = deploy();
    let res = relay.transact(AUTHORITY, U256::ZERO, |r| {
        r.set_permission(ALICE, TARGET, remote(), false)
    });
    assert_eq!(res, Err(RelayError::NothingChanged));

    allow(&mut relay, ALICE, TARGET, remote());
    let res = relay.transact(AUTHORITY, U256::ZERO, |r| {
        r.set_permission(ALICE, TARGET, remote(), true)
    });
    assert_eq!(res, Err(RelayError::NothingChanged));
    assert_eq!(relay.whitelisted_targets(ALICE, remote()), vec![TARGET]);
}

#[test]
fn set_permission_only_authority() {
    let mut relay = deploy();
    let res = relay.transact(ALICE, U256::ZERO, |r| {
        r.set_permission(ALICE, TARGET, remote(), true)
    });
    assert_eq!(res, Err(RelayError::OnlyAuthority { caller: ALICE }));
}

#[test]
fn revoking_swaps_last_entry_into_place() {
    let mut relay = deploy();
    let t1 = Address::new([0x51; 20]);
    let t2 = Address::new([0x52; 20]);
    let t3 = Address::new([0x53; 20]);
    for t in [t1, t2, t3] {
        allow(&mut relay, ALICE, t, remote());
    }

    relay
        .transact(AUTHORITY, U256::ZERO, |r| r.set_permission(ALICE, t1, remote(), false))
        .unwrap();
    assert_eq!(relay.whitelisted_targets(ALICE, remote()), vec![t3, t2]);
    assert!(!relay.is_whitelisted(ALICE, t1, remote()));

    // t3 now sits at index 0; removing it must not disturb t2.
    relay
        .transact(AUTHORITY, U256::ZERO, |r| r.set_permission(ALICE, t3, remote(), false))
        .unwrap();
    assert_eq!(relay.whitelisted_targets(ALICE, remote()), vec![t2]);
    assert!(relay.is_whitelisted(ALICE, t2, remote()));

    relay
        .transact(AUTHORITY, U256::ZERO, |r| r.set_permission(ALICE, t2, remote(), false))
        .unwrap();
    assert!(relay.whitelisted_targets(ALICE, remote()).is_empty());

    allow(&mut relay, ALICE, t1, remote());
    assert_eq!(relay.whitelisted_targets(ALICE, remote()), vec![t1]);
}

mod model {
    use proptest::prelude::*;

    use super::*;

    const CHAINS: [u64; 3] = [2, 3, REMOTE_CHAIN];

    #[derive(Clone, Debug)]
    enum Op {
        Permission { from: u8, to: u8, chain: usize, allowed: bool },
        Blacklist { account: u8, flag: bool },
    }

    fn account(i: u8) -> Address {
        Address::new([i + 1; 20])
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0..4u8, 0..4u8, 0..CHAINS.len(), any::<bool>()).prop_map(
                |(from, to, chain, allowed)| Op::Permission { from, to, chain, allowed }
            ),
            1 => (0..4u8, any::<bool>())
                .prop_map(|(account, flag)| Op::Blacklist { account, flag }),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn whitelist_and_blacklist_match_model(ops in prop::collection::vec(arb_op(), 1..120)) {
            let mut relay = deploy();
            let mut routes: BTreeSet<(Address, U256, Address)> = BTreeSet::new();
            let mut blacklisted: BTreeSet<Address> = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Permission { from, to, chain, allowed } => {
                        let (from, to) = (account(from), account(to));
                        let chain = U256::from(CHAINS[chain]);
                        let res = relay.transact(AUTHORITY, U256::ZERO, |r| {
                            r.set_permission(from, to, chain, allowed)
                        });
                        if routes.contains(&(from, chain, to)) == allowed {
                            prop_assert_eq!(res, Err(RelayError::NothingChanged));
                        } else {
                            prop_assert_eq!(res, Ok(()));
                            if allowed {
                                routes.insert((from, chain, to));
                            } else {
                                routes.remove(&(from, chain, to));
                            }
                        }
                    }
                    Op::Blacklist { account: i, flag } => {
                        let who = account(i);
                        let res =
                            relay.transact(AUTHORITY, U256::ZERO, |r| r.set_blacklist(who, flag));
                        prop_assert_eq!(res, Ok(()));
                        if flag {
                            blacklisted.insert(who);
                        } else {
                            blacklisted.remove(&who);
                        }
                    }
                }
            }

            for i in 0..4u8 {
                let from = account(i);
                prop_assert_eq!(relay.is_blacklisted(from), blacklisted.contains(&from));
                for chain in CHAINS.map(U256::from) {
                    let listed = relay.whitelisted_targets(from, chain);
                    let as_set: BTreeSet<Address> = listed.iter().copied().collect();
                    let expected: BTreeSet<Address> = routes
                        .iter()
                        .filter(|(f, c, _)| *f == from && *c == chain)
                        .map(|(_, _, t)| *t)
                        .collect();
                    prop_assert_eq!(listed.len(), as_set.len());
                    prop_assert_eq!(&as_set, &expected);

                    for j in 0..4u8 {
                        let to = account(j);
                        prop_assert_eq!(
                            relay.is_whitelisted(from, to, chain),
                            expected.contains(&to)
                        );

                        // Blacklisting overrides an existing route without removing it.
                        let res = relay.transact(from, U256::ZERO, |r| {
                            r.request_call(to, Default::default(), Address::ZERO, chain)
                        });
                        let want = if blacklisted.contains(&from) {
                            Err(RelayError::Blacklisted { account: from })
                        } else if expected.contains(&to) {
                            Ok(())
                        } else {
                            Err(RelayError::NotWhitelisted { from, to, chain_id: chain })
                        };
                        prop_assert_eq!(res, want);
                    }
                }
            }
        }
    }
}

#[test]
fn set_blacklist_toggles_flag() {
    let mut relay = deploy();
    relay
        .transact(AUTHORITY, U256::ZERO, |r| r.set_blacklist(ALICE, true))
        .unwrap();
    assert!(relay.is_blacklisted(ALICE));
    assert!(!relay.is_blacklisted(BOB));

    relay
        .transact(AUTHORITY, U256::ZERO, |r| r.set_blacklist(ALICE, false))
        .unwrap();
    assert!(!relay.is_blacklisted(ALICE));
    assert_eq!(
        relay.events(),
        &[
            RelayEvent::BlacklistSet { account: ALICE, flag: true },
            RelayEvent::BlacklistSet { account: ALICE, flag: false },
        ]
    );

    let res = relay.transact(BOB, U256::ZERO, |r| r.set_blacklist(ALICE, true));
    assert_eq!(res, Err(RelayError::OnlyAuthority { caller: BOB }));
}

#[test]
fn blacklist_overrides_whitelist_without_touching_it() {
    let mut relay = deploy();
    allow(&mut relay, ALICE, TARGET, remote());
    relay
        .transact(AUTHORITY, U256::ZERO, |r| r.set_blacklist(ALICE, true))
        .unwrap();

    let res = relay.transact(ALICE, U256::ZERO, |r| {
        r.request_call(TARGET, Default::default(), Address::ZERO, remote())
    });
    assert_eq!(res, Err(RelayError::Blacklisted { account: ALICE }));
    assert!(relay.is_whitelisted(ALICE, TARGET, remote()));

    relay
        .transact(AUTHORITY, U256::ZERO, |r| r.set_blacklist(ALICE, false))
        .unwrap();
    relay
        .transact(ALICE, U256::ZERO, |r| {
            r.request_call(TARGET, Default::default(), Address::ZERO, remote())
        })
        .unwrap();
}
