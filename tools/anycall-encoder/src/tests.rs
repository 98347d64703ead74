#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, Bytes, B256, U256};
    use alloy_sol_types::{SolCall, SolEvent};
    use anycall_core::{
        abi::{executeBatchCall, executeCallCall, LogAnyCall, LogAnyCallBatch, LogAnyExec},
        mock::MockRelay,
        BatchCall, BudgetLedger, ExecutionCore, PermissionStore, RelayEvent,
    };

    use crate::encoder::{
        decode_log, encode_execute_batch, encode_execute_call, event_topic, is_destined_for,
        requester, selector, to_hex,
    };
    use crate::types::{CodecError, RawLog, RelayLog};

    const ORIGIN_CHAIN: u64 = 1;
    const DEST_CHAIN: u64 = 56;
    const RELAY: Address = Address::new([0xac; 20]);
    const AUTHORITY: Address = Address::new([0xa1; 20]);
    const ALICE: Address = Address::new([0x11; 20]);
    const TARGET: Address = Address::new([0x33; 20]);
    const FALLBACK: Address = Address::new([0x44; 20]);

    fn raw<E: SolEvent>(event: &E) -> RawLog {
        let log = event.encode_log_data();
        RawLog {
            topics: log.topics().to_vec(),
            data: log.data.to_vec(),
        }
    }

    /// What the contract would log for a request event.
    fn request_log(event: &RelayEvent) -> RawLog {
        match event.clone() {
            RelayEvent::CallRequested {
                from,
                to,
                data,
                fallback,
                to_chain_id,
            } => raw(&LogAnyCall {
                from,
                to,
                data,
                _fallback: fallback,
                toChainID: to_chain_id,
            }),
            RelayEvent::BatchRequested {
                from,
                to,
                data,
                callbacks,
                nonces,
                from_chain_id,
                to_chain_id,
            } => raw(&LogAnyCallBatch {
                from,
                to,
                data,
                callbacks,
                nonces,
                fromChainID: from_chain_id,
                toChainID: to_chain_id,
            }),
            other => panic!("not a request event: {other:?}"),
        }
    }

    fn relay_on(chain_id: u64) -> MockRelay {
        MockRelay::deploy(RELAY, chain_id, AUTHORITY, U256::ZERO).unwrap()
    }

    fn allow(relay: &mut MockRelay, to: Address, chain_id: u64) {
        relay
            .transact(AUTHORITY, U256::ZERO, |r| {
                r.set_permission(ALICE, to, U256::from(chain_id), true)
            })
            .unwrap();
    }

    #[test]
    fn test_topics_match_signatures() {
        assert_eq!(
            event_topic("LogAnyCall(address,address,bytes,address,uint256)"),
            LogAnyCall::SIGNATURE_HASH
        );
        assert_eq!(
            event_topic("LogAnyExec(address,address,bytes,bool,bytes,address,uint256,uint256)"),
            LogAnyExec::SIGNATURE_HASH
        );
        assert_eq!(
            selector("executeCall(address,address,bytes,address,uint256)"),
            executeCallCall::SELECTOR
        );
        assert_eq!(
            selector("executeBatch(address,address[],bytes[],address[],uint256[],uint256)"),
            executeBatchCall::SELECTOR
        );
    }

    #[test]
    fn test_request_relayed_to_destination() {
        let mut origin = relay_on(ORIGIN_CHAIN);
        allow(&mut origin, TARGET, DEST_CHAIN);
        origin
            .transact(ALICE, U256::ZERO, |r| {
                let data = Bytes::from_static(b"ping");
                r.request_call(TARGET, data, FALLBACK, U256::from(DEST_CHAIN))
            })
            .unwrap();

        let log = decode_log(&request_log(&origin.events()[1])).unwrap();
        assert!(is_destined_for(&log, U256::from(DEST_CHAIN)));
        assert!(!is_destined_for(&log, U256::from(ORIGIN_CHAIN)));
        assert_eq!(requester(&log), ALICE);
        let RelayLog::Call(request) = log else {
            panic!("expected a call request");
        };
        assert_eq!(request.from, ALICE);
        assert_eq!(request.fallback, FALLBACK);

        let calldata = encode_execute_call(&request, U256::from(ORIGIN_CHAIN));
        assert_eq!(calldata[..4], executeCallCall::SELECTOR);
        let call = executeCallCall::abi_decode(&calldata, true).unwrap();

        let mut dest = relay_on(DEST_CHAIN);
        allow(&mut dest, TARGET, ORIGIN_CHAIN);
        dest.fund(ALICE, U256::from(1_000_000u64));
        dest.transact(ALICE, U256::from(1_000_000u64), |r| r.deposit(ALICE))
            .unwrap();
        dest.set_target(TARGET, |r, data| {
            assert_eq!(data, b"ping");
            assert_eq!(r.context().sender, ALICE);
            Ok(b"pong".to_vec())
        });

        let outcome = dest
            .transact(AUTHORITY, U256::ZERO, |r| {
                r.execute_call(call.from, call.to, call.data, call._fallback, call.fromChainID)
            })
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.result, Bytes::from_static(b"pong"));
    }

    #[test]
    fn test_batch_request_round_trip() {
        let mut origin = relay_on(ORIGIN_CHAIN);
        allow(&mut origin, TARGET, DEST_CHAIN);
        let batch = BatchCall {
            to: vec![TARGET, TARGET],
            data: vec![Bytes::from_static(b"a"), Bytes::from_static(b"b")],
            callbacks: vec![Address::ZERO, FALLBACK],
            nonces: vec![U256::from(7u64), U256::from(8u64)],
        };
        origin
            .transact(ALICE, U256::ZERO, |r| r.request_batch(batch.clone(), U256::from(DEST_CHAIN)))
            .unwrap();

        let RelayLog::Batch(request) = decode_log(&request_log(&origin.events()[1])).unwrap() else {
            panic!("expected a batch request");
        };
        assert_eq!(request.from_chain_id, U256::from(ORIGIN_CHAIN));
        assert_eq!(request.nonces, batch.nonces);

        let call = executeBatchCall::abi_decode(&encode_execute_batch(&request), true).unwrap();
        assert_eq!(call.from, ALICE);
        assert_eq!(call.to, batch.to);
        assert_eq!(call.data, batch.data);
        assert_eq!(call.callbacks, batch.callbacks);
        assert_eq!(call.fromChainID, U256::from(ORIGIN_CHAIN));
    }

    #[test]
    fn test_exec_outcome_decoded() {
        let log = raw(&LogAnyExec {
            from: ALICE,
            to: TARGET,
            data: Bytes::from_static(b"ping"),
            success: false,
            result: Bytes::from_static(b"boom"),
            _fallback: FALLBACK,
            fromChainID: U256::from(ORIGIN_CHAIN),
            toChainID: U256::from(DEST_CHAIN),
        });
        let RelayLog::Exec(outcome) = decode_log(&log).unwrap() else {
            panic!("expected an exec outcome");
        };
        assert!(!outcome.success);
        assert_eq!(outcome.result, Bytes::from_static(b"boom"));
        assert_eq!(outcome.to_chain_id, U256::from(DEST_CHAIN));
    }

    #[test]
    fn test_foreign_logs_rejected() {
        assert_eq!(decode_log(&RawLog::default()), Err(CodecError::MissingTopic));

        let topic = event_topic("Transfer(address,address,uint256)");
        let foreign = RawLog {
            topics: vec![topic],
            data: vec![],
        };
        assert_eq!(decode_log(&foreign), Err(CodecError::UnknownEvent(topic)));

        let truncated = RawLog {
            topics: vec![LogAnyCall::SIGNATURE_HASH, B256::ZERO],
            data: vec![0u8; 7],
        };
        assert!(matches!(decode_log(&truncated), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0xde, 0xad]), "0xdead");
    }
}
