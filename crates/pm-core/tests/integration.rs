//! Integration tests for complete ticket flows

use pm_core::*;
use std::sync::Arc;
use std::thread;

fn recipient() -> Address {
    normalize::address(&hex::decode("73AEd7b5dEb30222fa896f399d46cC99c7BEe57F").unwrap())
}

fn sender() -> Address {
    normalize::address(&[0x22u8; 20])
}

/// Draws keccak(commitment || recipient_rand); a stand-in for the redemption rule
struct TestEvaluator;

impl WinEvaluator for TestEvaluator {
    type Reveal = U256;

    fn draw(&self, commitment: &Hash, reveal: &U256) -> Hash {
        let mut buf = commitment.to_vec();
        buf.extend_from_slice(&reveal.to_be_bytes::<32>());
        keccak256(&buf)
    }
}

/// Test complete flow: recipient issues params → sender batches tickets → recipient recomputes
#[test]
fn test_complete_payment_flow() {
    // 1. Recipient derives params from its configured economics
    let config = TicketConfig {
        expected_value: U256::from(1_000u64),
        face_value: U256::from(1_000_000u64),
    };
    let recipient_rand = U256::from(0xdead_beef_u64);
    let recipient_rand_hash = keccak256(&recipient_rand.to_be_bytes::<32>());
    let block_hash = keccak256(b"block 1234");
    let params = config
        .ticket_params(
            recipient(),
            recipient_rand_hash,
            TicketExpirationParams::new(1234, Some(block_hash)),
        )
        .unwrap();

    // 2. Sender creates a batch of tickets with increasing nonces
    let mut batch = TicketBatch::new(params.clone(), sender());
    for nonce in 0..8u32 {
        let ticket = Ticket::new(&params, sender(), nonce);
        // The signature is opaque to this crate; use the commitment as a placeholder
        batch.push(nonce, ticket.hash().unwrap().to_vec());
    }

    // 3. Transport over CBOR
    let bytes = encode_ticket_batch(&batch).unwrap();
    let received = decode_ticket_batch(&bytes).unwrap();
    assert_eq!(batch, received);

    // 4. Recipient expands and recomputes commitments
    let signed = received.signed_tickets(recipient_rand);
    assert_eq!(signed.len(), 8);
    for (i, st) in signed.iter().enumerate() {
        assert_eq!(st.ticket.sender_nonce, i as u32);
        assert_eq!(st.ticket.aux_data().unwrap().len(), AUX_DATA_LEN);
        assert_eq!(st.sig, st.hash().unwrap().to_vec());

        let aux = AuxData::decode(&st.ticket.aux_data().unwrap()).unwrap();
        assert_eq!(aux.creation_round(), 1234);
        assert_eq!(aux.block_hash(), block_hash);

        // Evaluation is deterministic for a given reveal
        let first = TestEvaluator.is_winning(&st.ticket, &st.recipient_rand).unwrap();
        let second = TestEvaluator.is_winning(&st.ticket, &st.recipient_rand).unwrap();
        assert_eq!(first, second);
    }

    // 5. Every nonce yields a distinct commitment
    let mut hashes: Vec<Hash> = signed.iter().map(|st| st.hash().unwrap()).collect();
    hashes.sort();
    hashes.dedup();
    assert_eq!(hashes.len(), 8);
}

/// Test that legacy (unbound) tickets and round-bound tickets commit differently
#[test]
fn test_legacy_and_bound_tickets() {
    let base = TicketBuilder::new()
        .recipient(recipient().as_slice())
        .sender(sender().as_slice())
        .face_value(U256::from(100u64))
        .win_prob(U256::from(1u64) << 200)
        .sender_nonce(3);

    let legacy = base.clone().build();
    let explicit_zero = base.clone().creation_round_block_hash([0u8; 32]).build();
    let bound = base.clone().creation_round(1).build();

    assert!(legacy.aux().unwrap().is_legacy());
    assert_eq!(legacy.flatten().unwrap().len(), LEGACY_PREIMAGE_LEN);
    assert_eq!(legacy.hash().unwrap(), explicit_zero.hash().unwrap());

    assert_eq!(bound.flatten().unwrap().len(), ROUND_BOUND_PREIMAGE_LEN);
    assert_ne!(legacy.hash().unwrap(), bound.hash().unwrap());

    // The bound preimage extends the legacy one
    let legacy_bytes = legacy.flatten().unwrap();
    let bound_bytes = bound.flatten().unwrap();
    assert_eq!(&bound_bytes[..LEGACY_PREIMAGE_LEN], &legacy_bytes[..]);
}

/// Test hashing the same tickets from many threads
#[test]
fn test_concurrent_hashing() {
    let tickets: Arc<Vec<Ticket>> = Arc::new(
        (0..32u32)
            .map(|nonce| {
                TicketBuilder::new()
                    .recipient(recipient().as_slice())
                    .sender(sender().as_slice())
                    .face_value(U256::from(nonce) * U256::from(1_000u64))
                    .win_prob(U256::MAX >> (nonce as usize))
                    .sender_nonce(nonce)
                    .creation_round(i64::from(nonce))
                    .build()
            })
            .collect(),
    );
    let expected: Vec<Hash> = tickets.iter().map(|t| t.hash().unwrap()).collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tickets = Arc::clone(&tickets);
            thread::spawn(move || tickets.iter().map(|t| t.hash().unwrap()).collect::<Vec<_>>())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

/// Test error propagation for unencodable tickets
#[test]
fn test_negative_round_is_surfaced() {
    let ticket = TicketBuilder::new().creation_round(-10).build();

    assert!(matches!(ticket.aux_data(), Err(PmError::Overflow { field: "creation_round", .. })));
    assert!(ticket.flatten().is_err());
    assert!(ticket.hash().is_err());

    // The ticket still travels; only encoding for the verifier fails
    let decoded = decode_ticket(&encode_ticket(&ticket).unwrap()).unwrap();
    assert_eq!(decoded.creation_round, -10);
}

/// Test the signed ticket envelope keeps the commitment stable
#[test]
fn test_signed_ticket_envelope() {
    let ticket = TicketBuilder::new()
        .recipient(recipient().as_slice())
        .sender(sender().as_slice())
        .face_value(U256::from(5u64))
        .win_prob(MAX_WIN_PROB)
        .sender_nonce(u32::MAX)
        .build();
    let signed = SignedTicket::new(ticket.clone(), vec![0x01; 65], U256::from(7u64));

    let decoded = decode_signed_ticket(&encode_signed_ticket(&signed).unwrap()).unwrap();
    assert_eq!(decoded.hash().unwrap(), ticket.hash().unwrap());
    assert_eq!(decoded.recipient_rand, U256::from(7u64));
    assert_eq!(decoded.ticket.expected_value(), U256::from(4u64));
}
