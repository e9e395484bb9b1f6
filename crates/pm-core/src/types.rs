//! Probabilistic micropayment ticket types
//!
//! A ticket is an off-chain payment voucher: it pays `face_value` to the
//! recipient with probability `win_prob / 2^256`. Every field here is part
//! of the commitment the on-chain verifier recomputes, so the widths below
//! are protocol constants rather than implementation choices.

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use alloy_primitives::{Address, B256, U256, U512};

/// 32-byte Keccak-256 value (block hashes, rand hashes, commitments)
pub type Hash = B256;

/// Width of an account address
pub const ADDRESS_LEN: usize = 20;

/// Width of a hash value
pub const HASH_LEN: usize = 32;

/// Width of an encoded integer word
pub const WORD_LEN: usize = 32;

/// Length of round-bound auxiliary data (round word + block hash)
pub const AUX_DATA_LEN: usize = WORD_LEN + HASH_LEN;

/// Commitment preimage length when auxiliary data is the empty sentinel
pub const LEGACY_PREIMAGE_LEN: usize =
    ADDRESS_LEN * 2 + WORD_LEN * 3 + HASH_LEN;

/// Commitment preimage length when the ticket carries round binding
pub const ROUND_BOUND_PREIMAGE_LEN: usize = LEGACY_PREIMAGE_LEN + AUX_DATA_LEN;

/// A single off-chain payment ticket
///
/// Constructed once by the issuing layer and never mutated. Use
/// [`crate::TicketBuilder`] or [`Ticket::new`] rather than filling the
/// struct by hand so byte fields go through normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Payee
    pub recipient: Address,
    /// Payer
    pub sender: Address,
    /// Amount paid if the ticket wins
    pub face_value: U256,
    /// Win probability numerator over 2^256
    pub win_prob: U256,
    /// Per-session sequence number chosen by the sender
    pub sender_nonce: u32,
    /// Commitment to the recipient's secret random value
    pub recipient_rand_hash: Hash,
    /// Round in which the ticket was created (0 when unbound)
    #[serde(default)]
    pub creation_round: i64,
    /// Block hash of `creation_round` (zero when unbound)
    #[serde(default)]
    pub creation_round_block_hash: Hash,
}

/// Round binding carried by a ticket
///
/// The block hash is an explicit optional: `None` and `Some(ZERO)` both
/// normalise to the zero hash, see [`TicketExpirationParams::block_hash`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TicketExpirationParams {
    pub creation_round: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_round_block_hash: Option<Hash>,
}

impl TicketExpirationParams {
    pub fn new(creation_round: i64, creation_round_block_hash: Option<Hash>) -> Self {
        Self {
            creation_round,
            creation_round_block_hash,
        }
    }

    /// Block hash with the unset case resolved to the zero hash
    pub fn block_hash(&self) -> Hash {
        self.creation_round_block_hash.unwrap_or(Hash::ZERO)
    }
}

/// Parameters a recipient hands to a sender before work starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketParams {
    pub recipient: Address,
    pub face_value: U256,
    pub win_prob: U256,
    pub recipient_rand_hash: Hash,
    #[serde(default)]
    pub expiration: TicketExpirationParams,
}

/// Per-ticket values chosen by the sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSenderParams {
    pub sender_nonce: u32,
    /// Sender signature over the ticket commitment (opaque here)
    #[serde(with = "serde_bytes")]
    pub sig: Vec<u8>,
}

/// A ticket together with the values needed to redeem it
///
/// The signature is produced and checked by the signing layer; this crate
/// only carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTicket {
    pub ticket: Ticket,
    #[serde(with = "serde_bytes")]
    pub sig: Vec<u8>,
    /// Revealed recipient random value
    pub recipient_rand: U256,
}

/// Several tickets sharing recipient params and sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketBatch {
    pub params: TicketParams,
    pub sender: Address,
    pub sender_params: Vec<TicketSenderParams>,
}

mod serde_bytes {
    use alloc::vec::Vec;
    use core::fmt;
    use serde::de::{self, SeqAccess, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_byte_buf(BytesVisitor)
    }

    struct BytesVisitor;

    impl<'de> Visitor<'de> for BytesVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a byte string")
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
            Ok(v.to_vec())
        }

        fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
            Ok(v)
        }

        // Self-describing text formats write bytes as a sequence
        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(byte) = seq.next_element()? {
                out.push(byte);
            }
            Ok(out)
        }
    }
}
