//! Ticket commitment, construction and batching
//!
//! The commitment is Keccak-256 over the concatenation
//!
//! ```text
//! recipient (20) || sender (20) || face_value (32) || win_prob (32)
//!   || sender_nonce (32) || recipient_rand_hash (32) || aux_data (0 | 64)
//! ```
//!
//! which is exactly what the on-chain verifier recomputes. The same hash is
//! the sender's signing target and the input to win determination.

use alloc::vec::Vec;
use crate::aux_data::AuxData;
use crate::crypto::keccak256;
use crate::error::PmError;
use crate::normalize;
use crate::types::*;

impl Ticket {
    /// Create a ticket from recipient params, the paying sender and its nonce
    pub fn new(params: &TicketParams, sender: Address, sender_nonce: u32) -> Self {
        Self {
            recipient: params.recipient,
            sender,
            face_value: params.face_value,
            win_prob: params.win_prob,
            sender_nonce,
            recipient_rand_hash: params.recipient_rand_hash,
            creation_round: params.expiration.creation_round,
            creation_round_block_hash: params.expiration.block_hash(),
        }
    }

    /// Round binding of this ticket
    pub fn expiration_params(&self) -> TicketExpirationParams {
        TicketExpirationParams::new(self.creation_round, Some(self.creation_round_block_hash))
    }

    /// Decoded auxiliary data
    pub fn aux(&self) -> Result<AuxData, PmError> {
        AuxData::new(self.creation_round, Some(&self.creation_round_block_hash))
    }

    /// Encoded auxiliary data: empty for unbound tickets, otherwise 64 bytes
    pub fn aux_data(&self) -> Result<Vec<u8>, PmError> {
        Ok(self.aux()?.to_vec())
    }

    /// Canonical commitment preimage (168 or 232 bytes)
    pub fn flatten(&self) -> Result<Vec<u8>, PmError> {
        let aux = self.aux()?;
        let mut buf = Vec::with_capacity(LEGACY_PREIMAGE_LEN + aux.len());

        buf.extend_from_slice(self.recipient.as_slice());
        buf.extend_from_slice(self.sender.as_slice());
        buf.extend_from_slice(&normalize::pad_uint(&self.face_value, WORD_LEN, "face_value")?);
        buf.extend_from_slice(&normalize::pad_uint(&self.win_prob, WORD_LEN, "win_prob")?);
        buf.extend_from_slice(&normalize::u32_word(self.sender_nonce));
        buf.extend_from_slice(self.recipient_rand_hash.as_slice());
        aux.write_to(&mut buf);

        Ok(buf)
    }

    /// Commitment hash identifying this ticket
    pub fn hash(&self) -> Result<Hash, PmError> {
        let preimage = self.flatten()?;
        let hash = keccak256(&preimage);
        log::trace!(
            "ticket commitment {} (nonce {}, {} byte preimage)",
            hash,
            self.sender_nonce,
            preimage.len()
        );
        Ok(hash)
    }

    /// Expected payout in the face value's unit: floor(face_value * win_prob / 2^256)
    pub fn expected_value(&self) -> U256 {
        let product = normalize::widen(&self.face_value) * normalize::widen(&self.win_prob);
        normalize::high_half(&product)
    }
}

/// Builder for tickets
///
/// Address and hash setters take bytes of any length and normalise them.
/// The round block hash stays unset until [`TicketBuilder::build`], which
/// resolves an unset hash to the zero hash.
#[derive(Debug, Clone, Default)]
pub struct TicketBuilder {
    recipient: Address,
    sender: Address,
    face_value: U256,
    win_prob: U256,
    sender_nonce: u32,
    recipient_rand_hash: Hash,
    creation_round: i64,
    creation_round_block_hash: Option<Hash>,
}

impl TicketBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from recipient-issued params
    pub fn from_params(params: &TicketParams) -> Self {
        Self {
            recipient: params.recipient,
            face_value: params.face_value,
            win_prob: params.win_prob,
            recipient_rand_hash: params.recipient_rand_hash,
            creation_round: params.expiration.creation_round,
            creation_round_block_hash: params.expiration.creation_round_block_hash,
            ..Self::default()
        }
    }

    pub fn recipient(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.recipient = normalize::address(bytes.as_ref());
        self
    }

    pub fn sender(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.sender = normalize::address(bytes.as_ref());
        self
    }

    pub fn face_value(mut self, value: U256) -> Self {
        self.face_value = value;
        self
    }

    /// Set the face value from a big-endian magnitude of any length
    pub fn face_value_bytes(mut self, bytes: &[u8]) -> Result<Self, PmError> {
        self.face_value = normalize::uint_from_be_bytes(bytes, "face_value")?;
        Ok(self)
    }

    pub fn win_prob(mut self, value: U256) -> Self {
        self.win_prob = value;
        self
    }

    /// Set the win probability from a big-endian magnitude of any length
    pub fn win_prob_bytes(mut self, bytes: &[u8]) -> Result<Self, PmError> {
        self.win_prob = normalize::uint_from_be_bytes(bytes, "win_prob")?;
        Ok(self)
    }

    pub fn sender_nonce(mut self, nonce: u32) -> Self {
        self.sender_nonce = nonce;
        self
    }

    pub fn recipient_rand_hash(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.recipient_rand_hash = normalize::hash(bytes.as_ref());
        self
    }

    pub fn creation_round(mut self, round: i64) -> Self {
        self.creation_round = round;
        self
    }

    pub fn creation_round_block_hash(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.creation_round_block_hash = Some(normalize::hash(bytes.as_ref()));
        self
    }

    pub fn build(self) -> Ticket {
        Ticket {
            recipient: self.recipient,
            sender: self.sender,
            face_value: self.face_value,
            win_prob: self.win_prob,
            sender_nonce: self.sender_nonce,
            recipient_rand_hash: self.recipient_rand_hash,
            creation_round: self.creation_round,
            creation_round_block_hash: self.creation_round_block_hash.unwrap_or(Hash::ZERO),
        }
    }
}

impl SignedTicket {
    pub fn new(ticket: Ticket, sig: Vec<u8>, recipient_rand: U256) -> Self {
        Self {
            ticket,
            sig,
            recipient_rand,
        }
    }

    /// Commitment of the wrapped ticket
    pub fn hash(&self) -> Result<Hash, PmError> {
        self.ticket.hash()
    }
}

impl TicketBatch {
    pub fn new(params: TicketParams, sender: Address) -> Self {
        Self {
            params,
            sender,
            sender_params: Vec::new(),
        }
    }

    /// Append one ticket's sender values
    pub fn push(&mut self, sender_nonce: u32, sig: Vec<u8>) {
        self.sender_params.push(TicketSenderParams { sender_nonce, sig });
    }

    pub fn len(&self) -> usize {
        self.sender_params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender_params.is_empty()
    }

    /// One ticket per sender param, in order
    pub fn tickets(&self) -> Vec<Ticket> {
        log::debug!("expanding batch of {} tickets from {}", self.len(), self.sender);
        self.sender_params
            .iter()
            .map(|sp| Ticket::new(&self.params, self.sender, sp.sender_nonce))
            .collect()
    }

    /// Tickets paired with their signatures and the revealed recipient rand
    pub fn signed_tickets(&self, recipient_rand: U256) -> Vec<SignedTicket> {
        self.tickets()
            .into_iter()
            .zip(&self.sender_params)
            .map(|(ticket, sp)| SignedTicket::new(ticket, sp.sig.clone(), recipient_rand))
            .collect()
    }
}
