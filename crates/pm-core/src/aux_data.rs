//! Round-binding auxiliary data
//!
//! Tickets bind themselves to chain state by committing to the round they
//! were created in and that round's block hash. Tickets from before round
//! binding carry no such data, and the verifier recognises them by an empty
//! auxiliary byte string. Round 0 together with the zero block hash is
//! therefore reserved: it encodes to nothing at all. Every other pair,
//! including round 0 with a real hash and a real round with no hash,
//! encodes to the 64-byte `round_word || block_hash` form.

use alloc::vec::Vec;
use crate::error::PmError;
use crate::normalize;
use crate::types::{Hash, AUX_DATA_LEN, HASH_LEN, WORD_LEN};

/// Decoded form of a ticket's auxiliary data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxData {
    /// Empty sentinel: no round binding
    Legacy,
    /// Round binding present
    RoundBound(RoundBinding),
}

/// A round and block hash that passed the sentinel rule
///
/// Only [`AuxData::new`] and [`AuxData::decode`] build one, so the round is
/// never negative and the pair is never `(0, ZERO)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundBinding {
    round: i64,
    block_hash: Hash,
}

impl RoundBinding {
    pub fn round(&self) -> i64 {
        self.round
    }

    pub fn block_hash(&self) -> Hash {
        self.block_hash
    }
}

impl AuxData {
    /// Apply the sentinel rule to a round and an optional block hash
    ///
    /// An absent block hash is the zero hash.
    pub fn new(round: i64, block_hash: Option<&Hash>) -> Result<Self, PmError> {
        let block_hash = block_hash.copied().unwrap_or(Hash::ZERO);
        if round < 0 {
            return Err(PmError::overflow("creation_round", WORD_LEN));
        }

        if round == 0 && block_hash == Hash::ZERO {
            return Ok(Self::Legacy);
        }
        Ok(Self::RoundBound(RoundBinding { round, block_hash }))
    }

    /// Same as [`AuxData::new`] for a block hash of any byte length
    pub fn from_raw(round: i64, block_hash: &[u8]) -> Result<Self, PmError> {
        Self::new(round, Some(&normalize::hash(block_hash)))
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy)
    }

    /// Creation round, 0 for the sentinel
    pub fn creation_round(&self) -> i64 {
        match self {
            Self::RoundBound(binding) => binding.round,
            Self::Legacy => 0,
        }
    }

    /// Block hash, zero for the sentinel
    pub fn block_hash(&self) -> Hash {
        match self {
            Self::RoundBound(binding) => binding.block_hash,
            Self::Legacy => Hash::ZERO,
        }
    }

    /// Encoded length: 0 or 64
    pub fn len(&self) -> usize {
        match self {
            Self::Legacy => 0,
            Self::RoundBound(_) => AUX_DATA_LEN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the encoded form to `out`
    pub fn write_to(&self, out: &mut Vec<u8>) {
        if let Self::RoundBound(binding) = self {
            // Non-negative, so the two's complement bytes are the magnitude
            out.extend_from_slice(&normalize::fit_bytes::<WORD_LEN>(&binding.round.to_be_bytes()));
            out.extend_from_slice(binding.block_hash.as_slice());
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        self.write_to(&mut out);
        out
    }

    /// Parse auxiliary data as recomputed by a verifier
    ///
    /// Accepts the empty sentinel or exactly 64 bytes. A 64-byte string of
    /// zeros decodes to [`AuxData::Legacy`] since it binds nothing.
    pub fn decode(bytes: &[u8]) -> Result<Self, PmError> {
        if bytes.is_empty() {
            return Ok(Self::Legacy);
        }
        if bytes.len() != AUX_DATA_LEN {
            return Err(PmError::InvalidLength {
                expected: AUX_DATA_LEN,
                got: bytes.len(),
            });
        }

        let (high, low) = bytes[..WORD_LEN].split_at(WORD_LEN - 8);
        if high.iter().any(|b| *b != 0) {
            return Err(PmError::overflow("creation_round", WORD_LEN));
        }
        let round = u64::from_be_bytes(normalize::fit_bytes::<8>(low));
        let round =
            i64::try_from(round).map_err(|_| PmError::overflow("creation_round", WORD_LEN))?;
        let block_hash = Hash::from_slice(&bytes[WORD_LEN..WORD_LEN + HASH_LEN]);

        Self::new(round, Some(&block_hash))
    }
}

/// Encode a round and optional block hash straight to bytes
pub fn encode_aux_data(round: i64, block_hash: Option<&Hash>) -> Result<Vec<u8>, PmError> {
    Ok(AuxData::new(round, block_hash)?.to_vec())
}
