//! Error types for ticket encoding

use alloc::string::String;

/// Errors that can occur while encoding, hashing or transporting tickets
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PmError {
    /// A numeric field does not fit in its declared byte width
    #[error("{field} does not fit in {width} bytes")]
    Overflow { field: &'static str, width: usize },
    /// Encoded auxiliary data has an unexpected length
    #[error("invalid length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
    /// Ticket configuration cannot produce valid parameters
    #[error("invalid ticket config: {0}")]
    InvalidConfig(&'static str),
    /// CBOR encoding error
    #[error("CBOR encoding error: {0}")]
    CborEncode(String),
    /// CBOR decoding error
    #[error("CBOR decoding error: {0}")]
    CborDecode(String),
}

impl PmError {
    pub(crate) fn overflow(field: &'static str, width: usize) -> Self {
        log::warn!("rejecting {} wider than {} bytes", field, width);
        Self::Overflow { field, width }
    }
}
