//! CBOR transport encoding for tickets
//!
//! This is how tickets travel between sender and recipient. It is unrelated
//! to the commitment layout in [`crate::ticket`]; only that layout is hashed.

use alloc::vec::Vec;
use ciborium::{de, ser};
use serde::{de::DeserializeOwned, Serialize};
use crate::error::PmError;
use crate::types::*;

/// Encode a value to CBOR bytes
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, PmError> {
    let mut buf = Vec::new();
    ser::into_writer(value, &mut buf)
        .map_err(|e| PmError::CborEncode(alloc::format!("{}", e)))?;
    Ok(buf)
}

/// Decode CBOR bytes to a value
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, PmError> {
    de::from_reader(bytes)
        .map_err(|e| PmError::CborDecode(alloc::format!("{}", e)))
}

pub fn encode_ticket(ticket: &Ticket) -> Result<Vec<u8>, PmError> {
    encode(ticket)
}

pub fn decode_ticket(bytes: &[u8]) -> Result<Ticket, PmError> {
    decode(bytes)
}

pub fn encode_signed_ticket(ticket: &SignedTicket) -> Result<Vec<u8>, PmError> {
    encode(ticket)
}

pub fn decode_signed_ticket(bytes: &[u8]) -> Result<SignedTicket, PmError> {
    decode(bytes)
}

pub fn encode_ticket_batch(batch: &TicketBatch) -> Result<Vec<u8>, PmError> {
    encode(batch)
}

/// Decode a batch sent by a sender
pub fn decode_ticket_batch(bytes: &[u8]) -> Result<TicketBatch, PmError> {
    decode(bytes)
}
