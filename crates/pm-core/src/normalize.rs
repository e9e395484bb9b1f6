//! Fixed-width field normalisation
//!
//! Byte fields (addresses, hashes) accept input of any length: longer input
//! keeps its low-order bytes, shorter input is left-padded with zeros.
//! Integer fields are never truncated; a value wider than its slot is an
//! [`PmError::Overflow`].

use alloc::vec;
use alloc::vec::Vec;
use crate::error::PmError;
use crate::types::{Address, Hash, ADDRESS_LEN, HASH_LEN, U256, U512, WORD_LEN};

/// Fit a byte sequence into exactly `N` bytes
pub fn fit_bytes<const N: usize>(input: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    if input.len() >= N {
        out.copy_from_slice(&input[input.len() - N..]);
    } else {
        out[N - input.len()..].copy_from_slice(input);
    }
    out
}

/// Normalise arbitrary bytes into a 20-byte address
pub fn address(input: &[u8]) -> Address {
    Address::from(fit_bytes::<ADDRESS_LEN>(input))
}

/// Normalise arbitrary bytes into a 32-byte hash
pub fn hash(input: &[u8]) -> Hash {
    Hash::from(fit_bytes::<HASH_LEN>(input))
}

/// Read a big-endian magnitude of any length as a 256-bit integer
///
/// Leading zero bytes are ignored, so `[0; 40]` is a valid zero.
pub fn uint_from_be_bytes(bytes: &[u8], field: &'static str) -> Result<U256, PmError> {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let magnitude = &bytes[start..];
    if magnitude.len() > WORD_LEN {
        return Err(PmError::overflow(field, WORD_LEN));
    }
    Ok(U256::from_be_bytes(fit_bytes::<WORD_LEN>(magnitude)))
}

/// Big-endian encoding of `value` left-padded to `width` bytes
pub fn pad_uint(value: &U256, width: usize, field: &'static str) -> Result<Vec<u8>, PmError> {
    if value.byte_len() > width {
        return Err(PmError::overflow(field, width));
    }
    let be = value.to_be_bytes::<WORD_LEN>();
    let mut out = vec![0u8; width];
    if width >= WORD_LEN {
        out[width - WORD_LEN..].copy_from_slice(&be);
    } else {
        out.copy_from_slice(&be[WORD_LEN - width..]);
    }
    Ok(out)
}

/// 32-byte word with a 32-bit value in the low-order four bytes
pub fn u32_word(value: u32) -> [u8; WORD_LEN] {
    fit_bytes::<WORD_LEN>(&value.to_be_bytes())
}

/// Lossless 256 -> 512 bit widening for intermediate products
pub(crate) fn widen(value: &U256) -> U512 {
    U512::from_be_slice(&value.to_be_bytes::<WORD_LEN>())
}

/// Upper 256 bits of a 512-bit value, i.e. `value >> 256`
pub(crate) fn high_half(value: &U512) -> U256 {
    let be = value.to_be_bytes::<{ 2 * WORD_LEN }>();
    U256::from_be_slice(&be[..WORD_LEN])
}

/// 512 -> 256 bit narrowing, `None` when the value does not fit
pub(crate) fn narrow(value: &U512) -> Option<U256> {
    let be = value.to_be_bytes::<{ 2 * WORD_LEN }>();
    let (high, low) = be.split_at(WORD_LEN);
    if high.iter().any(|b| *b != 0) {
        return None;
    }
    Some(U256::from_be_slice(low))
}
