//! Probabilistic micropayment tickets
//!
//! Core library for ticket encoding and commitment hashing. A sender pays a
//! recipient for each unit of work with a ticket that wins `face_value` with
//! probability `win_prob / 2^256`; only winning tickets are redeemed
//! on-chain. The byte layout hashed here must match the verifying contract
//! exactly.
//!
//! # Features
//!
//! - `std` (default): Enable standard library support
//! - Without `std`: `no_std` compatible
//!
//! # Example
//!
//! ```rust
//! use pm_core::{TicketBuilder, U256};
//!
//! let ticket = TicketBuilder::new()
//!     .recipient([0x11u8; 20])
//!     .sender([0x22u8; 20])
//!     .face_value(U256::from(1_000_000u64))
//!     .win_prob(U256::MAX >> 8)
//!     .sender_nonce(1)
//!     .recipient_rand_hash([0x33u8; 32])
//!     .creation_round(5)
//!     .build();
//!
//! // Round-bound tickets carry 64 bytes of auxiliary data
//! assert_eq!(ticket.aux_data().unwrap().len(), 64);
//!
//! // The commitment is signed by the sender and checked by the verifier
//! let commitment = ticket.hash().unwrap();
//! assert_eq!(commitment.len(), 32);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod types;
pub mod normalize;
pub mod aux_data;
pub mod crypto;
pub mod ticket;
pub mod win;
pub mod config;
pub mod cbor;
pub mod error;

// Re-export types
pub use types::*;

pub use aux_data::{AuxData, RoundBinding, encode_aux_data};

pub use crypto::keccak256;

pub use ticket::TicketBuilder;

pub use win::{WinEvaluator, is_below_threshold, MAX_WIN_PROB};

pub use config::TicketConfig;

// Re-export CBOR functions
pub use cbor::{
    encode,
    decode,
    encode_ticket,
    decode_ticket,
    encode_signed_ticket,
    decode_signed_ticket,
    encode_ticket_batch,
    decode_ticket_batch,
};

// Re-export error type
pub use error::PmError;

/// Commitment layout version. Any change to field order, width or the
/// auxiliary data sentinel is a new version.
pub const LAYOUT_VERSION: u8 = 1;
