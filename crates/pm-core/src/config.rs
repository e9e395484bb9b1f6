//! Recipient ticket configuration

use serde::{Deserialize, Serialize};
use crate::error::PmError;
use crate::normalize;
use crate::types::{Address, Hash, TicketExpirationParams, TicketParams, U256};

/// Economic parameters a recipient uses when issuing ticket params
///
/// Amounts are in the smallest unit of the settlement token (wei).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketConfig {
    /// Payment expected per ticket
    pub expected_value: U256,

    /// Amount a winning ticket pays out
    pub face_value: U256,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            expected_value: U256::from(1_000_000_000u64),          // 1 gwei
            face_value: U256::from(1_000_000_000_000_000_000u64), // 1 ether
        }
    }
}

impl TicketConfig {
    /// Win probability that yields `expected_value` for `face_value`
    ///
    /// floor(expected_value * 2^256 / face_value), saturating at `U256::MAX`
    /// when the expected value is at least the face value.
    pub fn win_prob(&self) -> Result<U256, PmError> {
        if self.face_value.is_zero() {
            return Err(PmError::InvalidConfig("face value must be non-zero"));
        }
        let scaled = normalize::widen(&self.expected_value) << 256;
        let win_prob = scaled / normalize::widen(&self.face_value);
        Ok(normalize::narrow(&win_prob).unwrap_or(U256::MAX))
    }

    /// Ticket params for a sender paying `recipient`
    pub fn ticket_params(
        &self,
        recipient: Address,
        recipient_rand_hash: Hash,
        expiration: TicketExpirationParams,
    ) -> Result<TicketParams, PmError> {
        Ok(TicketParams {
            recipient,
            face_value: self.face_value,
            win_prob: self.win_prob()?,
            recipient_rand_hash,
            expiration,
        })
    }
}
