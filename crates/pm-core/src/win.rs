//! Win determination interface
//!
//! The redemption layer owns the winning rule: both how the draw is derived
//! from the commitment and the revealed randomness, and how that draw is
//! compared against `win_prob`. Implement [`WinEvaluator`] there. The only
//! rule this crate supplies is the default comparison,
//! [`is_below_threshold`], which an evaluator may override.

use crate::error::PmError;
use crate::types::{Hash, Ticket, U256};

/// Largest representable win probability numerator
pub const MAX_WIN_PROB: U256 = U256::MAX;

/// Default comparison: `draw`, read as a big-endian integer, is strictly
/// below `win_prob`
///
/// Used by [`WinEvaluator::compare`] unless the evaluator supplies the
/// redemption layer's own rule.
pub fn is_below_threshold(draw: &Hash, win_prob: &U256) -> bool {
    U256::from_be_bytes(draw.0) < *win_prob
}

/// Source of the random draw compared against a ticket's win probability
pub trait WinEvaluator {
    /// Revealed values the draw depends on
    type Reveal: ?Sized;

    /// Derive the draw from a ticket commitment and the reveal
    fn draw(&self, commitment: &Hash, reveal: &Self::Reveal) -> Hash;

    /// Whether `draw` wins at `win_prob`; defaults to [`is_below_threshold`]
    fn compare(&self, draw: &Hash, win_prob: &U256) -> bool {
        is_below_threshold(draw, win_prob)
    }

    /// Compute the ticket's commitment and compare the resulting draw
    fn is_winning(&self, ticket: &Ticket, reveal: &Self::Reveal) -> Result<bool, PmError> {
        let commitment = ticket.hash()?;
        let draw = self.draw(&commitment, reveal);
        Ok(self.compare(&draw, &ticket.win_prob))
    }
}
