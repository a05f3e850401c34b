//! The cart aggregate: an insertion-ordered line sequence with derived totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use digital_store_core::LineId;

use crate::line::CartLine;

/// The shopper's in-progress order contents.
///
/// Lines keep insertion order; no re-sorting ever happens. All mutation
/// goes through [`CartStore`](crate::store::CartStore) so that persistence
/// and notification cannot be bypassed - this type only exposes reads plus
/// crate-private mutators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Create a cart from a previously persisted line sequence.
    #[must_use]
    pub const fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by id.
    #[must_use]
    pub fn line(&self, line_id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.line_id == line_id)
    }

    /// Sum of `unit_price * quantity` over all lines, recomputed every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines, recomputed every call.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Whether the cart is in its EMPTY mode.
    ///
    /// Always derived from the line sequence, never tracked separately.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line at the end of the sequence.
    pub(crate) fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Delete the line with `line_id`. Returns whether anything changed.
    pub(crate) fn remove(&mut self, line_id: &LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.line_id != line_id);
        self.lines.len() != before
    }

    /// Replace the quantity of the line with `line_id` in place, keeping
    /// its position and every other field. Returns whether the line was
    /// found.
    pub(crate) fn set_quantity(&mut self, line_id: &LineId, quantity: u32) -> bool {
        match self.lines.iter_mut().find(|line| &line.line_id == line_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Drop every line.
    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }
}
