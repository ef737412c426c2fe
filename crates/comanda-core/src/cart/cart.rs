//! The ordered cart.

use crate::cart::CartLine;
use crate::error::ComandaError;
use crate::ids::CartLineId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Ordered cart lines; insertion order is display order.
///
/// The total is always summed from the lines, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line at a position.
    pub fn get(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line prices.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|line| line.final_price).sum()
    }

    /// Highest line id, used to move the id generator past restored lines.
    pub fn max_line_id(&self) -> Option<CartLineId> {
        self.lines.iter().map(|line| line.id).max()
    }

    /// Append a line.
    pub fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Remove the line at `index`, keeping the order of the rest.
    ///
    /// An out-of-range index leaves the cart untouched.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, ComandaError> {
        if index >= self.lines.len() {
            return Err(ComandaError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl FromIterator<CartLine> for Cart {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
