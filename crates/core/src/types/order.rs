//! Receipts for simulated checkouts.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Cart, Totals};

/// Confirmation of a placed order.
///
/// Checkout is simulated: the receipt is logged and shown, never sent
/// anywhere or persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub reference: Uuid,
    pub placed_at: DateTime<Utc>,
    pub item_count: u32,
    pub totals: Totals,
}

impl OrderReceipt {
    /// Create a receipt for the cart's current contents.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        Self {
            reference: Uuid::new_v4(),
            placed_at: Utc::now(),
            item_count: cart.count(),
            totals: cart.totals(),
        }
    }

    /// Short human-facing reference (first eight hex digits, uppercased).
    #[must_use]
    pub fn short_reference(&self) -> String {
        self.reference
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect::<String>()
            .to_uppercase()
    }
}
