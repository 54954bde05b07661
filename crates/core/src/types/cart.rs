//! The cart reducer and derived totals.
//!
//! [`Cart`] owns an ordered list of entries and enforces the cart
//! invariants: at most one entry per item id, and every stored quantity is
//! at least one. A change that would drop a quantity to zero or below
//! removes the entry instead.
//!
//! Persistence, notifications and catalog lookups are the caller's concern.

use serde::{Deserialize, Serialize};

use super::{DELIVERY_FEE, ItemId, MenuItem, Price, TAX_RATE};

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Snapshot of the item at the time it was first added.
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartEntry {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.item.price * self.quantity
    }
}

/// Result of applying a quantity delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No entry exists for the item.
    Unchanged,
    /// The entry now has this quantity.
    Updated(u32),
    /// The quantity reached zero and the entry was removed.
    Removed,
}

/// Derived order amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Price,
    pub tax: Price,
    pub delivery: Price,
    pub total: Price,
}

impl Totals {
    /// Compute totals for a list of entries.
    ///
    /// The delivery fee is charged even for an empty list; callers decide
    /// whether an empty cart is orderable.
    #[must_use]
    pub fn for_entries(entries: &[CartEntry]) -> Self {
        let subtotal: Price = entries.iter().map(CartEntry::line_total).sum();
        let tax = subtotal.scaled(TAX_RATE);
        let delivery = DELIVERY_FEE;
        Self {
            subtotal,
            tax,
            delivery,
            total: subtotal + tax + delivery,
        }
    }
}

/// Ordered cart contents, in the order items were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a cart from untrusted entries, restoring the invariants.
    ///
    /// Zero-quantity entries are dropped. Repeated ids are merged into the
    /// first occurrence, summing their quantities.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = CartEntry>) -> Self {
        let mut cart = Self::new();
        for entry in entries {
            if entry.quantity == 0 {
                continue;
            }
            match cart.position(entry.item.id) {
                Some(index) => {
                    if let Some(existing) = cart.entries.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(entry.quantity);
                    }
                }
                None => cart.entries.push(entry),
            }
        }
        cart
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Find the entry for an item.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all quantities (the badge number).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |sum, entry| sum.saturating_add(entry.quantity))
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals::for_entries(&self.entries)
    }

    /// Add one of `item`, returning the entry's new quantity.
    ///
    /// A new entry copies the item; an existing entry keeps its original
    /// snapshot.
    pub fn add(&mut self, item: &MenuItem) -> u32 {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.item.id == item.id) {
            entry.quantity = entry.quantity.saturating_add(1);
            return entry.quantity;
        }
        self.entries.push(CartEntry {
            item: item.clone(),
            quantity: 1,
        });
        1
    }

    /// Add a signed delta to an entry's quantity.
    pub fn update_quantity(&mut self, id: ItemId, delta: i32) -> QuantityChange {
        let Some(index) = self.position(id) else {
            return QuantityChange::Unchanged;
        };
        let Some(entry) = self.entries.get_mut(index) else {
            return QuantityChange::Unchanged;
        };

        let next = i64::from(entry.quantity) + i64::from(delta);
        if next <= 0 {
            self.entries.remove(index);
            return QuantityChange::Removed;
        }

        entry.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(entry.quantity)
    }

    /// Remove an item's entry. Returns the removed entry, if any.
    pub fn remove(&mut self, id: ItemId) -> Option<CartEntry> {
        let index = self.position(id)?;
        Some(self.entries.remove(index))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.item.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::Category;

    fn item(id: i32, price: i64) -> MenuItem {
        MenuItem {
            id: ItemId::new(id),
            name: format!("Item {id}"),
            category: Category::Pizza,
            price: Price::from_rupees(price),
            image: String::new(),
            description: String::new(),
        }
    }

    fn assert_invariants(cart: &Cart) {
        let mut seen = std::collections::HashSet::new();
        for entry in cart.entries() {
            assert!(seen.insert(entry.item.id), "duplicate id {}", entry.item.id);
            assert!(entry.quantity >= 1);
        }
    }

    #[test]
    fn test_add_twice_increments() {
        let mut cart = Cart::new();
        let pizza = item(1, 299);
        assert_eq!(cart.add(&pizza), 1);
        assert_eq!(cart.add(&pizza), 2);
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.get(pizza.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&item(5, 10));
        cart.add(&item(2, 10));
        cart.add(&item(5, 10));
        let ids: Vec<i32> = cart.entries().iter().map(|e| e.item.id.as_i32()).collect();
        assert_eq!(ids, vec![5, 2]);
    }

    #[test]
    fn test_add_keeps_original_snapshot() {
        let mut cart = Cart::new();
        cart.add(&item(1, 299));
        let mut repriced = item(1, 999);
        repriced.name = "Renamed".to_string();
        cart.add(&repriced);
        let entry = cart.get(ItemId::new(1)).unwrap();
        assert_eq!(entry.item.price, Price::from_rupees(299));
        assert_eq!(entry.item.name, "Item 1");
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&item(1, 10));
        let before = cart.clone();
        assert_eq!(cart.update_quantity(ItemId::new(9), 1), QuantityChange::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = Cart::new();
        let pizza = item(1, 10);
        cart.add(&pizza);
        cart.add(&pizza);
        cart.add(&pizza);

        let mut removed = cart.clone();
        removed.remove(pizza.id);

        assert_eq!(cart.update_quantity(pizza.id, -3), QuantityChange::Removed);
        assert_eq!(cart, removed);
    }

    #[test]
    fn test_update_quantity_below_zero_removes() {
        let mut cart = Cart::new();
        cart.add(&item(1, 10));
        assert_eq!(cart.update_quantity(ItemId::new(1), -5), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_increments() {
        let mut cart = Cart::new();
        cart.add(&item(1, 10));
        assert_eq!(cart.update_quantity(ItemId::new(1), 1), QuantityChange::Updated(2));
        assert_eq!(cart.update_quantity(ItemId::new(1), -1), QuantityChange::Updated(1));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&item(1, 10));
        let before = cart.clone();
        assert!(cart.remove(ItemId::new(2)).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_from_entries_normalizes() {
        let cart = Cart::from_entries(vec![
            CartEntry {
                item: item(1, 10),
                quantity: 2,
            },
            CartEntry {
                item: item(2, 10),
                quantity: 0,
            },
            CartEntry {
                item: item(3, 10),
                quantity: 1,
            },
            CartEntry {
                item: item(1, 99),
                quantity: 3,
            },
        ]);

        assert_invariants(&cart);
        let ids: Vec<i32> = cart.entries().iter().map(|e| e.item.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
        let first = cart.get(ItemId::new(1)).unwrap();
        assert_eq!(first.quantity, 5);
        assert_eq!(first.item.price, Price::from_rupees(10));
    }

    #[test]
    fn test_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(&item(1, 10));
        cart.add(&item(1, 10));
        cart.add(&item(2, 10));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_totals_example() {
        let mut cart = Cart::new();
        cart.add(&item(1, 299));
        cart.add(&item(3, 179));
        cart.add(&item(3, 179));

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Price::from_rupees(657));
        assert_eq!(totals.tax, Price::new(Decimal::new(11826, 2)));
        assert_eq!(totals.delivery, Price::from_rupees(40));
        assert_eq!(totals.total, Price::new(Decimal::new(81526, 2)));
        assert_eq!(totals.total.to_string(), "₹815.26");
    }

    #[test]
    fn test_totals_empty_cart() {
        let totals = Cart::new().totals();
        assert_eq!(totals.subtotal, Price::ZERO);
        assert_eq!(totals.total, Price::from_rupees(40));
    }
}
