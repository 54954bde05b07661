//! Wire format for the persisted cart.
//!
//! The cart is stored as a flat JSON array, one object per entry:
//!
//! ```json
//! [{"id":1,"name":"Margherita Pizza","category":"pizza","price":299,
//!   "image":"https://...","desc":"Classic pizza ...","quantity":2}]
//! ```
//!
//! Decoding is tolerant of prices written as strings and restores the cart
//! invariants (see [`Cart::from_entries`]).

use quickbite_core::{Cart, CartEntry, Category, ItemId, MenuItem, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Storage key holding the cart.
pub const CART_KEY: &str = "cart";

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    id: ItemId,
    name: String,
    category: Category,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    price: Decimal,
    image: String,
    desc: String,
    quantity: u32,
}

impl From<&CartEntry> for StoredEntry {
    fn from(entry: &CartEntry) -> Self {
        Self {
            id: entry.item.id,
            name: entry.item.name.clone(),
            category: entry.item.category,
            price: entry.item.price.amount(),
            image: entry.item.image.clone(),
            desc: entry.item.description.clone(),
            quantity: entry.quantity,
        }
    }
}

impl From<StoredEntry> for CartEntry {
    fn from(stored: StoredEntry) -> Self {
        Self {
            item: MenuItem {
                id: stored.id,
                name: stored.name,
                category: stored.category,
                price: Price::new(stored.price),
                image: stored.image,
                description: stored.desc,
            },
            quantity: stored.quantity,
        }
    }
}

/// Serialize the whole cart.
///
/// # Errors
///
/// Returns an error if serialization fails (not expected for valid carts).
pub fn encode(cart: &Cart) -> Result<String, serde_json::Error> {
    let stored: Vec<StoredEntry> = cart.entries().iter().map(StoredEntry::from).collect();
    serde_json::to_string(&stored)
}

/// Parse a persisted cart.
///
/// # Errors
///
/// Returns an error if `raw` is not a JSON array of cart entries.
pub fn decode(raw: &str) -> Result<Cart, serde_json::Error> {
    let stored: Vec<StoredEntry> = serde_json::from_str(raw)?;
    Ok(Cart::from_entries(stored.into_iter().map(CartEntry::from)))
}
