//! Menu item definition.

use serde::{Deserialize, Serialize};

use super::{Category, ItemId, Price};

/// A purchasable dish as declared in the catalog.
///
/// Menu items are immutable; the cart keeps its own copy taken when the
/// item is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub price: Price,
    /// Image URL shown on cards and cart rows.
    pub image: String,
    /// Accepts `desc`, the field name used by saved carts.
    #[serde(alias = "desc")]
    pub description: String,
}

impl MenuItem {
    /// Whether the name contains `needle`, ignoring case.
    ///
    /// An empty needle matches every item.
    #[must_use]
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}
