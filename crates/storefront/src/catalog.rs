//! The read-only menu catalog.
//!
//! The catalog is fixed for the lifetime of the process. By default it holds
//! the built-in menu; a JSON file can replace it at startup (see
//! `QUICKBITE_CATALOG_PATH`).

use std::collections::HashSet;
use std::path::Path;

use quickbite_core::{Category, CategoryFilter, ItemId, MenuItem, Price};
use thiserror::Error;
use tracing::instrument;

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
    #[error("item {0} must have a positive price")]
    InvalidPrice(ItemId),
}

/// Static list of menu items in declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Build a catalog, validating ids and prices.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if two items share an id, or `InvalidPrice` if
    /// any price is zero or negative.
    pub fn from_items(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
            if !item.price.is_positive() {
                return Err(CatalogError::InvalidPrice(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Load a catalog from a JSON array of menu items.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a valid list of
    /// items, or fails validation.
    #[instrument]
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let items: Vec<MenuItem> = serde_json::from_str(&raw)?;
        let catalog = Self::from_items(items)?;
        tracing::info!(items = catalog.len(), "Catalog loaded from file");
        Ok(catalog)
    }

    /// The built-in menu.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            items: builtin_items(),
        }
    }

    /// Find an item by id.
    #[must_use]
    pub fn lookup(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items matching the filter whose names contain `search`
    /// (case-insensitive), in catalog order.
    #[must_use]
    pub fn query(&self, filter: CategoryFilter, search: &str) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| filter.matches(item.category) && item.name_contains(search))
            .collect()
    }

    /// Distinct categories present, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category) {
                categories.push(item.category);
            }
        }
        categories
    }

    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn menu_item(
    id: i32,
    name: &str,
    category: Category,
    rupees: i64,
    image: &str,
    description: &str,
) -> MenuItem {
    MenuItem {
        id: ItemId::new(id),
        name: name.to_string(),
        category,
        price: Price::from_rupees(rupees),
        image: format!("https://images.unsplash.com/{image}?w=400"),
        description: description.to_string(),
    }
}

fn builtin_items() -> Vec<MenuItem> {
    vec![
        menu_item(
            1,
            "Margherita Pizza",
            Category::Pizza,
            299,
            "photo-1574071318508-1cdbab80d002",
            "Classic pizza with fresh mozzarella, basil, and tomato sauce",
        ),
        menu_item(
            2,
            "Pepperoni Pizza",
            Category::Pizza,
            349,
            "photo-1628840042765-356cda07504e",
            "Loaded with pepperoni slices and extra cheese",
        ),
        menu_item(
            3,
            "Chicken Burger",
            Category::Burger,
            179,
            "photo-1568901346375-23c9450c58cd",
            "Juicy grilled chicken patty with lettuce and mayo",
        ),
        menu_item(
            4,
            "Veggie Burger",
            Category::Burger,
            149,
            "photo-1520072959219-c595dc870360",
            "Plant-based patty with fresh vegetables",
        ),
        menu_item(
            5,
            "Butter Chicken",
            Category::Indian,
            279,
            "photo-1603894584373-5ac82b2ae398",
            "Creamy tomato curry with tender chicken pieces",
        ),
        menu_item(
            6,
            "Paneer Tikka",
            Category::Indian,
            249,
            "photo-1631452180519-c014fe946bc7",
            "Grilled cottage cheese with aromatic spices",
        ),
        menu_item(
            7,
            "Chicken Fried Rice",
            Category::Chinese,
            199,
            "photo-1603133872878-684f208fb84b",
            "Wok-tossed rice with chicken and vegetables",
        ),
        menu_item(
            8,
            "Veg Manchurian",
            Category::Chinese,
            179,
            "photo-1626082927389-6cd097cdc6ec",
            "Deep-fried veggie balls in tangy sauce",
        ),
        menu_item(
            9,
            "Chocolate Brownie",
            Category::Dessert,
            129,
            "photo-1607920591413-4ec007e70023",
            "Rich, fudgy brownie with chocolate chips",
        ),
        menu_item(
            10,
            "Tiramisu",
            Category::Dessert,
            159,
            "photo-1571877227200-a0d98ea607e9",
            "Classic Italian coffee-flavored dessert",
        ),
    ]
}
