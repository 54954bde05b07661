//! Menu categories and the category filter used when browsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a category or filter string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

/// A menu category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pizza,
    Burger,
    Indian,
    Chinese,
    Dessert,
}

impl Category {
    /// Every category, in menu display order.
    pub const ALL: [Self; 5] = [
        Self::Pizza,
        Self::Burger,
        Self::Indian,
        Self::Chinese,
        Self::Dessert,
    ];

    /// Stable lowercase identifier (matches the serialized form).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pizza => "pizza",
            Self::Burger => "burger",
            Self::Indian => "indian",
            Self::Chinese => "chinese",
            Self::Dessert => "dessert",
        }
    }

    /// Human-readable label for filter controls.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pizza => "Pizza",
            Self::Burger => "Burgers",
            Self::Indian => "Indian",
            Self::Chinese => "Chinese",
            Self::Dessert => "Desserts",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Which categories the menu grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Match every item.
    #[default]
    All,
    /// Match items of exactly this category.
    Only(Category),
}

impl CategoryFilter {
    /// Whether an item of `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}
