//! Core types for QuickBite.
//!
//! This module provides type-safe wrappers for the ordering domain.

pub mod cart;
pub mod category;
pub mod id;
pub mod menu;
pub mod order;
pub mod price;

pub use cart::{Cart, CartEntry, QuantityChange, Totals};
pub use category::{Category, CategoryFilter, CategoryParseError};
pub use id::*;
pub use menu::MenuItem;
pub use order::OrderReceipt;
pub use price::{DELIVERY_FEE, Price, TAX_RATE};
