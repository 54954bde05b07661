//! QuickBite Core - Shared domain types.
//!
//! This crate provides the types used across all QuickBite components:
//! - `storefront` - The ordering site (catalog, cart, checkout)
//! - `cli` - Command-line tools for inspecting the menu and persisted cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no HTTP. The cart reducer lives here so its invariants can be tested
//! without any collaborator.
//!
//! # Modules
//!
//! - [`types`] - Item ids, prices, categories, menu items, cart and totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
