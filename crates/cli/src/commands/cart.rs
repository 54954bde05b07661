//! Cart commands.
//!
//! Unlike the storefront, a failed save is an error here: the process exits
//! right after, so an unsaved change would simply be lost.

use std::io::Write;

use quickbite_core::{ItemId, OrderReceipt};
use quickbite_storefront::cart::{CartEvent, CartStore};
use quickbite_storefront::storage::Storage;

use super::{CliError, Context};

/// Print the cart rows and totals.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn show<S: Storage>(cart: &CartStore<S>, out: &mut impl Write) -> Result<(), CliError> {
    if cart.cart().is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    for entry in cart.entries() {
        writeln!(
            out,
            "{:>3} x {:<22} {:>6} each  {:>10}",
            entry.quantity,
            entry.item.name,
            entry.item.price.display_compact(),
            entry.line_total().to_string()
        )?;
    }

    let totals = cart.totals();
    writeln!(out)?;
    writeln!(out, "{:<18}{:>10}", "Subtotal", totals.subtotal.to_string())?;
    writeln!(out, "{:<18}{:>10}", "Tax (18%)", totals.tax.to_string())?;
    writeln!(out, "{:<18}{:>10}", "Delivery Charges", totals.delivery.to_string())?;
    writeln!(out, "{:<18}{:>10}", "Total", totals.total.to_string())?;
    Ok(())
}

/// Add one of a menu item.
///
/// # Errors
///
/// Returns an error if the item is not on the menu or the cart cannot be
/// saved.
pub fn add<S: Storage>(
    cart: &mut CartStore<S>,
    context: &Context,
    id: ItemId,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let event = cart.add(&context.catalog, id)?;
    saved(cart)?;
    if let CartEvent::Added { name, quantity } = event {
        writeln!(out, "{name} added to cart! ({quantity} in cart)")?;
    }
    Ok(())
}

/// Change an item's quantity by `delta`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn update<S: Storage>(
    cart: &mut CartStore<S>,
    id: ItemId,
    delta: i32,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let event = cart.update_quantity(id, delta);
    saved(cart)?;
    report(&event, id, out)
}

/// Remove an item.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove<S: Storage>(
    cart: &mut CartStore<S>,
    id: ItemId,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let event = cart.remove(id);
    saved(cart)?;
    report(&event, id, out)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear<S: Storage>(cart: &mut CartStore<S>, out: &mut impl Write) -> Result<(), CliError> {
    cart.clear();
    saved(cart)?;
    writeln!(out, "Cart cleared")?;
    Ok(())
}

/// Place the order and empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn checkout<S: Storage>(
    cart: &mut CartStore<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if cart.cart().is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    let receipt = OrderReceipt::for_cart(cart.cart());
    cart.clear();
    saved(cart)?;
    tracing::info!(order = %receipt.reference, total = %receipt.totals.total, "Order placed");

    writeln!(out, "Order placed! Total: {}", receipt.totals.total)?;
    writeln!(
        out,
        "Reference {} ({} items, {})",
        receipt.short_reference(),
        receipt.item_count,
        receipt.placed_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    Ok(())
}

fn report(event: &CartEvent, id: ItemId, out: &mut impl Write) -> Result<(), CliError> {
    match event {
        CartEvent::QuantityChanged { quantity, .. } => {
            writeln!(out, "Item {id} quantity is now {quantity}")?;
        }
        CartEvent::Removed { name, .. } => writeln!(out, "{name} removed from cart")?,
        _ => writeln!(out, "Item {id} is not in the cart")?,
    }
    Ok(())
}

fn saved<S: Storage>(cart: &mut CartStore<S>) -> Result<(), CliError> {
    match cart.take_warning() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
