//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Full page (catalog or cart view)
//! GET  /cart                   - Switch to the cart view, full page
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Events (HTMX, out-of-band fragments)
//! POST /events/{container}     - Control event from menu, categories, search, cart or nav
//! GET  /events/tick            - Regions changed by timers
//! ```

pub mod events;
pub mod pages;
pub mod regions;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the event routes router.
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/tick", get(events::tick))
        .route("/{container}", post(events::handle))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/cart", get(pages::cart))
        .route("/cart/count", get(pages::count))
        .nest("/events", event_routes())
}
