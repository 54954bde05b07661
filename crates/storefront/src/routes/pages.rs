//! Full-page and fragment route handlers.

use std::time::Instant;

use axum::extract::State;
use tracing::instrument;

use crate::controller::Page;
use crate::error::Result;
use crate::routes::regions;
use crate::state::AppState;
use crate::views::{self, CartCountTemplate, PageTemplate};

/// Render the page as it currently stands.
///
/// # Errors
///
/// Returns 500 if rendering fails.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<PageTemplate> {
    let mut session = state.session()?;
    // The full page covers anything the background timers changed.
    session.tick(Instant::now());
    Ok(regions::full_page(session.storefront())?)
}

/// Render the page with the cart view showing.
///
/// Navigation state is only changed by `POST /events/nav`.
///
/// # Errors
///
/// Returns 500 if rendering fails.
#[instrument(skip(state))]
pub async fn cart(State(state): State<AppState>) -> Result<PageTemplate> {
    let mut session = state.session()?;
    session.tick(Instant::now());
    Ok(regions::full_page_showing(session.storefront(), Page::Cart)?)
}

/// Cart count badge fragment.
///
/// # Errors
///
/// Returns 500 if the session is unavailable.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<CartCountTemplate> {
    let count = state.session()?.storefront().cart().count();
    Ok(views::badge(count))
}
