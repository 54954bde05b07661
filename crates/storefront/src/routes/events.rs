//! Delegated control event handlers.
//!
//! Every page container posts its controls' events to
//! `/events/{container}`. HTMX requests get back the refreshed regions as
//! out-of-band fragments; plain form posts are redirected to the full page.

use std::time::Instant;

use axum::{
    Form,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::controller::{Command, Container, Refresh, Region, Storefront, resolve};
use crate::error::{Result, add_breadcrumb};
use crate::routes::regions;
use crate::state::AppState;
use crate::storage::Storage;

/// Event name announced when the cart count changes.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Fields carried by a control event.
#[derive(Debug, Default, Deserialize)]
pub struct ControlForm {
    /// Identity of the originating control, `<action>[:<target>]`.
    pub control: Option<String>,
    /// Search box contents.
    pub q: Option<String>,
}

/// Regions rendered in answer to a request.
struct Rendered {
    html: String,
    cart_updated: bool,
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        if self.html.is_empty() {
            return StatusCode::NO_CONTENT.into_response();
        }
        if self.cart_updated {
            (
                AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
                Html(self.html),
            )
                .into_response()
        } else {
            Html(self.html).into_response()
        }
    }
}

/// Handle a control event on a container.
///
/// # Errors
///
/// Returns 400 for an unknown container, a missing or unknown control, or a
/// malformed target. No state changes in that case.
#[instrument(skip(state, headers, form), fields(control = ?form.control))]
pub async fn handle(
    State(state): State<AppState>,
    Path(container): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ControlForm>,
) -> Result<Response> {
    let container: Container = container.parse()?;
    let command = resolve(container, form.control.as_deref(), form.q.as_deref())?;

    add_breadcrumb(
        "event",
        container.as_str(),
        Some(&[("control", form.control.as_deref().unwrap_or_default())]),
    );

    if is_htmx(&headers) {
        Ok(apply(&state, command)?.into_response())
    } else {
        apply(&state, command)?;
        Ok(Redirect::to("/").into_response())
    }
}

/// Regions changed by timers since the page last asked.
///
/// # Errors
///
/// Returns 500 if rendering fails.
#[instrument(skip(state))]
pub async fn tick(State(state): State<AppState>) -> Result<Response> {
    let rendered = {
        let mut session = state.session()?;
        let refresh = session.tick(Instant::now());
        render(session.storefront(), &refresh)?
    };
    Ok(rendered.into_response())
}

fn apply(state: &AppState, command: Command) -> Result<Rendered> {
    let mut session = state.session()?;
    let refresh = session.dispatch(command, Instant::now());
    render(session.storefront(), &refresh)
}

fn render<S: Storage>(storefront: &Storefront<S>, refresh: &Refresh) -> Result<Rendered> {
    Ok(Rendered {
        html: regions::out_of_band(storefront, refresh)?,
        cart_updated: refresh.contains(Region::Badge),
    })
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}
