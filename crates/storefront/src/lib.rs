//! QuickBite storefront library.
//!
//! A single-shopper food-ordering storefront: browse a menu by category and
//! search term, keep a persistent cart, and place a simulated order. The
//! page is server-rendered with askama; HTMX posts control events and swaps
//! back only the regions that changed.
//!
//! # Layers
//!
//! - [`catalog`], [`storage`], [`cart`], [`timer`]: domain state
//! - [`controller`]: command dispatch and region invalidation
//! - [`views`]: pure rendering
//! - [`routes`], [`middleware`], [`state`]: the HTTP surface

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
pub mod timer;
pub mod views;

use std::time::Duration;

use axum::{Router, http::Request, response::Response, routing::get};
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are added by the binary so tests run without a client.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
