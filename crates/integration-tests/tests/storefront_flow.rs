//! End-to-end storefront flows over the HTTP router.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::http::{StatusCode, header};
use quickbite_integration_tests::{FAST_TIMINGS, TestContext, body_text};

async fn wait_out_timers() {
    let longest = FAST_TIMINGS.notification.max(FAST_TIMINGS.checkout_delay);
    tokio::time::sleep(longest + Duration::from_millis(20)).await;
}

// =============================================================================
// Shopping
// =============================================================================

#[tokio::test]
async fn test_browse_add_and_checkout() {
    let ctx = TestContext::new();

    for control in ["add:1", "add:3", "add:3"] {
        let response = ctx.event("menu", control).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = ctx.event("nav", "show:cart").await;
    let html = body_text(response).await;
    assert!(html.contains("id=\"cartPage\" class=\"page active\""));
    assert!(html.contains("₹657.00"));
    assert!(html.contains("₹118.26"));
    assert!(html.contains("₹815.26"));

    let response = ctx.event("cart", "checkout").await;
    let html = body_text(response).await;
    assert!(html.contains("Order placed! Total: ₹815.26"));

    // Still there until the pause ends.
    assert!(ctx.saved_cart().unwrap().contains("Chicken Burger"));

    wait_out_timers().await;
    let response = ctx.get("/events/tick").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("id=\"homePage\" class=\"page active\""));
    assert!(html.contains(">0</span>"));
    assert!(html.contains("Your cart is empty"));

    assert_eq!(ctx.saved_cart().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_stepper_and_remove_update_cart_region() {
    let ctx = TestContext::new();
    ctx.event("menu", "add:5").await;

    let html = body_text(ctx.event("cart", "increase:5").await).await;
    assert!(html.contains("id=\"cartContent\""));
    assert!(html.contains(">2</span>"));

    let html = body_text(ctx.event("cart", "decrease:5").await).await;
    assert!(html.contains(">1</span>"));

    let html = body_text(ctx.event("cart", "remove:5").await).await;
    assert!(html.contains("Item removed from cart"));
    assert!(html.contains("Your cart is empty"));
    assert_eq!(ctx.saved_cart().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_empty_checkout_schedules_nothing() {
    let ctx = TestContext::new();
    let html = body_text(ctx.event("cart", "checkout").await).await;
    assert!(html.contains("Your cart is empty"));
    assert!(ctx.saved_cart().is_none());
}

#[tokio::test]
async fn test_notification_dismissed_by_tick() {
    let ctx = TestContext::new();
    let html = body_text(ctx.event("menu", "add:10").await).await;
    assert!(html.contains("Tiramisu added to cart!"));

    wait_out_timers().await;
    let html = body_text(ctx.get("/events/tick").await).await;
    assert!(html.contains("id=\"notification\""));
    assert!(!html.contains("Tiramisu added to cart!"));

    // Nothing left to send.
    let response = ctx.get("/events/tick").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// =============================================================================
// Browsing
// =============================================================================

#[tokio::test]
async fn test_category_and_search_combine() {
    let ctx = TestContext::new();

    let html = body_text(ctx.event("categories", "category:dessert").await).await;
    assert!(html.contains("Chocolate Brownie"));
    assert!(html.contains("Tiramisu"));
    assert!(!html.contains("Margherita Pizza"));

    let html = body_text(ctx.search("TIRA").await).await;
    assert!(html.contains("Tiramisu"));
    assert!(!html.contains("Chocolate Brownie"));

    ctx.event("categories", "category:all").await;
    let html = body_text(ctx.search("chicken").await).await;
    assert!(html.contains("Chicken Burger"));
    assert!(html.contains("Butter Chicken"));
    assert!(html.contains("Chicken Fried Rice"));
    assert!(!html.contains("Paneer Tikka"));

    let html = body_text(ctx.search("sushi").await).await;
    assert!(html.contains("No dishes match your search."));
}

#[tokio::test]
async fn test_browse_returns_to_catalog() {
    let ctx = TestContext::new();
    ctx.event("nav", "show:cart").await;
    let html = body_text(ctx.event("cart", "browse").await).await;
    assert!(html.contains("id=\"homePage\" class=\"page active\""));
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new();
    ctx.event("menu", "add:2").await;
    ctx.event("menu", "add:2").await;

    let restarted = ctx.restart();
    let session = restarted.session().unwrap();
    let cart = session.storefront().cart();
    assert_eq!(cart.count(), 2);
    assert_eq!(cart.entries().len(), 1);
    assert_eq!(
        cart.entries().first().unwrap().item.name,
        "Pepperoni Pizza"
    );
}

#[tokio::test]
async fn test_malformed_saved_cart_starts_empty() {
    let ctx = TestContext::new();
    std::fs::write(ctx.data_dir().join("cart.json"), "{not json").unwrap();

    let state = ctx.restart();
    let session = state.session().unwrap();
    assert!(session.storefront().cart().cart().is_empty());
    assert!(session.storefront().notification().is_none());
}

#[tokio::test]
async fn test_saved_cart_format() {
    let ctx = TestContext::new();
    ctx.event("menu", "add:9").await;

    let saved = ctx.saved_cart().unwrap();
    assert!(saved.starts_with('['));
    assert!(saved.contains("\"id\":9"));
    assert!(saved.contains("\"price\":129"));
    assert!(saved.contains("\"category\":\"dessert\""));
    assert!(saved.contains("\"quantity\":1"));
}

// =============================================================================
// Protocol
// =============================================================================

#[tokio::test]
async fn test_plain_form_post_redirects_home() {
    let ctx = TestContext::new();
    let response = ctx.form_post("menu", "add:4").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    let html = body_text(ctx.get("/").await).await;
    assert!(html.contains(">1</span>"));
}

#[tokio::test]
async fn test_malformed_events_are_rejected() {
    let ctx = TestContext::new();

    for (container, control) in [
        ("sidebar", "add:1"),
        ("menu", "explode:1"),
        ("menu", "add:pizza"),
        ("categories", "category:sushi"),
        ("cart", "remove"),
    ] {
        let response = ctx.event(container, control).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "{container} {control}"
        );
    }
    assert!(ctx.saved_cart().is_none());
}

#[tokio::test]
async fn test_unknown_item_is_ignored() {
    let ctx = TestContext::new();
    let response = ctx.event("menu", "add:404").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(ctx.saved_cart().is_none());
}

#[tokio::test]
async fn test_responses_carry_headers() {
    let ctx = TestContext::new();
    let response = ctx.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-request-id").is_some());
    assert!(response.headers().get(header::CONTENT_SECURITY_POLICY).is_some());
}

#[tokio::test]
async fn test_stylesheet_served() {
    let ctx = TestContext::new();
    let response = ctx.get("/static/css/main.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css"
    );
}
