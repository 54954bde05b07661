//! Rendering storefront state into page regions.

use askama::Template;

use crate::controller::{Page, Refresh, Region, Storefront};
use crate::storage::Storage;
use crate::views::{self, PageTemplate, PagesTemplate};

/// The full document for the current state.
///
/// # Errors
///
/// Returns an error if any region fails to render.
pub fn full_page<S: Storage>(storefront: &Storefront<S>) -> askama::Result<PageTemplate> {
    full_page_showing(storefront, storefront.page())
}

/// The full document with `page` visible, leaving the session's active page
/// untouched.
///
/// # Errors
///
/// Returns an error if any region fails to render.
pub fn full_page_showing<S: Storage>(
    storefront: &Storefront<S>,
    page: Page,
) -> askama::Result<PageTemplate> {
    Ok(PageTemplate {
        search: storefront.search().to_string(),
        badge: views::badge(storefront.cart().count()).render()?,
        notification: views::notification(storefront.notification()).render()?,
        pages: pages(storefront, page)?.render()?,
    })
}

/// Out-of-band fragments for every region in `refresh`, concatenated.
///
/// # Errors
///
/// Returns an error if any region fails to render.
pub fn out_of_band<S: Storage>(
    storefront: &Storefront<S>,
    refresh: &Refresh,
) -> askama::Result<String> {
    let mut html = String::new();
    for region in refresh.regions() {
        let fragment = match region {
            Region::Categories => category_bar(storefront).out_of_band().render()?,
            Region::Menu => menu_grid(storefront).out_of_band().render()?,
            Region::Cart => cart_content(storefront).out_of_band().render()?,
            Region::Badge => views::badge(storefront.cart().count())
                .out_of_band()
                .render()?,
            Region::Notification => views::notification(storefront.notification())
                .out_of_band()
                .render()?,
            Region::Pages => pages(storefront, storefront.page())?
                .out_of_band()
                .render()?,
        };
        html.push_str(&fragment);
    }
    Ok(html)
}

fn category_bar<S: Storage>(storefront: &Storefront<S>) -> views::CategoryBarTemplate {
    views::category_bar(&storefront.catalog().categories(), storefront.filter())
}

fn menu_grid<S: Storage>(storefront: &Storefront<S>) -> views::MenuGridTemplate {
    views::catalog_view(&storefront.visible_items())
}

fn cart_content<S: Storage>(storefront: &Storefront<S>) -> views::CartContentTemplate {
    let cart = storefront.cart();
    views::cart_view(cart.entries(), &cart.totals())
}

fn pages<S: Storage>(storefront: &Storefront<S>, page: Page) -> askama::Result<PagesTemplate> {
    views::pages(
        page,
        &category_bar(storefront),
        &menu_grid(storefront),
        &cart_content(storefront),
    )
}
