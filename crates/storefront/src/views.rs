//! View renderer.
//!
//! Pure projections from catalog and cart data to askama templates. Nothing
//! here reads the cart store or any other state; callers pass in what should
//! be shown and mount the rendered HTML. Every region template has an `oob`
//! flag so the same fragment can be swapped in place or out-of-band.

use askama::Template;
use askama_web::WebTemplate;
use quickbite_core::{CartEntry, Category, CategoryFilter, MenuItem, Totals};

use crate::controller::{Notification, Page};
use crate::filters;

/// Menu card display data.
#[derive(Debug, Clone)]
pub struct MenuCardView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl From<&MenuItem> for MenuCardView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.display_compact(),
            image: item.image.clone(),
        }
    }
}

/// Category filter button display data.
#[derive(Debug, Clone)]
pub struct CategoryButtonView {
    pub value: String,
    pub label: String,
    pub active: bool,
}

/// Cart row display data.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartEntry> for CartLineView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            id: entry.item.id.as_i32(),
            name: entry.item.name.clone(),
            image: entry.item.image.clone(),
            unit_price: entry.item.price.display_compact(),
            quantity: entry.quantity,
            line_total: entry.line_total().to_string(),
        }
    }
}

/// Order summary display data, formatted to two decimals.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub subtotal: String,
    pub tax: String,
    pub delivery: String,
    pub total: String,
}

impl From<&Totals> for SummaryView {
    fn from(totals: &Totals) -> Self {
        Self {
            subtotal: totals.subtotal.to_string(),
            tax: totals.tax.to_string(),
            delivery: totals.delivery.to_string(),
            total: totals.total.to_string(),
        }
    }
}

/// Cart display data. `summary` is `None` for an empty cart.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub summary: Option<SummaryView>,
}

impl CartView {
    /// An empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lines: Vec::new(),
            summary: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Region templates
// =============================================================================

/// Category filter bar.
#[derive(Template, WebTemplate)]
#[template(path = "partials/category_bar.html")]
pub struct CategoryBarTemplate {
    pub buttons: Vec<CategoryButtonView>,
    pub oob: bool,
}

/// Menu grid.
#[derive(Template, WebTemplate)]
#[template(path = "partials/menu_grid.html")]
pub struct MenuGridTemplate {
    pub items: Vec<MenuCardView>,
    pub oob: bool,
}

/// Cart contents: rows and summary, or the empty state.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_content.html")]
pub struct CartContentTemplate {
    pub cart: CartView,
    pub oob: bool,
}

/// Cart count badge.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
    pub oob: bool,
}

/// Toast notification.
#[derive(Template, WebTemplate)]
#[template(path = "partials/notification.html")]
pub struct NotificationTemplate {
    pub message: Option<String>,
    pub kind: &'static str,
    pub oob: bool,
}

/// Both page containers. Inner regions are pre-rendered HTML.
#[derive(Template, WebTemplate)]
#[template(path = "partials/pages.html")]
pub struct PagesTemplate {
    pub cart_active: bool,
    pub category_bar: String,
    pub menu_grid: String,
    pub cart_content: String,
    pub oob: bool,
}

/// The full document.
#[derive(Template, WebTemplate)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub search: String,
    pub badge: String,
    pub notification: String,
    pub pages: String,
}

// =============================================================================
// Projections
// =============================================================================

/// One card per item, in the given order.
#[must_use]
pub fn catalog_view(items: &[&MenuItem]) -> MenuGridTemplate {
    MenuGridTemplate {
        items: items.iter().map(|item| MenuCardView::from(*item)).collect(),
        oob: false,
    }
}

/// Rows and summary for a cart snapshot.
#[must_use]
pub fn cart_view(entries: &[CartEntry], totals: &Totals) -> CartContentTemplate {
    let cart = if entries.is_empty() {
        CartView::empty()
    } else {
        CartView {
            lines: entries.iter().map(CartLineView::from).collect(),
            summary: Some(SummaryView::from(totals)),
        }
    };
    CartContentTemplate { cart, oob: false }
}

/// The cart count badge.
#[must_use]
pub const fn badge(count: u32) -> CartCountTemplate {
    CartCountTemplate { count, oob: false }
}

/// "All" followed by one button per category, marking the active filter.
#[must_use]
pub fn category_bar(categories: &[Category], active: CategoryFilter) -> CategoryBarTemplate {
    let mut buttons = vec![CategoryButtonView {
        value: CategoryFilter::All.to_string(),
        label: "All".to_string(),
        active: active == CategoryFilter::All,
    }];
    buttons.extend(categories.iter().map(|category| CategoryButtonView {
        value: category.as_str().to_string(),
        label: category.label().to_string(),
        active: active == CategoryFilter::Only(*category),
    }));
    CategoryBarTemplate {
        buttons,
        oob: false,
    }
}

/// The toast, hidden when there is nothing to show.
#[must_use]
pub fn notification(current: Option<&Notification>) -> NotificationTemplate {
    NotificationTemplate {
        message: current.map(|n| n.message.clone()),
        kind: current.map_or("info", |n| n.kind.as_str()),
        oob: false,
    }
}

/// Both page containers with `page` visible.
///
/// # Errors
///
/// Returns an error if an inner region fails to render.
pub fn pages(
    page: Page,
    category_bar: &CategoryBarTemplate,
    menu_grid: &MenuGridTemplate,
    cart_content: &CartContentTemplate,
) -> askama::Result<PagesTemplate> {
    Ok(PagesTemplate {
        cart_active: page == Page::Cart,
        category_bar: category_bar.render()?,
        menu_grid: menu_grid.render()?,
        cart_content: cart_content.render()?,
        oob: false,
    })
}

macro_rules! out_of_band {
    ($($template:ty),* $(,)?) => {
        $(
            impl $template {
                /// Mark the fragment for an out-of-band swap.
                #[must_use]
                pub fn out_of_band(mut self) -> Self {
                    self.oob = true;
                    self
                }
            }
        )*
    };
}

out_of_band!(
    CategoryBarTemplate,
    MenuGridTemplate,
    CartContentTemplate,
    CartCountTemplate,
    NotificationTemplate,
    PagesTemplate,
);
