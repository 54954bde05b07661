//! Interaction controller.
//!
//! [`Storefront`] is the application root for one shopper: it owns the
//! catalog, the cart store and the little UI state that lives outside the
//! cart (active page, category filter, search term, notification). Input
//! arrives as [`Command`]s; each call reports which page [`Region`]s need
//! re-rendering so the host can swap just those.
//!
//! Time is passed in explicitly. Notification dismissal and the
//! post-checkout pause are single-slot timers fired from
//! [`Storefront::poll_timers`].

pub mod dispatch;

use std::time::{Duration, Instant};

use quickbite_core::{CategoryFilter, ItemId, MenuItem, OrderReceipt};
use tracing::instrument;

use crate::cart::{CartError, CartEvent, CartStore};
use crate::catalog::Catalog;
use crate::storage::Storage;
use crate::timer::TimerSlot;

pub use dispatch::{Container, DispatchError, resolve};

const STORAGE_WARNING: &str = "Couldn't save your cart. Changes will be kept until you leave.";

/// Which view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Catalog,
    Cart,
}

impl Page {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "home",
            Self::Cart => "cart",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "home" => Some(Self::Catalog),
            "cart" => Some(Self::Cart),
            _ => None,
        }
    }
}

/// A user intent, already resolved from a control event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectCategory(CategoryFilter),
    Search(String),
    AddToCart(ItemId),
    ChangeQuantity { id: ItemId, delta: i32 },
    RemoveFromCart(ItemId),
    Checkout,
    Navigate(Page),
}

/// An independently re-renderable part of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Categories,
    Menu,
    Cart,
    Badge,
    Notification,
    /// Both page containers, including the category bar, menu and cart.
    Pages,
}

/// Regions invalidated by a command or timer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refresh {
    regions: Vec<Region>,
}

impl Refresh {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    pub fn mark(&mut self, region: Region) {
        if !self.regions.contains(&region) {
            self.regions.push(region);
        }
    }

    pub fn merge(&mut self, other: Self) {
        for region in other.regions {
            self.mark(region);
        }
    }

    #[must_use]
    pub fn contains(&self, region: Region) -> bool {
        self.regions.contains(&region)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions to render, with those already covered by [`Region::Pages`]
    /// left out.
    #[must_use]
    pub fn regions(&self) -> Vec<Region> {
        let pages = self.contains(Region::Pages);
        self.regions
            .iter()
            .copied()
            .filter(|region| {
                !pages || !matches!(region, Region::Categories | Region::Menu | Region::Cart)
            })
            .collect()
    }
}

/// Notification tone, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
        }
    }
}

/// The transient message currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// Timer durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long a notification stays visible.
    pub notification: Duration,
    /// Pause between order confirmation and clearing the cart.
    pub checkout_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            notification: Duration::from_millis(2000),
            checkout_delay: Duration::from_millis(2000),
        }
    }
}

/// One shopper's storefront session.
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: Catalog,
    cart: CartStore<S>,
    page: Page,
    filter: CategoryFilter,
    search: String,
    notification: Option<Notification>,
    dismiss: TimerSlot<()>,
    checkout: TimerSlot<OrderReceipt>,
    last_order: Option<OrderReceipt>,
    timings: Timings,
}

impl<S: Storage> Storefront<S> {
    /// Start a session, hydrating the cart from `storage`.
    pub fn new(catalog: Catalog, storage: S, timings: Timings) -> Self {
        Self {
            catalog,
            cart: CartStore::hydrate(storage),
            page: Page::default(),
            filter: CategoryFilter::default(),
            search: String::new(),
            notification: None,
            dismiss: TimerSlot::new(),
            checkout: TimerSlot::new(),
            last_order: None,
            timings,
        }
    }

    /// Apply a command.
    #[instrument(skip(self, now))]
    pub fn dispatch(&mut self, command: Command, now: Instant) -> Refresh {
        let mut refresh = Refresh::none();

        match command {
            Command::SelectCategory(filter) => {
                self.filter = filter;
                refresh.mark(Region::Categories);
                refresh.mark(Region::Menu);
            }
            Command::Search(term) => {
                self.search = term;
                refresh.mark(Region::Menu);
            }
            Command::AddToCart(id) => match self.cart.add(&self.catalog, id) {
                Ok(CartEvent::Added { name, .. }) => {
                    refresh.mark(Region::Badge);
                    self.notify(
                        now,
                        format!("{name} added to cart!"),
                        NotificationKind::Success,
                        &mut refresh,
                    );
                }
                Ok(_) | Err(CartError::ItemNotFound(_)) => {}
                Err(e) => tracing::warn!(error = %e, "Unexpected cart error on add"),
            },
            Command::ChangeQuantity { id, delta } => {
                let event = self.cart.update_quantity(id, delta);
                self.apply_cart_event(&event, now, &mut refresh);
            }
            Command::RemoveFromCart(id) => {
                let event = self.cart.remove(id);
                self.apply_cart_event(&event, now, &mut refresh);
            }
            Command::Checkout => self.checkout(now, &mut refresh),
            Command::Navigate(page) => {
                self.page = page;
                refresh.mark(Region::Pages);
            }
        }

        self.surface_storage_warning(now, &mut refresh);
        refresh
    }

    /// Fire any timers due at `now`.
    pub fn poll_timers(&mut self, now: Instant) -> Refresh {
        let mut refresh = Refresh::none();

        if self.dismiss.fire_due(now).is_some() {
            self.notification = None;
            refresh.mark(Region::Notification);
        }

        if let Some(receipt) = self.checkout.fire_due(now) {
            self.cart.clear();
            self.page = Page::Catalog;
            tracing::info!(
                order = %receipt.reference,
                "Checkout completed, cart cleared"
            );
            refresh.mark(Region::Pages);
            refresh.mark(Region::Badge);
        }

        self.surface_storage_warning(now, &mut refresh);
        refresh
    }

    fn checkout(&mut self, now: Instant, refresh: &mut Refresh) {
        if self.cart.cart().is_empty() {
            self.notify(
                now,
                "Your cart is empty".to_string(),
                NotificationKind::Info,
                refresh,
            );
            return;
        }

        let receipt = OrderReceipt::for_cart(self.cart.cart());
        tracing::info!(
            order = %receipt.reference,
            items = receipt.item_count,
            total = %receipt.totals.total,
            "Order placed"
        );
        self.notify(
            now,
            format!("Order placed! Total: {}", receipt.totals.total),
            NotificationKind::Success,
            refresh,
        );
        self.checkout.arm(now, self.timings.checkout_delay, receipt.clone());
        self.last_order = Some(receipt);
    }

    fn apply_cart_event(&mut self, event: &CartEvent, now: Instant, refresh: &mut Refresh) {
        match event {
            CartEvent::QuantityChanged { .. } | CartEvent::Cleared => {
                refresh.mark(Region::Cart);
                refresh.mark(Region::Badge);
            }
            CartEvent::Removed { .. } => {
                refresh.mark(Region::Cart);
                refresh.mark(Region::Badge);
                self.notify(
                    now,
                    "Item removed from cart".to_string(),
                    NotificationKind::Info,
                    refresh,
                );
            }
            CartEvent::Added { .. } => refresh.mark(Region::Badge),
            CartEvent::Unchanged => {}
        }
    }

    fn notify(
        &mut self,
        now: Instant,
        message: String,
        kind: NotificationKind,
        refresh: &mut Refresh,
    ) {
        self.notification = Some(Notification { message, kind });
        self.dismiss.arm(now, self.timings.notification, ());
        refresh.mark(Region::Notification);
    }

    /// Raise the queued storage warning, appended to any notification this
    /// same call already raised.
    fn surface_storage_warning(&mut self, now: Instant, refresh: &mut Refresh) {
        let Some(warning) = self.cart.take_warning() else {
            return;
        };
        tracing::debug!(error = %warning, "Surfacing storage warning");

        let message = match &self.notification {
            Some(current) if refresh.contains(Region::Notification) => {
                format!("{} {STORAGE_WARNING}", current.message)
            }
            _ => STORAGE_WARNING.to_string(),
        };
        self.notify(now, message, NotificationKind::Warning, refresh);
    }

    /// Menu items for the active filter and search term.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&MenuItem> {
        self.catalog.query(self.filter, &self.search)
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub const fn filter(&self) -> CategoryFilter {
        self.filter
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    #[must_use]
    pub const fn last_order(&self) -> Option<&OrderReceipt> {
        self.last_order.as_ref()
    }

    /// Whether a confirmed order is waiting to clear the cart.
    #[must_use]
    pub const fn checkout_pending(&self) -> bool {
        self.checkout.is_armed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quickbite_core::{Category, Price};
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::{CART_KEY, persist};
    use crate::storage::MemoryStorage;

    const TICK: Duration = Duration::from_millis(100);

    fn storefront() -> Storefront<MemoryStorage> {
        Storefront::new(Catalog::builtin(), MemoryStorage::new(), Timings::default())
    }

    fn names(store: &Storefront<MemoryStorage>) -> Vec<&str> {
        store
            .visible_items()
            .into_iter()
            .map(|item| item.name.as_str())
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let store = storefront();
        assert_eq!(store.page(), Page::Catalog);
        assert_eq!(store.filter(), CategoryFilter::All);
        assert_eq!(store.visible_items().len(), 10);
        assert!(store.notification().is_none());
    }

    #[test]
    fn test_filter_and_search_combine() {
        let mut store = storefront();
        let now = Instant::now();

        let refresh = store.dispatch(Command::SelectCategory(Category::Dessert.into()), now);
        assert!(refresh.contains(Region::Menu));
        assert!(refresh.contains(Region::Categories));
        assert_eq!(names(&store), vec!["Chocolate Brownie", "Tiramisu"]);

        store.dispatch(Command::Search("tira".to_string()), now);
        assert_eq!(names(&store), vec!["Tiramisu"]);

        store.dispatch(Command::SelectCategory(CategoryFilter::All), now);
        store.dispatch(Command::Search("Chicken".to_string()), now);
        assert_eq!(
            names(&store),
            vec!["Chicken Burger", "Butter Chicken", "Chicken Fried Rice"]
        );
    }

    #[test]
    fn test_add_notifies_and_refreshes_badge() {
        let mut store = storefront();
        let refresh = store.dispatch(Command::AddToCart(ItemId::new(1)), Instant::now());

        assert!(refresh.contains(Region::Badge));
        assert!(refresh.contains(Region::Notification));
        assert_eq!(
            store.notification().unwrap().message,
            "Margherita Pizza added to cart!"
        );
        assert_eq!(store.cart().count(), 1);
    }

    #[test]
    fn test_add_unknown_item_is_noop() {
        let mut store = storefront();
        let refresh = store.dispatch(Command::AddToCart(ItemId::new(77)), Instant::now());
        assert!(refresh.is_empty());
        assert!(store.cart().cart().is_empty());
        assert!(store.notification().is_none());
    }

    #[test]
    fn test_stepper_and_remove() {
        let mut store = storefront();
        let now = Instant::now();
        store.dispatch(Command::AddToCart(ItemId::new(3)), now);

        let refresh = store.dispatch(
            Command::ChangeQuantity {
                id: ItemId::new(3),
                delta: 1,
            },
            now,
        );
        assert!(refresh.contains(Region::Cart));
        assert!(refresh.contains(Region::Badge));
        assert_eq!(store.cart().count(), 2);

        store.dispatch(
            Command::ChangeQuantity {
                id: ItemId::new(3),
                delta: -2,
            },
            now,
        );
        assert!(store.cart().cart().is_empty());
        assert_eq!(store.notification().unwrap().message, "Item removed from cart");
    }

    #[test]
    fn test_remove_absent_changes_nothing() {
        let mut store = storefront();
        let refresh = store.dispatch(Command::RemoveFromCart(ItemId::new(5)), Instant::now());
        assert!(refresh.is_empty());
        assert!(store.notification().is_none());
    }

    #[test]
    fn test_notification_auto_dismisses() {
        let mut store = storefront();
        let start = Instant::now();
        store.dispatch(Command::AddToCart(ItemId::new(2)), start);

        assert!(store.poll_timers(start + TICK).is_empty());
        assert!(store.notification().is_some());

        let refresh = store.poll_timers(start + Duration::from_secs(2));
        assert!(refresh.contains(Region::Notification));
        assert!(store.notification().is_none());
    }

    #[test]
    fn test_new_notification_restarts_dismiss_timer() {
        let mut store = storefront();
        let start = Instant::now();
        store.dispatch(Command::AddToCart(ItemId::new(2)), start);
        store.dispatch(Command::AddToCart(ItemId::new(4)), start + Duration::from_secs(1));

        store.poll_timers(start + Duration::from_secs(2));
        assert_eq!(
            store.notification().unwrap().message,
            "Veggie Burger added to cart!"
        );
        store.poll_timers(start + Duration::from_secs(3));
        assert!(store.notification().is_none());
    }

    #[test]
    fn test_checkout_clears_after_delay() {
        let mut store = storefront();
        let start = Instant::now();
        store.dispatch(Command::AddToCart(ItemId::new(1)), start);
        store.dispatch(Command::AddToCart(ItemId::new(3)), start);
        store.dispatch(Command::AddToCart(ItemId::new(3)), start);
        store.dispatch(Command::Navigate(Page::Cart), start);

        store.dispatch(Command::Checkout, start);
        assert_eq!(
            store.notification().unwrap().message,
            "Order placed! Total: ₹815.26"
        );
        let receipt = store.last_order().unwrap();
        assert_eq!(receipt.totals.total, Price::new(Decimal::new(81526, 2)));
        assert!(store.checkout_pending());

        // Nothing happens before the delay elapses.
        store.poll_timers(start + TICK);
        assert_eq!(store.cart().count(), 3);
        assert_eq!(store.page(), Page::Cart);

        let refresh = store.poll_timers(start + Duration::from_secs(2));
        assert!(refresh.contains(Region::Pages));
        assert!(refresh.contains(Region::Badge));
        assert!(store.cart().cart().is_empty());
        assert_eq!(store.page(), Page::Catalog);
        assert!(!store.checkout_pending());

        let saved = persist::decode(store.cart().storage().peek(CART_KEY).unwrap()).unwrap();
        assert!(saved.is_empty());
    }

    #[test]
    fn test_repeated_checkout_clears_once() {
        let mut store = storefront();
        let start = Instant::now();
        store.dispatch(Command::AddToCart(ItemId::new(9)), start);
        store.dispatch(Command::Checkout, start);
        store.dispatch(Command::Checkout, start + Duration::from_secs(1));

        // The first deadline has been replaced.
        store.poll_timers(start + Duration::from_secs(2));
        assert_eq!(store.cart().count(), 1);

        store.poll_timers(start + Duration::from_secs(3));
        assert_eq!(store.cart().count(), 0);
        assert!(!store.checkout_pending());
    }

    #[test]
    fn test_checkout_empty_cart_schedules_nothing() {
        let mut store = storefront();
        let start = Instant::now();
        store.dispatch(Command::Checkout, start);
        assert_eq!(store.notification().unwrap().message, "Your cart is empty");
        assert!(!store.checkout_pending());
        assert!(store.last_order().is_none());
    }

    #[test]
    fn test_navigation_refreshes_pages() {
        let mut store = storefront();
        let refresh = store.dispatch(Command::Navigate(Page::Cart), Instant::now());
        assert_eq!(store.page(), Page::Cart);
        assert_eq!(refresh.regions(), vec![Region::Pages]);
    }

    fn failing_storefront() -> Storefront<MemoryStorage> {
        Storefront::new(Catalog::builtin(), MemoryStorage::with_quota(4), Timings::default())
    }

    #[test]
    fn test_storage_failure_surfaces_warning() {
        let mut store = failing_storefront();
        store.dispatch(Command::AddToCart(ItemId::new(1)), Instant::now());

        assert_eq!(store.cart().count(), 1);
        let notification = store.notification().unwrap();
        assert_eq!(notification.kind, NotificationKind::Warning);
        assert!(notification.message.ends_with(STORAGE_WARNING));
    }

    #[test]
    fn test_storage_warning_keeps_add_confirmation() {
        let mut store = failing_storefront();
        let now = Instant::now();
        let refresh = store.dispatch(Command::AddToCart(ItemId::new(1)), now);

        assert!(refresh.contains(Region::Notification));
        let message = &store.notification().unwrap().message;
        assert!(message.contains("Margherita Pizza added to cart!"));
        assert!(message.contains(STORAGE_WARNING));

        // The warning is raised once per failure streak.
        store.dispatch(Command::AddToCart(ItemId::new(3)), now);
        let notification = store.notification().unwrap();
        assert_eq!(notification.message, "Chicken Burger added to cart!");
        assert_eq!(notification.kind, NotificationKind::Success);
    }

    #[test]
    fn test_storage_warning_alone_when_nothing_else_notified() {
        let saved = r#"[{"id":1,"name":"Margherita Pizza","category":"pizza","price":299,
                         "image":"","desc":"","quantity":1}]"#;
        let storage = MemoryStorage::with_quota(4).with_value(CART_KEY, saved);
        let mut store = Storefront::new(Catalog::builtin(), storage, Timings::default());

        let refresh = store.dispatch(
            Command::ChangeQuantity {
                id: ItemId::new(1),
                delta: 1,
            },
            Instant::now(),
        );
        assert!(refresh.contains(Region::Notification));
        assert_eq!(store.cart().count(), 2);
        assert_eq!(store.notification().unwrap().message, STORAGE_WARNING);
    }

    #[test]
    fn test_refresh_regions_fold_into_pages() {
        let mut refresh = Refresh::none();
        refresh.mark(Region::Cart);
        refresh.mark(Region::Badge);
        refresh.mark(Region::Pages);
        refresh.mark(Region::Badge);
        assert_eq!(refresh.regions(), vec![Region::Badge, Region::Pages]);
    }
}
