//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::controller::{Command, Refresh, Storefront};
use crate::error::{AppError, Result};
use crate::storage::Storage;

/// Storage as held by the running server.
pub type SharedStorage = Box<dyn Storage + Send>;

/// The shopper's storefront plus region updates not yet sent to the page.
///
/// Timers fired by the background driver have no request to answer, so
/// their regions wait here until the next request picks them up.
pub struct ShopperSession {
    storefront: Storefront<SharedStorage>,
    unsent: Refresh,
}

impl ShopperSession {
    #[must_use]
    pub const fn storefront(&self) -> &Storefront<SharedStorage> {
        &self.storefront
    }

    /// Fire due timers, apply `command`, and return every region the page
    /// has not seen yet.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> Refresh {
        let mut refresh = self.tick(now);
        refresh.merge(self.storefront.dispatch(command, now));
        refresh
    }

    /// Fire due timers and drain pending regions.
    pub fn tick(&mut self, now: Instant) -> Refresh {
        let mut refresh = std::mem::take(&mut self.unsent);
        refresh.merge(self.storefront.poll_timers(now));
        refresh
    }

    fn fire_timers(&mut self, now: Instant) {
        let fired = self.storefront.poll_timers(now);
        self.unsent.merge(fired);
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The storefront serves a single
/// shopper, so one session sits behind a mutex; it is never held across an
/// await point.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    session: Mutex<ShopperSession>,
}

impl AppState {
    /// Create the application state, hydrating the cart from `storage`.
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: impl Storage + Send + 'static,
    ) -> Self {
        let storefront =
            Storefront::new(catalog, Box::new(storage) as SharedStorage, config.timings);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                session: Mutex::new(ShopperSession {
                    storefront,
                    unsent: Refresh::none(),
                }),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Lock the shopper session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn session(&self) -> Result<MutexGuard<'_, ShopperSession>> {
        self.inner
            .session
            .lock()
            .map_err(|_| AppError::Internal("storefront session lock poisoned".to_string()))
    }

    /// Fire any timers that are due now.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the session lock is poisoned.
    pub fn fire_timers(&self, now: Instant) -> Result<()> {
        self.session()?.fire_timers(now);
        Ok(())
    }

    /// Spawn the background task that fires timers every configured tick.
    pub fn start_timer_driver(&self) -> JoinHandle<()> {
        let state = self.clone();
        let tick = self.config().tick;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(tick_ms = tick.as_millis(), "Timer driver started");

            loop {
                interval.tick().await;
                if let Err(e) = state.fire_timers(Instant::now()) {
                    tracing::error!(error = %e, "Timer driver stopped");
                    break;
                }
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use quickbite_core::ItemId;

    use super::*;
    use crate::controller::Region;
    use crate::storage::MemoryStorage;

    fn state() -> AppState {
        AppState::new(
            StorefrontConfig::default(),
            Catalog::builtin(),
            MemoryStorage::new(),
        )
    }

    #[test]
    fn test_background_fired_regions_reach_next_request() {
        let state = state();
        let start = Instant::now();
        state
            .session()
            .unwrap()
            .dispatch(Command::AddToCart(ItemId::new(1)), start);

        // The driver dismisses the notification with no request in flight.
        state.fire_timers(start + Duration::from_secs(3)).unwrap();
        assert!(state.session().unwrap().storefront().notification().is_none());

        let refresh = state.session().unwrap().tick(start + Duration::from_secs(4));
        assert!(refresh.contains(Region::Notification));

        // Drained once.
        let refresh = state.session().unwrap().tick(start + Duration::from_secs(5));
        assert!(refresh.is_empty());
    }

    #[tokio::test]
    async fn test_timer_driver_fires_due_timers() {
        let config = StorefrontConfig {
            tick: Duration::from_millis(5),
            timings: crate::controller::Timings {
                notification: Duration::from_millis(1),
                checkout_delay: Duration::from_millis(1),
            },
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config, Catalog::builtin(), MemoryStorage::new());
        state
            .session()
            .unwrap()
            .dispatch(Command::AddToCart(ItemId::new(2)), Instant::now());

        let driver = state.start_timer_driver();
        tokio::time::sleep(Duration::from_millis(50)).await;
        driver.abort();

        assert!(state.session().unwrap().storefront().notification().is_none());
    }
}
