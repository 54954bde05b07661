//! QuickBite storefront server.
//!
//! Serves the food-ordering storefront on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with HTMX for interactivity
//! - Askama templates for server-side rendering
//! - Menu from a JSON file or the built-in list
//! - Cart persisted as JSON under the data directory
//! - Background task firing notification and checkout timers

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use quickbite_storefront::{
    app,
    catalog::{Catalog, CatalogError},
    config::{ConfigError, StorefrontConfig},
    state::AppState,
    storage::FileStorage,
};
use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Failures that stop the server from starting or running.
#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("server I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quickbite_storefront=info,tower_http=debug".into());

    // JSON logs when asked for, text otherwise
    let is_json = std::env::var("QUICKBITE_LOG_FORMAT").is_ok_and(|v| v == "json");
    let json_layer = is_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn load_catalog(config: &StorefrontConfig) -> Result<Catalog, CatalogError> {
    match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path),
        None => {
            tracing::info!("Using built-in menu");
            Ok(Catalog::builtin())
        }
    }
}

async fn run(config: StorefrontConfig) -> Result<(), StartupError> {
    let catalog = load_catalog(&config)?;
    tracing::info!(items = catalog.len(), "Menu loaded");

    let storage = FileStorage::new(config.data_dir.clone());
    tracing::info!(data_dir = %config.data_dir.display(), "Cart storage ready");

    let state = AppState::new(config.clone(), catalog, storage);
    let timer_driver = state.start_timer_driver();

    let app = app(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("storefront listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    timer_driver.abort();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration from environment (needed for Sentry init)
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Storefront stopped");
            ExitCode::FAILURE
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
