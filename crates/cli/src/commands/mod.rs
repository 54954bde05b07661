//! CLI command implementations.
//!
//! Commands write their output to the given writer and return errors for
//! `main` to report.

pub mod cart;
pub mod menu;

use std::io;

use quickbite_storefront::cart::{CartError, CartStore};
use quickbite_storefront::catalog::{Catalog, CatalogError};
use quickbite_storefront::config::{ConfigError, StorefrontConfig};
use quickbite_storefront::storage::FileStorage;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("menu error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Cart(#[from] CartError),

    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

/// The menu and the storage the storefront keeps its cart in.
pub struct Context {
    pub catalog: Catalog,
    pub storage: FileStorage,
}

impl Context {
    /// Load the menu and open the data directory named by `config`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a configured menu file cannot be loaded.
    pub fn load(config: &StorefrontConfig) -> Result<Self, CliError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::builtin(),
        };
        tracing::debug!(data_dir = %config.data_dir.display(), "Using data directory");

        Ok(Self {
            catalog,
            storage: FileStorage::new(config.data_dir.clone()),
        })
    }

    /// The saved cart.
    #[must_use]
    pub fn cart(&self) -> CartStore<FileStorage> {
        CartStore::hydrate(self.storage.clone())
    }
}
