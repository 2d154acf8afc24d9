//! Client-side composition root.
//!
//! Wires the configured storage directory, API base URL, and fetch
//! timeout into one shared store, notifier, and catalog client, and
//! hands out aggregates built over them. Every aggregate created from
//! the same context shares the same store and notification surface, so
//! writes in one are observable from the others.

use thiserror::Error;

use crate::cart::CartAggregate;
use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::notify::Notifier;
use crate::store::{ClientStore, StoreError};
use crate::wishlist::{RemoteWishlist, WishlistAggregate};

/// Errors from building the client context.
#[derive(Debug, Error)]
pub enum ClientContextError {
    /// The storage directory could not be prepared.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The catalog client could not be constructed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Shared client-side services behind the page aggregates.
pub struct ClientContext {
    store: ClientStore,
    notifier: Notifier,
    catalog: CatalogClient,
}

impl ClientContext {
    /// Build the context from configuration: a file-backed store rooted
    /// at the configured storage directory and a catalog client against
    /// the configured API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ClientContextError` if the storage directory cannot be
    /// created or the API base URL does not parse.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ClientContextError> {
        Ok(Self {
            store: ClientStore::file_backed(&config.storage_dir)?,
            notifier: Notifier::new(),
            catalog: CatalogClient::from_config(config)?,
        })
    }

    /// A cart aggregate over the shared store and notifier.
    #[must_use]
    pub fn cart(&self) -> CartAggregate {
        CartAggregate::new(self.store.clone(), self.notifier.clone())
    }

    /// A local wishlist aggregate over the shared store and notifier.
    #[must_use]
    pub fn wishlist(&self) -> WishlistAggregate {
        WishlistAggregate::new(self.store.clone(), self.notifier.clone())
    }

    /// A remote-backed wishlist over the shared catalog client.
    #[must_use]
    pub fn remote_wishlist(&self) -> RemoteWishlist {
        RemoteWishlist::new(
            self.catalog.clone(),
            self.notifier.clone(),
            self.store.clone(),
        )
    }

    /// The shared catalog client.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// The shared client store.
    #[must_use]
    pub const fn store(&self) -> &ClientStore {
        &self.store
    }

    /// The shared notification surface.
    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}
