//! Wishlist aggregate.
//!
//! The local aggregate mirrors the cart's shape but keeps set semantics
//! keyed on product alone, and `toggle` is its only mutation entry
//! point. The remote variant drives the API's wishlist endpoints and
//! exists for contexts that already know the desired end state from a
//! membership check; it requires an authenticated session and surfaces a
//! login redirect instead of a silent no-op.

use std::time::Duration;

use telar_core::{Product, ProductId, WishlistEntry};
use thiserror::Error;

use crate::catalog::{CatalogClient, CatalogError};
use crate::models::{SessionView, storage_keys};
use crate::notify::{Kind, Notifier};
use crate::store::{ClientStore, StoreError, StoreEvent};

/// How long the notification stays up before the login redirect fires.
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Result of a toggle: the membership state after the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Errors from the remote-backed wishlist.
#[derive(Debug, Error)]
pub enum WishlistError {
    /// No authenticated session; the caller should show the notification
    /// and redirect to the login view after [`LOGIN_REDIRECT_DELAY`].
    #[error("not authenticated")]
    NotAuthenticated {
        /// Login path carrying the return path.
        login_url: String,
    },

    /// API call failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Build the login path with a return path, e.g.
/// `/login?return_to=%2Fproducts%2F7`.
#[must_use]
pub fn login_redirect(return_to: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("return_to", return_to)
        .finish();
    format!("/login?{query}")
}

/// The local wishlist: favorited products, persisted like the cart.
pub struct WishlistAggregate {
    store: ClientStore,
    notifier: Notifier,
    entries: Vec<WishlistEntry>,
}

impl WishlistAggregate {
    /// Create the aggregate, loading whatever the store currently holds.
    #[must_use]
    pub fn new(store: ClientStore, notifier: Notifier) -> Self {
        let entries = store.load(storage_keys::WISHLIST);
        Self {
            store,
            notifier,
            entries,
        }
    }

    /// Toggle a product's membership: remove it if present, insert an
    /// entry built from the snapshot otherwise. Two calls with the same
    /// id return the wishlist to its original membership.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting the collection fails.
    pub fn toggle(&mut self, product: &Product) -> Result<Toggle, StoreError> {
        let state = if self.contains(product.id) {
            self.entries.retain(|e| e.product_id != product.id);
            self.notifier
                .notify(format!("\"{}\" removed from wishlist", product.name), Kind::Info);
            Toggle::Removed
        } else {
            self.entries.push(WishlistEntry::from_product(product));
            self.notifier
                .notify(format!("\"{}\" added to wishlist", product.name), Kind::Success);
            Toggle::Added
        };
        self.store.save(storage_keys::WISHLIST, &self.entries)?;
        Ok(state)
    }

    /// Whether the product is currently wishlisted.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.entries.iter().any(|e| e.product_id == product_id)
    }

    /// Current entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Number of favorited products (badge value).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reload from the store in response to a change event for the
    /// wishlist key. Events for other keys are ignored.
    pub fn refresh(&mut self, event: &StoreEvent) {
        if event.key != storage_keys::WISHLIST {
            return;
        }
        self.entries = self.store.load(storage_keys::WISHLIST);
        tracing::debug!(count = self.entries.len(), "wishlist reloaded from store");
    }
}

/// Remote-backed wishlist for authenticated users.
///
/// Unlike the local aggregate there is no blind toggle here: a
/// membership check against the API decides whether to add or remove, so
/// each mutation call drives a known end state. Every session fetch is
/// persisted to the client store as the session snapshot other contexts
/// read.
pub struct RemoteWishlist {
    client: CatalogClient,
    notifier: Notifier,
    store: ClientStore,
}

impl RemoteWishlist {
    /// Create over an API client and the shared client store.
    #[must_use]
    pub const fn new(client: CatalogClient, notifier: Notifier, store: ClientStore) -> Self {
        Self {
            client,
            notifier,
            store,
        }
    }

    /// The last session snapshot persisted to the client store, if any.
    #[must_use]
    pub fn cached_session(&self) -> Option<SessionView> {
        self.store.load_object(storage_keys::SESSION)
    }

    /// Toggle a product on the server-side wishlist.
    ///
    /// Checks the session first; without one this notifies the user and
    /// returns [`WishlistError::NotAuthenticated`] carrying the login
    /// redirect for `return_to`.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError` when unauthenticated or when an API call
    /// fails.
    pub async fn sync_toggle(
        &self,
        product_id: ProductId,
        return_to: &str,
    ) -> Result<Toggle, WishlistError> {
        let session = self.client.session().await?;
        if let Err(e) = self.store.save_object(storage_keys::SESSION, &session) {
            // A stale snapshot is tolerable; the toggle itself proceeds.
            tracing::warn!(error = %e, "failed to persist session snapshot");
        }
        let Some(user) = session.user.filter(|_| session.authenticated) else {
            self.notifier
                .notify("Sign in to save products to your wishlist", Kind::Warning);
            return Err(WishlistError::NotAuthenticated {
                login_url: login_redirect(return_to),
            });
        };

        if self.client.wishlist_check(product_id).await? {
            self.client.wishlist_remove(user.id, product_id).await?;
            self.notifier.notify("Removed from wishlist", Kind::Info);
            Ok(Toggle::Removed)
        } else {
            self.client.wishlist_add(product_id).await?;
            self.notifier.notify("Added to wishlist", Kind::Success);
            Ok(Toggle::Added)
        }
    }
}
