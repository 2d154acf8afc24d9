//! Cart aggregate.
//!
//! All cart mutation funnels through [`CartAggregate`]; nothing else
//! writes the cart key. The aggregate is a disposable in-memory cache of
//! the persistent client store: every operation persists the full
//! collection, recomputes the badge count, and surfaces validation
//! failures as notifications rather than errors. A rejected operation
//! performs no partial mutation.

use telar_core::{CartLine, LineKey, Product};
use thiserror::Error;
use tokio::sync::watch;

use rust_decimal::Decimal;

use crate::models::storage_keys;
use crate::notify::{Kind, Notifier};
use crate::store::{ClientStore, StoreError, StoreEvent};

/// Why an add was refused. The user has already been notified when one
/// of these is returned; callers only branch on it in tests and flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("product is out of stock")]
    OutOfStock,
    #[error("a size must be selected")]
    SizeRequired,
    #[error("a color must be selected")]
    ColorRequired,
    #[error("only {available} more in stock")]
    InsufficientStock { available: u32 },
}

/// Result of [`CartAggregate::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Line merged or appended; the new total badge count.
    Added { count: u32 },
    /// Refused; the collection is unchanged.
    Rejected(Rejection),
}

/// Result of [`CartAggregate::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Quantity set (after clamping to `[1, stock]`).
    Updated(u32),
    /// Caller drove the quantity to zero; the line was removed.
    Removed,
    /// No line matches the key.
    NotFound,
}

/// The cart: selected lines plus their invariant-preserving operations.
pub struct CartAggregate {
    store: ClientStore,
    notifier: Notifier,
    lines: Vec<CartLine>,
    badge: watch::Sender<u32>,
}

impl CartAggregate {
    /// Create the aggregate, loading whatever the store currently holds.
    #[must_use]
    pub fn new(store: ClientStore, notifier: Notifier) -> Self {
        let lines: Vec<CartLine> = store.load(storage_keys::CART);
        let count = lines.iter().map(|l| l.quantity).sum();
        let (badge, _) = watch::channel(count);
        Self {
            store,
            notifier,
            lines,
            badge,
        }
    }

    /// Add a product selection to the cart.
    ///
    /// A request for zero units reads as the default single unit.
    /// Validation failures notify the user and leave the cart untouched:
    /// no stock at all, a missing size/color selection when the product
    /// offers a choice, or a requested total that would exceed the stock
    /// snapshot (the existing line stays as it was and the remaining
    /// count is reported). On success the matching line's quantity grows,
    /// or a freshly timestamped line is appended, and the collection is
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` only if persisting the updated collection
    /// fails; validation failures are an [`AddOutcome::Rejected`], not an
    /// error.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> Result<AddOutcome, StoreError> {
        let quantity = quantity.max(1);

        if product.stock == 0 {
            self.notifier
                .notify(format!("\"{}\" is out of stock", product.name), Kind::Error);
            return Ok(AddOutcome::Rejected(Rejection::OutOfStock));
        }
        if !product.sizes.is_empty() && size.is_none() {
            self.notifier
                .notify("Choose a size before adding to the cart", Kind::Warning);
            return Ok(AddOutcome::Rejected(Rejection::SizeRequired));
        }
        if !product.colors.is_empty() && color.is_none() {
            self.notifier
                .notify("Choose a color before adding to the cart", Kind::Warning);
            return Ok(AddOutcome::Rejected(Rejection::ColorRequired));
        }

        let key = LineKey::new(product.id, size.clone(), color.clone());
        let existing = self
            .lines
            .iter()
            .find(|l| l.matches(&key))
            .map_or(0, |l| l.quantity);

        if existing + quantity > product.stock {
            // The cart outlives a page load: a re-fetched product can carry
            // a smaller stock snapshot than the line already holds.
            let available = product.stock.saturating_sub(existing);
            self.notifier.notify(
                format!("Only {available} more of \"{}\" in stock", product.name),
                Kind::Error,
            );
            return Ok(AddOutcome::Rejected(Rejection::InsufficientStock {
                available,
            }));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(&key)) {
            line.quantity += quantity;
        } else {
            self.lines
                .push(CartLine::from_product(product, quantity, size, color));
        }
        self.persist()?;

        let count = self.item_count();
        tracing::debug!(product_id = %product.id, quantity, count, "added to cart");
        self.notifier
            .notify(format!("\"{}\" added to cart", product.name), Kind::Success);
        Ok(AddOutcome::Added { count })
    }

    /// Set a line's quantity.
    ///
    /// Zero removes the line; anything else clamps into `[1, stock]`
    /// using the line's stock snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn update_quantity(
        &mut self,
        key: &LineKey,
        new_quantity: u32,
    ) -> Result<UpdateOutcome, StoreError> {
        let Some(index) = self.lines.iter().position(|l| l.matches(key)) else {
            return Ok(UpdateOutcome::NotFound);
        };

        if new_quantity == 0 {
            self.lines.remove(index);
            self.persist()?;
            return Ok(UpdateOutcome::Removed);
        }

        let clamped = self
            .lines
            .get(index)
            .map_or(new_quantity, |l| new_quantity.clamp(1, l.stock.max(1)));
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = clamped;
        }
        self.persist()?;
        Ok(UpdateOutcome::Updated(clamped))
    }

    /// Remove a line unconditionally. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn remove_item(&mut self, key: &LineKey) -> Result<bool, StoreError> {
        let before = self.lines.len();
        self.lines.retain(|l| !l.matches(key));
        if self.lines.len() == before {
            return Ok(false);
        }
        self.persist()?;
        self.notifier.notify("Removed from cart", Kind::Info);
        Ok(true)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.lines.clear();
        self.persist()
    }

    /// Sum of quantities across all lines: the badge value, not a price.
    /// A zero count means the badge is hidden.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Badge channel for count displays; updates after every mutation.
    #[must_use]
    pub fn badge(&self) -> watch::Receiver<u32> {
        self.badge.subscribe()
    }

    /// Reload from the store in response to a change event for the cart
    /// key (another execution context wrote it). Events for other keys
    /// are ignored.
    pub fn refresh(&mut self, event: &StoreEvent) {
        if event.key != storage_keys::CART {
            return;
        }
        self.lines = self.store.load(storage_keys::CART);
        self.badge.send_replace(self.item_count());
        tracing::debug!(count = self.item_count(), "cart reloaded from store");
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(storage_keys::CART, &self.lines)?;
        self.badge.send_replace(self.item_count());
        Ok(())
    }
}
