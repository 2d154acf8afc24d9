//! End-to-end flows over the client-state library.
//!
//! These exercise the store, cart, wishlist, and notification surface
//! together the way the storefront pages do: multiple aggregates over
//! one shared store, synchronized through change events. Everything
//! runs against the in-memory backend; no services are required.

use std::sync::Arc;

use telar_core::LineKey;
use telar_integration_tests::product_fixture;
use telar_storefront::cart::{AddOutcome, CartAggregate, Rejection};
use telar_storefront::notify::{Kind, Notifier};
use telar_storefront::store::{ClientStore, FileBackend};
use telar_storefront::wishlist::{Toggle, WishlistAggregate};

#[test]
fn badge_scenario_from_empty_to_rejected_add() {
    // Empty cart, add {id:7, stock:3} qty 1 -> badge 1; again -> badge 2;
    // add 5 more -> rejected, quantity stays 2.
    let notifier = Notifier::new();
    let mut cart = CartAggregate::new(ClientStore::in_memory(), notifier.clone());
    let badge = cart.badge();
    let p = product_fixture(7, 3);

    assert_eq!(
        cart.add_item(&p, 1, None, None).expect("add"),
        AddOutcome::Added { count: 1 }
    );
    assert_eq!(*badge.borrow(), 1);

    assert_eq!(
        cart.add_item(&p, 1, None, None).expect("add"),
        AddOutcome::Added { count: 2 }
    );
    assert_eq!(*badge.borrow(), 2);

    assert_eq!(
        cart.add_item(&p, 5, None, None).expect("add"),
        AddOutcome::Rejected(Rejection::InsufficientStock { available: 1 })
    );
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(*badge.borrow(), 2);
    assert_eq!(notifier.current().map(|n| n.kind), Some(Kind::Error));
}

#[test]
fn two_tabs_share_cart_through_store_events() {
    let store = ClientStore::in_memory();
    let mut events = store.subscribe();
    let mut tab_a = CartAggregate::new(store.clone(), Notifier::new());
    let mut tab_b = CartAggregate::new(store, Notifier::new());

    tab_a
        .add_item(&product_fixture(7, 5), 2, None, None)
        .expect("add");

    // Tab B reloads on the change event and sees tab A's write.
    tab_b.refresh(&events.try_recv().expect("event"));
    assert_eq!(tab_b.item_count(), 2);

    // Tab B removes the line; tab A follows the same way.
    let key = tab_b.lines()[0].key();
    tab_b.remove_item(&key).expect("remove");
    tab_a.refresh(&events.try_recv().expect("event"));
    assert_eq!(tab_a.item_count(), 0);
}

#[test]
fn cart_and_wishlist_coexist_under_distinct_keys() {
    let store = ClientStore::in_memory();
    let notifier = Notifier::new();
    let mut cart = CartAggregate::new(store.clone(), notifier.clone());
    let mut wishlist = WishlistAggregate::new(store, notifier);
    let p = product_fixture(9, 5);

    cart.add_item(&p, 1, None, None).expect("add");
    assert_eq!(wishlist.toggle(&p).expect("toggle"), Toggle::Added);

    // Each collection persists independently.
    assert_eq!(cart.item_count(), 1);
    assert_eq!(wishlist.len(), 1);

    assert_eq!(wishlist.toggle(&p).expect("toggle"), Toggle::Removed);
    assert_eq!(cart.item_count(), 1);
    assert!(wishlist.is_empty());
}

#[test]
fn cart_survives_restart_on_file_backend() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = product_fixture(7, 5);

    {
        let backend = FileBackend::new(dir.path()).expect("backend");
        let mut cart =
            CartAggregate::new(ClientStore::new(Arc::new(backend)), Notifier::new());
        cart.add_item(&p, 3, None, None).expect("add");
    }

    // A fresh process sees the persisted collection.
    let backend = FileBackend::new(dir.path()).expect("backend");
    let cart = CartAggregate::new(ClientStore::new(Arc::new(backend)), Notifier::new());
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.lines()[0].key(), LineKey::new(p.id, None, None));
}

#[test]
fn corrupt_cart_file_reads_as_empty_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("telar.cart.json"), "not-json").expect("write");

    let backend = FileBackend::new(dir.path()).expect("backend");
    let cart = CartAggregate::new(ClientStore::new(Arc::new(backend)), Notifier::new());
    assert!(cart.lines().is_empty());
}
