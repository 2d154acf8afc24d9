//! Telar Storefront library.
//!
//! This crate has two halves:
//!
//! - The **client-state library**: the persistent key-value store with
//!   change notifications ([`store`]), the cart and wishlist aggregates
//!   ([`cart`], [`wishlist`]), the notification surface ([`notify`]),
//!   and the catalog API client ([`catalog`]), composed from
//!   configuration by [`client`]. All cart and wishlist
//!   mutation funnels through the aggregate operations; the store is
//!   the sole durable owner and the aggregates are disposable caches.
//! - The **API server**: axum routes backed by `PostgreSQL` serving the
//!   product catalog, category list, session snapshot, and per-user
//!   wishlist as JSON ([`routes`], [`db`], [`state`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod routes;
pub mod state;
pub mod store;
pub mod wishlist;
