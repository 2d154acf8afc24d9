//! Telar Core - Shared types library.
//!
//! This crate provides common types used across all Telar components:
//! - `storefront` - Client-state library plus the public JSON API server
//! - `integration-tests` - End-to-end test harness
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, option-list normalization, and the
//!   product / cart / wishlist data model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
