//! Core types for Telar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod option_list;
pub mod product;
pub mod wishlist;

pub use cart::{CartLine, LineKey};
pub use id::*;
pub use option_list::OptionList;
pub use product::Product;
pub use wishlist::WishlistEntry;
