//! Domain models specific to the storefront application.

pub mod session;

pub use session::{CurrentUser, SessionView, storage_keys};
