//! Session-related types and the canonical storage keys.

use serde::{Deserialize, Serialize};

use telar_core::UserId;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address.
    pub email: String,
}

/// Wire shape of `GET /api/session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<CurrentUser>,
}

impl SessionView {
    /// An unauthenticated session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }

    /// An authenticated session for the given user.
    #[must_use]
    pub const fn for_user(user: CurrentUser) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }
}

/// Canonical keys for the persistent client store.
///
/// Exactly one key name exists per persisted concept; every page script
/// and aggregate goes through these constants. (An earlier revision of
/// the storefront used two different cart key names in different files,
/// which silently split the cart in two.)
pub mod storage_keys {
    /// Key for the cart line collection.
    pub const CART: &str = "telar.cart";

    /// Key for the wishlist entry collection.
    pub const WISHLIST: &str = "telar.wishlist";

    /// Key for the session/user snapshot.
    pub const SESSION: &str = "telar.session";
}

/// Keys for server-side session data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
