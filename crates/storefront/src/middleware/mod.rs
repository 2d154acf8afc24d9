//! Middleware and extractors for the API server.

pub mod auth;
pub mod session;

pub use auth::RequireUser;
pub use session::create_session_layer;
