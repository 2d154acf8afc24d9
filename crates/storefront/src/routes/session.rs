//! Session route handler.

use axum::Json;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::{CurrentUser, SessionView, session::session_keys};

/// `GET /api/session` - snapshot of the current session.
///
/// Always succeeds; an anonymous visitor gets `{ "authenticated": false }`.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<SessionView>> {
    let user: Option<CurrentUser> = session.get(session_keys::CURRENT_USER).await?;
    Ok(Json(user.map_or_else(SessionView::anonymous, SessionView::for_user)))
}
