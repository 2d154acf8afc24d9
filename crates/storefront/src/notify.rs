//! Ephemeral user notifications.
//!
//! The display surface shows at most one notification at a time: posting
//! a new one replaces whatever is on screen. Each notification
//! auto-dismisses after [`DISMISS_AFTER`] unless the user dismisses it
//! first. Lifecycle per notification:
//! `created -> visible -> (timeout | user-dismiss) -> removed`, with no
//! way back from removed.
//!
//! `notify` never fails: with no display surface attached, and even with
//! no async runtime running, it degrades to a no-op rather than panic.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// How long a notification stays visible without user interaction.
pub const DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Notification severity, mapped to styling by the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Success,
    Error,
    Info,
    Warning,
}

/// A notification currently on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic id; dismissal is matched against it so a stale timer
    /// never removes a newer notification.
    pub id: u64,
    pub message: String,
    pub kind: Kind,
}

/// The single-slot notification surface.
///
/// Cheaply cloneable; clones share the display slot.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

struct NotifierInner {
    current: watch::Sender<Option<Notification>>,
    next_id: AtomicU64,
}

impl Notifier {
    /// Create a notifier with an empty display slot.
    #[must_use]
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(NotifierInner {
                current,
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Show a notification, replacing any notification on display, and
    /// arm its auto-dismiss timer.
    ///
    /// Returns the id, usable for early dismissal.
    pub fn notify(&self, message: impl Into<String>, kind: Kind) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            message: message.into(),
            kind,
        };
        self.inner.current.send_replace(Some(notification));

        // Arm the timeout only when a runtime exists to run it; without
        // one there is no live display surface either.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let notifier = self.clone();
            handle.spawn(async move {
                tokio::time::sleep(DISMISS_AFTER).await;
                notifier.dismiss(id);
            });
        }
        id
    }

    /// Dismiss the notification with the given id, if it is still on
    /// display. Dismissing anything else is a no-op: a notification
    /// never comes back once removed or replaced.
    pub fn dismiss(&self, id: u64) {
        self.inner.current.send_if_modified(|slot| {
            if slot.as_ref().is_some_and(|n| n.id == id) {
                *slot = None;
                true
            } else {
                false
            }
        });
    }

    /// The notification currently on display, if any.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.inner.current.borrow().clone()
    }

    /// Watch the display slot; the display surface renders on change.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.current.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_without_runtime_or_surface_is_silent() {
        // No tokio runtime here at all; must not panic.
        let notifier = Notifier::new();
        let id = notifier.notify("saved", Kind::Success);
        assert_eq!(notifier.current().map(|n| n.id), Some(id));
    }

    #[test]
    fn test_capacity_is_one() {
        let notifier = Notifier::new();
        notifier.notify("first", Kind::Info);
        notifier.notify("second", Kind::Warning);
        let current = notifier.current().expect("visible");
        assert_eq!(current.message, "second");
        assert_eq!(current.kind, Kind::Warning);
    }

    #[test]
    fn test_user_dismiss_removes() {
        let notifier = Notifier::new();
        let id = notifier.notify("bye", Kind::Info);
        notifier.dismiss(id);
        assert!(notifier.current().is_none());
        // Second dismissal of a removed notification is a no-op.
        notifier.dismiss(id);
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_stale_dismiss_leaves_newer_notification() {
        let notifier = Notifier::new();
        let old = notifier.notify("first", Kind::Info);
        notifier.notify("second", Kind::Info);
        notifier.dismiss(old);
        assert_eq!(
            notifier.current().map(|n| n.message),
            Some("second".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_after_timeout() {
        let notifier = Notifier::new();
        notifier.notify("fleeting", Kind::Success);
        assert!(notifier.current().is_some());

        tokio::time::sleep(DISMISS_AFTER + Duration::from_millis(1)).await;
        // Let the armed timer task run.
        tokio::task::yield_now().await;
        assert!(notifier.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replacement_outlives_stale_timer() {
        let notifier = Notifier::new();
        notifier.notify("first", Kind::Info);
        tokio::time::sleep(Duration::from_secs(4)).await;
        notifier.notify("second", Kind::Info);

        // First notification's timer fires now; it must not remove the
        // second one.
        tokio::time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(
            notifier.current().map(|n| n.message),
            Some("second".to_string())
        );

        tokio::time::sleep(Duration::from_secs(4)).await;
        tokio::task::yield_now().await;
        assert!(notifier.current().is_none());
    }

    #[tokio::test]
    async fn test_watch_surface_sees_updates() {
        let notifier = Notifier::new();
        let mut rx = notifier.watch();
        notifier.notify("hola", Kind::Info);
        rx.changed().await.expect("change");
        assert_eq!(
            rx.borrow().as_ref().map(|n| n.message.clone()),
            Some("hola".to_string())
        );
    }
}
