//! Notification coordinator: one ephemeral success/failure message.
//!
//! DESIGN
//! ======
//! A notification is visible until a deadline `TTL` after it was raised.
//! Raising another one replaces it and restarts the deadline, so the latest
//! call always wins. Expiry is evaluated against a caller-supplied `Instant`
//! (`*_at` methods) which keeps the timing testable without sleeping.

use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub success: bool,
    pub visible_until: Instant,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn notify(&mut self, message: impl Into<String>, success: bool) {
        self.notify_at(message, success, Instant::now());
    }

    /// Raise a notification at `now`, superseding any visible one.
    pub fn notify_at(&mut self, message: impl Into<String>, success: bool, now: Instant) {
        let message = message.into();
        if success {
            tracing::info!(%message, "notification");
        } else {
            tracing::warn!(%message, "notification");
        }
        self.current = Some(Notification { message, success, visible_until: now + self.ttl });
    }

    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.current_at(Instant::now())
    }

    /// The notification visible at `now`, if any.
    #[must_use]
    pub fn current_at(&self, now: Instant) -> Option<&Notification> {
        self.current.as_ref().filter(|n| now < n.visible_until)
    }

    /// Drop an expired notification. Returns `true` if one was cleared.
    pub fn sweep_at(&mut self, now: Instant) -> bool {
        let expired = self.current.as_ref().is_some_and(|n| now >= n.visible_until);
        if expired {
            self.current = None;
        }
        expired
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
