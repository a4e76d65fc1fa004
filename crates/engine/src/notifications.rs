//! Notification sink — where `alert` actions, validation failures and
//! request errors end up.
//!
//! The executor only ever pushes; whoever renders toasts polls
//! [`ToastQueue::active`]. Expiry runs on `tokio::time::Instant`, so it is
//! independent of interpreter progress and can be driven by a paused clock
//! in tests.

use std::collections::VecDeque;
use std::time::Duration;

use actions::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// Receives notifications emitted while workflows run.
pub trait NotificationSink {
    fn notify(&mut self, message: &str, severity: Severity);
}

/// In-memory toast queue with automatic expiry.
#[derive(Debug)]
pub struct ToastQueue {
    ttl: Duration,
    live: VecDeque<(Instant, Notification)>,
    history: Vec<Notification>,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            live: VecDeque::new(),
            history: Vec::new(),
        }
    }

    /// Toasts that have not expired yet, oldest first.
    pub fn active(&mut self) -> impl Iterator<Item = &Notification> + '_ {
        self.prune(Instant::now());
        self.live.iter().map(|(_, n)| n)
    }

    fn prune(&mut self, now: Instant) {
        // Every toast shares one TTL, so the queue is ordered by expiry.
        while self.live.front().is_some_and(|(expires_at, _)| *expires_at <= now) {
            self.live.pop_front();
        }
    }

    /// Every notification ever pushed, expired or not.
    pub fn history(&self) -> &[Notification] {
        &self.history
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&mut self, message: &str, severity: Severity) {
        debug!(%severity, "toast: {message}");
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.to_owned(),
            severity,
            created_at: Utc::now(),
        };
        let now = Instant::now();
        self.prune(now);
        self.live.push_back((now + self.ttl, notification.clone()));
        self.history.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn toasts_expire_after_ttl() {
        let mut queue = ToastQueue::new(Duration::from_millis(3000));
        queue.notify("saved", Severity::Success);
        assert_eq!(queue.active().count(), 1);

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert_eq!(queue.active().count(), 1);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(queue.active().count(), 0);

        // History keeps it.
        assert_eq!(queue.history().len(), 1);
        assert_eq!(queue.history()[0].message, "saved");
    }

    #[tokio::test(start_paused = true)]
    async fn each_toast_expires_on_its_own_clock() {
        let mut queue = ToastQueue::default();
        queue.notify("first", Severity::Info);
        tokio::time::advance(Duration::from_millis(2000)).await;
        queue.notify("second", Severity::Warning);
        tokio::time::advance(Duration::from_millis(1500)).await;

        let live: Vec<&str> = queue.active().map(|n| n.message.as_str()).collect();
        assert_eq!(live, vec!["second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn pushing_drops_expired_toasts_without_polling() {
        let mut queue = ToastQueue::new(Duration::from_millis(100));
        for i in 0..50 {
            queue.notify(&format!("toast {i}"), Severity::Info);
            tokio::time::advance(Duration::from_millis(100)).await;
        }
        queue.notify("latest", Severity::Info);

        // Only the toast pushed last is still held, even though `active`
        // was never called.
        assert_eq!(queue.live.len(), 1);
        assert_eq!(queue.history().len(), 51);
    }
}
