//! Transient notifications that expire on wall-clock time.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

/// Stack of on-screen notifications, newest last.
#[derive(Debug, Clone)]
pub struct Notifications {
    items: Vec<Notification>,
    ttl: chrono::Duration,
    next_id: u64,
}

impl Notifications {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::seconds(5)),
            next_id: 0,
        }
    }

    /// Show a notification, returning its id for early dismissal.
    pub fn push(
        &mut self,
        level: NotificationLevel,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        self.next_id += 1;
        self.items.push(Notification {
            id: self.next_id,
            level,
            message: message.into(),
            expires_at: now + self.ttl,
        });
        self.next_id
    }

    /// Dismiss before expiry. Returns whether the notification was showing.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drop notifications whose time is up. Returns how many were removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.items.len();
        self.items.retain(|n| n.expires_at > now);
        before - self.items.len()
    }

    pub fn active(&self) -> &[Notification] {
        &self.items
    }
}
