//! Panel choreography driven by UI events.

use std::time::Duration;

use chrono::{DateTime, Utc};
use signin_core::auth::{LifecycleEvent, UiEvent};
use tokio::sync::broadcast;

use super::notifications::{NotificationLevel, Notifications};
use super::profile::ProfileView;

pub const SIGNED_OUT_MESSAGE: &str = "Successfully signed out";

/// The three mutually exclusive panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Login,
    Loading,
    Profile,
}

/// Reacts to [`UiEvent`]s by switching panels, rendering the profile and
/// raising notifications. Holds no auth state of its own.
#[derive(Debug)]
pub struct UiChoreographer {
    panel: Panel,
    profile: Option<ProfileView>,
    notifications: Notifications,
}

impl UiChoreographer {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            panel: Panel::Login,
            profile: None,
            notifications: Notifications::new(notification_ttl),
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        self.apply_at(event, Utc::now());
    }

    pub fn apply_at(&mut self, event: UiEvent, now: DateTime<Utc>) {
        tracing::debug!(?event, "Applying UI event");

        match event {
            UiEvent::ShowLoading => self.panel = Panel::Loading,
            UiEvent::HideLoading => {
                if self.panel == Panel::Loading {
                    self.panel = Panel::Login;
                }
            }
            UiEvent::Lifecycle(LifecycleEvent::AuthSucceeded(identity)) => {
                self.profile = Some(ProfileView::from_identity(&identity));
                self.panel = Panel::Profile;
            }
            UiEvent::Lifecycle(LifecycleEvent::AuthFailed(failure)) => {
                self.profile = None;
                self.panel = Panel::Login;
                self.notifications
                    .push(NotificationLevel::Error, failure.message, now);
            }
            UiEvent::Lifecycle(LifecycleEvent::SignedOut) => {
                self.profile = None;
                self.panel = Panel::Login;
                self.notifications
                    .push(NotificationLevel::Success, SIGNED_OUT_MESSAGE, now);
            }
        }
    }

    /// Apply every event already queued on the receiver.
    pub fn drain(&mut self, receiver: &mut broadcast::Receiver<UiEvent>) -> usize {
        let events = signin_auth::drain(receiver);
        let count = events.len();
        for event in events {
            self.apply(event);
        }
        count
    }

    /// The profile picture failed to load.
    pub fn avatar_failed(&mut self) {
        if let Some(profile) = self.profile.as_mut() {
            profile.picture_failed();
        }
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        self.notifications.expire(now)
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn profile(&self) -> Option<&ProfileView> {
        self.profile.as_ref()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }
}
