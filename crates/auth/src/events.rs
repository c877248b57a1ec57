//! Typed publish/subscribe channel for UI events.
//!
//! One bus per application instance, backed by a tokio broadcast channel.
//! Publishing never fails: with no subscribers the event is simply dropped.

use signin_core::auth::{AuthFailure, Identity, LifecycleEvent, UiEvent};
use tokio::sync::broadcast;

/// Channel capacity for UI events.
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<UiEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: impl Into<UiEvent>) {
        let event = event.into();
        tracing::trace!(?event, "Publishing UI event");
        // No receivers just means nobody is listening yet.
        let _ = self.sender.send(event);
    }

    pub fn auth_succeeded(&self, identity: Identity) {
        self.publish(LifecycleEvent::AuthSucceeded(identity));
    }

    pub fn auth_failed(&self, failure: AuthFailure) {
        self.publish(LifecycleEvent::AuthFailed(failure));
    }

    pub fn signed_out(&self) {
        self.publish(LifecycleEvent::SignedOut);
    }

    pub fn show_loading(&self) {
        self.publish(UiEvent::ShowLoading);
    }

    pub fn hide_loading(&self) {
        self.publish(UiEvent::HideLoading);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect every event already queued on a receiver without waiting.
pub fn drain(receiver: &mut broadcast::Receiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "UI event receiver lagged");
            }
            Err(_) => break,
        }
    }
    events
}
