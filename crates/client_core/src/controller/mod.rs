//! Orchestrates record-client calls and state transitions for the directory
//! front end.
//!
//! The state lock is never held across a record-client call, so overlapping
//! operations interleave freely and the last response to resolve wins.

use std::sync::{Arc, Weak};

use tokio::{
    sync::{broadcast, Mutex},
    time::Instant,
};
use tracing::debug;

use crate::{
    notification::{Notification, NOTIFICATION_TTL},
    record_client::RecordClient,
    reducer::{reduce, Action},
    state::DirectoryState,
};

mod directory;
mod mutations;
mod search;

pub use mutations::DeleteConfirmation;

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    Succeeded,
    Failed,
    /// Not allowed in the current state, or nothing to do.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    StateChanged,
    NotificationShown(Notification),
    NotificationCleared,
}

pub struct DirectoryController {
    client: Arc<dyn RecordClient>,
    state: Mutex<DirectoryState>,
    events: broadcast::Sender<DirectoryEvent>,
}

impl DirectoryController {
    pub fn new(client: Arc<dyn RecordClient>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            client,
            state: Mutex::new(DirectoryState::default()),
            events,
        })
    }

    /// Initial load.
    pub async fn start(self: &Arc<Self>) -> OperationOutcome {
        self.refresh().await
    }

    pub async fn snapshot(&self) -> DirectoryState {
        self.state.lock().await.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.events.subscribe()
    }

    /// Replaces the live notification and restarts the expiry timer.
    pub async fn show_notification(self: &Arc<Self>, notification: Notification) {
        let expires_at = Instant::now() + NOTIFICATION_TTL;
        let generation = {
            let mut state = self.state.lock().await;
            reduce(
                &mut state,
                Action::NotificationShown {
                    notification: notification.clone(),
                    expires_at,
                },
            );
            state.notification_seq
        };
        debug!(generation, kind = ?notification.kind, "notification shown");
        let _ = self
            .events
            .send(DirectoryEvent::NotificationShown(notification));
        let _ = self.events.send(DirectoryEvent::StateChanged);

        let controller: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            if let Some(controller) = controller.upgrade() {
                controller.expire_notification(generation).await;
            }
        });
    }

    pub async fn dismiss_notification(&self) -> OperationOutcome {
        if self.dispatch(Action::NotificationDismissed).await {
            let _ = self.events.send(DirectoryEvent::NotificationCleared);
            OperationOutcome::Succeeded
        } else {
            OperationOutcome::Ignored
        }
    }

    async fn expire_notification(&self, generation: u64) {
        if self
            .dispatch(Action::NotificationExpired { generation })
            .await
        {
            let _ = self.events.send(DirectoryEvent::NotificationCleared);
        }
    }

    async fn dispatch(&self, action: Action) -> bool {
        let name = action.name();
        let applied = {
            let mut state = self.state.lock().await;
            reduce(&mut state, action)
        };
        if applied {
            debug!(action = name, "state updated");
            let _ = self.events.send(DirectoryEvent::StateChanged);
        } else {
            debug!(action = name, "action ignored in current state");
        }
        applied
    }

    async fn read<R>(&self, f: impl FnOnce(&DirectoryState) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
