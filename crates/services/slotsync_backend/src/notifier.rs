// --- File: crates/services/slotsync_backend/src/notifier.rs ---
//! In-process change notifications over a tokio broadcast channel.
//!
//! Announcements carry only the group id; subscribers re-fetch the stored
//! slots. A subscriber that falls behind loses old announcements, which is
//! acceptable because any announcement means "re-fetch now".

use slotsync_common::Notifier;
use tokio::sync::broadcast;
use tracing::debug;

/// Payload of one announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotsChanged {
    pub group_id: String,
}

/// Fan-out notifier backed by `tokio::sync::broadcast`.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<SlotsChanged>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SlotsChanged> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Notifier for BroadcastNotifier {
    fn announce_slots_changed(&self, group_id: &str) {
        // send only errors when nobody is subscribed, which is fine
        let receivers = self
            .sender
            .send(SlotsChanged {
                group_id: group_id.to_string(),
            })
            .unwrap_or(0);
        debug!(
            "Announced slot change for group {} to {} subscribers",
            group_id, receivers
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_announcements() {
        let notifier = BroadcastNotifier::new(8);
        let mut rx = notifier.subscribe();

        notifier.announce_slots_changed("team-a");

        let received = rx.recv().await.unwrap();
        assert_eq!(received.group_id, "team-a");
    }

    #[test]
    fn announcing_without_subscribers_is_harmless() {
        let notifier = BroadcastNotifier::new(8);
        notifier.announce_slots_changed("team-a");
    }
}
