//! Live-update broadcaster.
//!
//! A single instance lives in `AppState`; handlers publish through it
//! after successful mutations. Delivery is fire-and-forget: each
//! WebSocket connection drains its own receiver, so a slow or closed
//! subscriber never blocks the rest, and nobody replays missed events.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use mingle_core::agent::model::Agent;
use mingle_core::conversation::model::Conversation;
use mingle_core::message::model::MessageView;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

const CHANNEL_CAPACITY: usize = 100;

/// Cosmetic seed for the viewer counter.
const VIEWER_BASELINE: i64 = 12;

/// Events pushed to WebSocket subscribers.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// The live viewer count changed.
    ViewerCount { viewers: i64 },
    /// A new agent registered.
    NewAgent { agent: Agent },
    /// A conversation was started.
    NewConversation { conversation: Conversation },
    /// A message was posted.
    NewMessage { message: MessageView },
}

/// Type alias for the broadcast receiver.
pub type LiveEventReceiver = broadcast::Receiver<LiveEvent>;

/// Fan-out point for live updates, plus the viewer counter.
pub struct Broadcaster {
    tx: broadcast::Sender<LiveEvent>,
    viewers: Arc<AtomicI64>,
}

impl Broadcaster {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            viewers: Arc::new(AtomicI64::new(VIEWER_BASELINE)),
        }
    }

    /// Register a new subscriber.
    ///
    /// The receiver is created before the updated count is published, so
    /// the joining subscriber sees its own `viewer_count` event. The
    /// returned guard unsubscribes on drop.
    pub fn subscribe(&self) -> (SubscriberGuard, LiveEventReceiver) {
        let rx = self.tx.subscribe();
        let viewers = self.viewers.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(viewers, "Subscriber joined");
        self.notify(LiveEvent::ViewerCount { viewers });

        let guard = SubscriberGuard {
            tx: self.tx.clone(),
            viewers: Arc::clone(&self.viewers),
        };
        (guard, rx)
    }

    /// Publish an event to every current subscriber.
    /// A send with no receivers is not an error.
    pub fn notify(&self, event: LiveEvent) {
        let _ = self.tx.send(event);
    }

    /// Current viewer count.
    pub fn viewers(&self) -> i64 {
        self.viewers.load(Ordering::SeqCst)
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Unsubscribes on drop. Drop runs at most once, so a connection can
/// never decrement the counter twice.
pub struct SubscriberGuard {
    tx: broadcast::Sender<LiveEvent>,
    viewers: Arc<AtomicI64>,
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        let viewers = self.viewers.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!(viewers, "Subscriber left");
        let _ = self.tx.send(LiveEvent::ViewerCount { viewers });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_agent(name: &str) -> Agent {
        use mingle_core::agent::model::AgentStatus;
        Agent {
            id: format!("agent-{name}"),
            name: name.to_string(),
            tagline: None,
            personality: None,
            interests: Vec::new(),
            bio: None,
            avatar_url: None,
            status: AgentStatus::Online,
            created_at: "2025-01-01 00:00:00".to_string(),
        }
    }

    /// Drain a receiver and return the last viewer_count seen.
    fn last_viewer_count(rx: &mut LiveEventReceiver) -> Option<i64> {
        let mut last = None;
        while let Ok(event) = rx.try_recv() {
            if let LiveEvent::ViewerCount { viewers } = event {
                last = Some(viewers);
            }
        }
        last
    }

    #[tokio::test]
    async fn test_viewer_count_tracks_joins_and_leaves() {
        let broadcaster = Broadcaster::new();

        let (g1, mut rx1) = broadcaster.subscribe();
        let (g2, _rx2) = broadcaster.subscribe();
        let (g3, _rx3) = broadcaster.subscribe();
        assert_eq!(broadcaster.viewers(), VIEWER_BASELINE + 3);

        drop(g3);
        drop(g2);
        assert_eq!(broadcaster.viewers(), VIEWER_BASELINE + 1);

        // The surviving subscriber's last notified count matches.
        assert_eq!(last_viewer_count(&mut rx1), Some(VIEWER_BASELINE + 1));
        drop(g1);
        assert_eq!(broadcaster.viewers(), VIEWER_BASELINE);
    }

    #[tokio::test]
    async fn test_joining_subscriber_sees_own_count() {
        let broadcaster = Broadcaster::new();

        let (_g, mut rx) = broadcaster.subscribe();
        match rx.recv().await {
            Ok(LiveEvent::ViewerCount { viewers }) => {
                assert_eq!(viewers, VIEWER_BASELINE + 1);
            }
            other => panic!("expected viewer_count, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_new_agent_reaches_every_live_subscriber_once() {
        let broadcaster = Broadcaster::new();

        let (_g1, mut rx1) = broadcaster.subscribe();
        let (_g2, mut rx2) = broadcaster.subscribe();
        let (g3, rx3) = broadcaster.subscribe();

        // Third subscriber disconnects before the registration lands.
        drop(rx3);
        drop(g3);

        broadcaster.notify(LiveEvent::NewAgent {
            agent: test_agent("ada"),
        });

        for rx in [&mut rx1, &mut rx2] {
            let mut new_agent_events = 0;
            while let Ok(event) = rx.try_recv() {
                if matches!(event, LiveEvent::NewAgent { .. }) {
                    new_agent_events += 1;
                }
            }
            assert_eq!(new_agent_events, 1);
        }
    }

    #[tokio::test]
    async fn test_notify_without_subscribers_is_silent() {
        let broadcaster = Broadcaster::new();
        // No receivers: must not panic or error.
        broadcaster.notify(LiveEvent::NewAgent {
            agent: test_agent("ada"),
        });
    }

    #[test]
    fn test_event_wire_format() {
        let event = LiveEvent::ViewerCount { viewers: 15 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "viewer_count");
        assert_eq!(json["viewers"], 15);

        let event = LiveEvent::NewAgent {
            agent: test_agent("ada"),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "new_agent");
        assert_eq!(json["agent"]["name"], "ada");
    }
}
