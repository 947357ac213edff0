// Progress event broadcasting for the run view

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use super::models::{BatchProgress, StatusMap};

/// Events published while a run is active
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BatchEvent {
    /// Current status map and aggregate counters, sent on every change
    Updated {
        statuses: StatusMap,
        progress: BatchProgress,
    },
    /// Final tally, sent when a run completes; never sent for an aborted run
    Finished { success: usize, error: usize },
}

/// Explicitly constructed publish/subscribe channel for batch events.
///
/// Subscribers that lag past the buffer capacity miss intermediate updates
/// but always see later ones; dropping the receiver unsubscribes.
#[derive(Debug, Clone)]
pub struct BatchBroadcaster {
    tx: broadcast::Sender<BatchEvent>,
}

impl BatchBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event, ignoring the case of no connected subscribers
    pub fn broadcast_lossy(&self, event: BatchEvent) {
        if let Ok(count) = self.tx.send(event) {
            debug!("broadcast batch event to {} subscribers", count);
        }
    }

    /// Register a new subscriber
    pub fn subscribe(&self) -> broadcast::Receiver<BatchEvent> {
        self.tx.subscribe()
    }

    /// Current number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::models::ItemStatus;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let broadcaster = BatchBroadcaster::new(16);
        let mut rx = broadcaster.subscribe();

        broadcaster.broadcast_lossy(BatchEvent::Finished {
            success: 2,
            error: 1,
        });

        match rx.recv().await {
            Ok(BatchEvent::Finished { success, error }) => {
                assert_eq!(success, 2);
                assert_eq!(error, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_broadcast_without_subscribers_is_ignored() {
        let broadcaster = BatchBroadcaster::new(16);
        assert_eq!(broadcaster.subscriber_count(), 0);
        broadcaster.broadcast_lossy(BatchEvent::Finished {
            success: 0,
            error: 0,
        });
    }

    #[test]
    fn test_event_json_shape() {
        let mut statuses: HashMap<String, ItemStatus> = HashMap::new();
        statuses.insert("ABC-123".to_string(), ItemStatus::pending());

        let event = BatchEvent::Updated {
            statuses,
            progress: Default::default(),
        };
        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("\"kind\":\"updated\""));
        assert!(json.contains("ABC-123"));
    }
}
