/**
 * Real-time Note Event Broadcasting
 *
 * This module provides the broadcast type definition and the broadcast
 * helper used by every mutating note handler.
 *
 * # Broadcasting
 *
 * Events are broadcast using `tokio::sync::broadcast`, a multi-producer,
 * multi-consumer channel owned process-wide by `AppState`. All SSE
 * subscribers receive a copy of each event; delivery is best-effort with
 * no replay for late subscribers.
 */
use tokio::sync::broadcast;

use crate::shared::NoteEvent;

/// Note event broadcast channel sender
///
/// This type can be cloned and shared across handlers to allow
/// broadcasting events from anywhere in the application.
pub type NoteEventBroadcast = broadcast::Sender<NoteEvent>;

/// Broadcast a note event to all subscribers
///
/// # Returns
///
/// Number of active subscribers that received the event (0 if no
/// subscribers are connected, which is not an error).
pub fn broadcast_event(broadcast_tx: &NoteEventBroadcast, event: NoteEvent) -> usize {
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!("[Realtime] Event broadcast to {} subscribers", subscriber_count);
            subscriber_count
        }
        Err(_) => {
            // No subscribers, that's okay
            tracing::debug!("[Realtime] No subscribers to receive event");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::note::{BoardType, Note, NoteStatus, DEFAULT_NOTE_COLOR};
    use chrono::Utc;

    fn sample_note(id: i64) -> Note {
        Note {
            id,
            title: String::new(),
            text: "hello".to_string(),
            x: 0,
            y: 0,
            username: "alice".to_string(),
            status: NoteStatus::Active,
            is_private: false,
            board_type: BoardType::Main,
            color: DEFAULT_NOTE_COLOR.to_string(),
            likes: 0,
            dislikes: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_broadcast_event_with_subscriber() {
        let (tx, mut rx) = broadcast::channel::<NoteEvent>(100);

        let note = sample_note(1);
        let count = broadcast_event(&tx, NoteEvent::Saved(note.clone()));
        assert_eq!(count, 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, NoteEvent::Saved(note));
    }

    #[tokio::test]
    async fn test_broadcast_event_no_subscribers() {
        let (tx, _) = broadcast::channel::<NoteEvent>(100);
        drop(tx.subscribe());

        let count = broadcast_event(&tx, NoteEvent::Deleted(9));
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_broadcast_multiple_subscribers() {
        let (tx, _) = broadcast::channel::<NoteEvent>(100);
        let mut sub1 = tx.subscribe();
        let mut sub2 = tx.subscribe();

        let count = broadcast_event(&tx, NoteEvent::Deleted(3));
        assert_eq!(count, 2);
        assert_eq!(sub1.recv().await.unwrap(), NoteEvent::Deleted(3));
        assert_eq!(sub2.recv().await.unwrap(), NoteEvent::Deleted(3));
    }
}
