/**
 * Real-time Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) subscription handler
 * for `GET /api/notes/sse`. Clients receive every note change while their
 * stream is open: saved notes as JSON payloads, deletions as the
 * `deleted:<id>` sentinel.
 *
 * # Connection Management
 *
 * - Connections are kept alive using the SSE keep-alive mechanism
 * - A subscriber that lags behind the channel capacity skips the missed
 *   events and keeps receiving; there is no replay
 * - A client that connects after an event does not see it and must
 *   re-fetch board state on connect
 */
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures_util::stream;

use crate::backend::realtime::broadcast::NoteEventBroadcast;

/// Handle note stream subscription (GET /api/notes/sse)
///
/// Subscribes the caller to the process-wide note broadcast channel and
/// forwards each event as an SSE message until the client disconnects.
pub async fn handle_note_subscription(
    State(broadcast_tx): State<NoteEventBroadcast>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, axum::Error>>> {
    tracing::info!("[Realtime] SSE subscription request received");

    let broadcast_rx = broadcast_tx.subscribe();

    // Create SSE stream that listens to the broadcast channel.
    // We only yield events when there is actual data to send; axum's
    // keep-alive mechanism injects comment lines to hold the connection.
    let stream = stream::unfold(broadcast_rx, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let data = match event.to_sse_data() {
                        Ok(data) => data,
                        Err(e) => {
                            tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                            continue;
                        }
                    };

                    let sse_event = Event::default().event(event.event_name()).data(data);
                    return Some((Ok(sse_event), rx));
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Realtime] Receiver lagged, skipped {} events", skipped);
                    continue;
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    tracing::warn!("[Realtime] Broadcast channel closed, ending stream");
                    return None;
                }
            }
        }
    });

    Sse::new(stream).keep_alive(axum::response::sse::KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::realtime::broadcast::broadcast_event;
    use crate::shared::NoteEvent;
    use futures_util::StreamExt;
    use tokio::sync::broadcast;

    #[tokio::test]
    async fn test_subscriber_observes_deletion_sentinel() {
        let (tx, _) = broadcast::channel::<NoteEvent>(16);
        let mut rx = tx.subscribe();

        broadcast_event(&tx, NoteEvent::Deleted(42));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.to_sse_data().unwrap(), "deleted:42");
    }

    #[tokio::test]
    async fn test_stream_yields_broadcast_events() {
        let (tx, _) = broadcast::channel::<NoteEvent>(16);
        let rx = tx.subscribe();

        let mut stream = stream::unfold(rx, |mut rx| async move {
            match rx.recv().await {
                Ok(event) => Some((event, rx)),
                Err(_) => None,
            }
        })
        .boxed();

        broadcast_event(&tx, NoteEvent::Deleted(7));
        let event = stream.next().await.unwrap();
        assert_eq!(event, NoteEvent::Deleted(7));
    }
}
