//! The outgoing event channel of a streaming turn.
//!
//! [`EventSink`] is the single writer. Closing consumes it, so nothing can
//! be written after the terminal frame.

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use groundchat_types::event::StreamEvent;

/// Reader half handed to the transport.
pub type EventStream = ReceiverStream<StreamEvent>;

/// Create a bounded event channel.
pub fn event_channel(capacity: usize) -> (EventSink, EventStream) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSink { tx }, ReceiverStream::new(rx))
}

/// Writer half owned by the turn task.
#[derive(Debug)]
pub struct EventSink {
    tx: mpsc::Sender<StreamEvent>,
}

impl EventSink {
    pub async fn status(&self, text: impl Into<String>) {
        self.emit(StreamEvent::Status(text.into())).await;
    }

    pub async fn content(&self, text: impl Into<String>) {
        self.emit(StreamEvent::Content(text.into())).await;
    }

    pub async fn error(&self, text: impl Into<String>) {
        self.emit(StreamEvent::Error(text.into())).await;
    }

    /// Emit the terminal `Done` frame and release the channel.
    pub async fn close(self) {
        self.emit(StreamEvent::Done).await;
    }

    /// Whether the reader has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    async fn emit(&self, event: StreamEvent) {
        // A departed reader is not an error for the turn.
        if self.tx.send(event).await.is_err() {
            tracing::debug!("event stream reader dropped; discarding event");
        }
    }
}
