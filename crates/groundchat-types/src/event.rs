//! Progress events sent to the caller on the streaming path.
//!
//! Wire format, one frame per event:
//! - `data: {"status":"..."}\n\n`
//! - `data: {"content":"..."}\n\n`
//! - `data: {"error":"..."}\n\n`
//! - `data: [DONE]\n\n` (terminal sentinel, not JSON)

use serde::{Deserialize, Serialize};

/// Byte-exact terminal frame of an event stream.
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// One event on the outgoing turn channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamEvent {
    /// Human-readable progress before a gathering/processing step starts.
    Status(String),
    /// The full model response.
    Content(String),
    /// A failure raised after the channel was opened.
    Error(String),
    /// Terminal sentinel.
    #[serde(skip)]
    Done,
}

impl StreamEvent {
    pub fn is_done(&self) -> bool {
        matches!(self, StreamEvent::Done)
    }

    /// The frame payload: a JSON object, or `[DONE]` for the sentinel.
    pub fn data(&self) -> String {
        match self {
            StreamEvent::Done => "[DONE]".to_string(),
            // Newtype variants of string payloads always serialize.
            event => serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string()),
        }
    }

    /// Encode this event as a single `data: ...\n\n` frame.
    pub fn to_frame(&self) -> String {
        format!("data: {}\n\n", self.data())
    }

    /// Decode a single frame produced by [`StreamEvent::to_frame`].
    pub fn from_frame(frame: &str) -> Option<StreamEvent> {
        if frame == DONE_FRAME {
            return Some(StreamEvent::Done);
        }
        let json = frame.strip_prefix("data: ")?.strip_suffix("\n\n")?;
        serde_json::from_str(json).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_frame() {
        let frame = StreamEvent::Status("searching".into()).to_frame();
        assert_eq!(frame, "data: {\"status\":\"searching\"}\n\n");
    }

    #[test]
    fn test_content_and_error_frames() {
        assert_eq!(
            StreamEvent::Content("hi".into()).to_frame(),
            "data: {\"content\":\"hi\"}\n\n"
        );
        assert_eq!(
            StreamEvent::Error("boom".into()).to_frame(),
            "data: {\"error\":\"boom\"}\n\n"
        );
    }

    #[test]
    fn test_data_payload() {
        assert_eq!(StreamEvent::Status("a".into()).data(), r#"{"status":"a"}"#);
        assert_eq!(StreamEvent::Done.data(), "[DONE]");
    }

    #[test]
    fn test_done_frame_is_byte_exact() {
        assert_eq!(StreamEvent::Done.to_frame().as_bytes(), b"data: [DONE]\n\n");
    }

    #[test]
    fn test_frame_escapes_newlines_in_payload() {
        let frame = StreamEvent::Content("line 1\n\nline 2".into()).to_frame();
        // Payload newlines must not terminate the frame early.
        assert_eq!(frame.matches("\n\n").count(), 1);
        assert!(frame.ends_with("\n\n"));
    }

    #[test]
    fn test_from_frame() {
        for event in [
            StreamEvent::Status("a".into()),
            StreamEvent::Content("b \"quoted\"".into()),
            StreamEvent::Error("c".into()),
            StreamEvent::Done,
        ] {
            assert_eq!(StreamEvent::from_frame(&event.to_frame()), Some(event));
        }
        assert_eq!(StreamEvent::from_frame("data: nope\n\n"), None);
    }
}
