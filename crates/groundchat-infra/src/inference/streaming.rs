//! Aggregation of an upstream SSE token stream into one response text.
//!
//! Workers AI emits `data: {"response":"..."}` frames terminated by
//! `data: [DONE]`. Responses-API models emit typed events whose
//! `response.output_text.delta` frames carry the text in `delta`.

use eventsource_stream::Eventsource;
use futures_util::StreamExt;

use groundchat_types::llm::LlmError;

/// Text contributed by one SSE data payload, if any.
pub fn delta_text(value: &serde_json::Value) -> Option<&str> {
    if let Some(text) = value.get("response").and_then(|v| v.as_str()) {
        return Some(text);
    }
    let is_text_delta = value
        .get("type")
        .and_then(|v| v.as_str())
        .is_some_and(|t| t.ends_with("output_text.delta"));
    if is_text_delta {
        return value.get("delta").and_then(|v| v.as_str());
    }
    None
}

/// Consume an SSE response body and concatenate every text delta.
pub async fn aggregate_sse(response: reqwest::Response) -> Result<String, LlmError> {
    let mut events = response.bytes_stream().eventsource();
    let mut text = String::new();

    while let Some(event) = events.next().await {
        let event = event.map_err(|e| LlmError::Stream(e.to_string()))?;
        let data = event.data.trim();
        if data == "[DONE]" {
            break;
        }
        if data.is_empty() {
            continue;
        }
        let value: serde_json::Value = serde_json::from_str(data)
            .map_err(|e| LlmError::Deserialization(format!("invalid stream frame: {e}")))?;
        if let Some(delta) = delta_text(&value) {
            text.push_str(delta);
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn delta_text_workers_ai_frame() {
        assert_eq!(delta_text(&json!({"response": "Hel"})), Some("Hel"));
    }

    #[test]
    fn delta_text_responses_api_frame() {
        let frame = json!({"type": "response.output_text.delta", "delta": "lo"});
        assert_eq!(delta_text(&frame), Some("lo"));
    }

    #[test]
    fn delta_text_ignores_other_frames() {
        assert_eq!(delta_text(&json!({"usage": {"total_tokens": 4}})), None);
        assert_eq!(
            delta_text(&json!({"type": "response.completed", "delta": "x"})),
            None
        );
    }
}
