//! Chat turn endpoint.
//!
//! POST <route path> (one per configured route, each bound to a model)
//!
//! The orchestrator picks the response mode from the latest user message:
//! - direct: the inference reply is returned as-is (status, content type, body)
//! - streaming: Server-Sent Events, one `data:` frame per [`StreamEvent`],
//!   terminated by `data: [DONE]`
//!
//! [`StreamEvent`]: groundchat_types::event::StreamEvent

use std::convert::Infallible;

use axum::body::{Body, Bytes};
use axum::extract::{MatchedPath, State};
use axum::http::header::{CONNECTION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;

use groundchat_core::browser::BrowserAutomation;
use groundchat_core::inference::InferenceProvider;
use groundchat_core::turn::{EventStream, TurnOutcome, parse_request};
use groundchat_types::llm::RawInferenceResponse;

use crate::http::error::AppError;
use crate::state::AppState;

/// Run one chat turn against the model bound to the matched route.
pub async fn chat_turn<I, B>(
    State(state): State<AppState<I, B>>,
    matched: MatchedPath,
    body: Bytes,
) -> Result<Response, AppError>
where
    I: InferenceProvider,
    B: BrowserAutomation,
{
    let model = state
        .model_for(matched.as_str())
        .ok_or_else(|| AppError::Internal(format!("no model bound to {}", matched.as_str())))?
        .to_string();

    let request = parse_request(&body)?;

    match state.orchestrator.start(request, &model).await {
        TurnOutcome::Direct(result) => Ok(raw_response(result?)),
        TurnOutcome::Streaming(events) => Ok(event_stream_response(events)),
    }
}

/// Forward an upstream reply without touching it.
fn raw_response(raw: RawInferenceResponse) -> Response {
    let mut response = Response::new(Body::from(raw.body));
    *response.status_mut() = StatusCode::from_u16(raw.status).unwrap_or(StatusCode::BAD_GATEWAY);
    if let Some(content_type) = raw
        .content_type
        .and_then(|ct| HeaderValue::from_str(&ct).ok())
    {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    response
}

/// Frame turn events as SSE. No keep-alive comments are interleaved, so the
/// body is exactly the sequence of event frames.
fn event_stream_response(events: EventStream) -> Response {
    let frames = events.map(|event| Ok::<_, Infallible>(Event::default().data(event.data())));
    (
        [(CONNECTION, HeaderValue::from_static("keep-alive"))],
        Sse::new(frames),
    )
        .into_response()
}
