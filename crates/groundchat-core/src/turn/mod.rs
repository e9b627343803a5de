//! Single-turn orchestration.
//!
//! A turn is classified once ([`plan`]), then either answered directly or
//! driven through the gathering state machine ([`orchestrator`]) while
//! progress is reported on an event channel ([`channel`]).

pub mod channel;
pub mod orchestrator;
pub mod plan;
pub mod state;

use groundchat_types::chat::ChatRequest;
use groundchat_types::error::RequestError;

pub use channel::{EventSink, EventStream, event_channel};
pub use orchestrator::{TurnOrchestrator, TurnOutcome};
pub use plan::{TurnPath, TurnPlan};
pub use state::TurnState;

/// Decode an inbound request body.
pub fn parse_request(body: &[u8]) -> Result<ChatRequest, RequestError> {
    serde_json::from_slice(body).map_err(|e| RequestError::MalformedJson(e.to_string()))
}
