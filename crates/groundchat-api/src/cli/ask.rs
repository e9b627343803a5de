//! `groundchat ask` -- run one turn through the orchestrator from the terminal.

use anyhow::{Result, bail};
use console::style;
use futures_util::StreamExt;

use groundchat_core::turn::TurnOutcome;
use groundchat_types::chat::{ChatMessage, ChatRequest, Conversation};
use groundchat_types::event::StreamEvent;

use crate::state::AppState;

pub async fn ask(state: &AppState, text: &str, model: Option<&str>, json: bool) -> Result<()> {
    let model = model.unwrap_or_else(|| state.config.default_model());
    let request = ChatRequest {
        messages: Conversation::new(vec![ChatMessage::user(text)]),
        stream: None,
    };

    match state.orchestrator.start(request, model).await {
        TurnOutcome::Direct(result) => {
            let raw = result?;
            let body = String::from_utf8_lossy(&raw.body);
            if json {
                println!("{body}");
            } else {
                if !(200..300).contains(&raw.status) {
                    bail!("inference returned HTTP {}: {body}", raw.status);
                }
                println!("{}", readable_reply(&body));
            }
        }
        TurnOutcome::Streaming(mut events) => {
            let mut failed = None;
            while let Some(event) = events.next().await {
                if json {
                    if !event.is_done() {
                        println!("{}", event.data());
                    }
                    if let StreamEvent::Error(message) = &event {
                        failed = Some(message.clone());
                    }
                    continue;
                }
                match event {
                    StreamEvent::Status(status) => {
                        eprintln!("  {} {}", style("›").dim(), style(status).dim());
                    }
                    StreamEvent::Content(content) => println!("{content}"),
                    StreamEvent::Error(message) => failed = Some(message),
                    StreamEvent::Done => break,
                }
            }
            if let Some(message) = failed {
                bail!("turn failed: {message}");
            }
        }
    }

    Ok(())
}

/// Response text of a Workers AI reply body, or the body itself.
fn readable_reply(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/result/response")
                .and_then(|r| r.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
