//! CloudflareInference -- concrete [`InferenceProvider`] for Workers AI.
//!
//! Sends payloads to `POST {base_url}/accounts/{account_id}/ai/run/{model}`
//! with bearer authentication. The raw mode hands the upstream reply back
//! untouched; the structured mode extracts the response text, aggregating
//! the SSE stream when the upstream answers with one.
//!
//! The API token is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use groundchat_core::inference::InferenceProvider;
use groundchat_types::config::InferenceConfig;
use groundchat_types::llm::{InferenceOutput, InferencePayload, LlmError, RawInferenceResponse};

use super::streaming::aggregate_sse;

/// Environment variable consulted when `inference.account_id` is unset.
pub const ACCOUNT_ID_ENV_VAR: &str = "CLOUDFLARE_ACCOUNT_ID";

/// Workers AI REST client.
pub struct CloudflareInference {
    client: reqwest::Client,
    base_url: String,
    account_id: String,
    api_token: SecretString,
}

// No Debug derive: the token must never end up in logs.

impl CloudflareInference {
    pub fn new(
        base_url: impl Into<String>,
        account_id: impl Into<String>,
        api_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account_id: account_id.into(),
            api_token,
        })
    }

    /// Build a client from `[inference]` settings and the environment.
    pub fn from_config(config: &InferenceConfig) -> Result<Self, LlmError> {
        let account_id = config
            .account_id
            .clone()
            .or_else(|| std::env::var(ACCOUNT_ID_ENV_VAR).ok())
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                LlmError::NotConfigured(format!(
                    "set inference.account_id or ${ACCOUNT_ID_ENV_VAR}"
                ))
            })?;

        let token = std::env::var(&config.api_token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                LlmError::NotConfigured(format!("${} is not set", config.api_token_env))
            })?;

        Self::new(
            config.base_url.clone(),
            account_id,
            SecretString::from(token),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/accounts/{}/ai/run/{}", self.base_url, self.account_id, model)
    }

    async fn send(
        &self,
        model: &str,
        payload: &InferencePayload,
    ) -> Result<reqwest::Response, LlmError> {
        tracing::debug!(model, family = %payload.family(), "sending inference request");
        self.client
            .post(self.endpoint(model))
            .bearer_auth(self.api_token.expose_secret())
            .json(payload)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })
    }
}

/// Pull the response text out of a non-streamed reply body.
///
/// Accepts `{result: {response}}`, a bare `{response}`, and the
/// Responses-API `output[].content[].text` shape (with or without the
/// `result` envelope).
fn extract_response(body: &serde_json::Value) -> Option<String> {
    let inner = body.get("result").unwrap_or(body);

    if let Some(text) = inner.get("response").and_then(|v| v.as_str()) {
        return Some(text.to_string());
    }

    let output = inner.get("output")?.as_array()?;
    let parts: Vec<&str> = output
        .iter()
        .filter_map(|item| item.get("content").and_then(|c| c.as_array()))
        .flatten()
        .filter(|part| {
            part.get("type")
                .and_then(|t| t.as_str())
                .is_none_or(|t| t == "output_text")
        })
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    // An output list with no text parts (e.g. reasoning only) is not an answer.
    if parts.is_empty() {
        return None;
    }
    Some(parts.concat())
}

impl InferenceProvider for CloudflareInference {
    fn name(&self) -> &str {
        "cloudflare"
    }

    async fn run(
        &self,
        model: &str,
        payload: &InferencePayload,
    ) -> Result<InferenceOutput, LlmError> {
        let response = self.send(model, payload).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed,
                code => LlmError::Http { status: code, body },
            });
        }

        let is_event_stream = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("text/event-stream"));

        // A stream hint is only a request; trust what actually came back.
        if is_event_stream {
            let response = aggregate_sse(response).await?;
            return Ok(InferenceOutput { response });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let response = extract_response(&body).ok_or_else(|| {
            LlmError::Deserialization("response text missing from inference result".into())
        })?;
        Ok(InferenceOutput { response })
    }

    async fn run_raw(
        &self,
        model: &str,
        payload: &InferencePayload,
    ) -> Result<RawInferenceResponse, LlmError> {
        let response = self.send(model, payload).await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("failed to read response body: {e}"),
            })?
            .to_vec();

        Ok(RawInferenceResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundchat_types::chat::{ChatMessage, Conversation};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "@cf/meta/llama-3.2-3b-instruct";
    const RUN_PATH: &str = "/accounts/acct/ai/run/@cf/meta/llama-3.2-3b-instruct";

    fn provider(server: &MockServer) -> CloudflareInference {
        CloudflareInference::new(
            server.uri(),
            "acct",
            SecretString::from("test-token".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn payload(stream: Option<bool>) -> InferencePayload {
        InferencePayload::Conversational {
            messages: Conversation::new(vec![ChatMessage::user("hi")]),
            max_tokens: 1024,
            temperature: None,
            stream,
        }
    }

    #[test]
    fn extract_response_shapes() {
        assert_eq!(
            extract_response(&json!({"result": {"response": "a"}, "success": true})),
            Some("a".into())
        );
        assert_eq!(extract_response(&json!({"response": "b"})), Some("b".into()));
        let responses_api = json!({
            "result": {
                "output": [
                    {"type": "reasoning", "content": [{"type": "reasoning_text", "text": "hmm"}]},
                    {"type": "message", "content": [{"type": "output_text", "text": "c"}]}
                ]
            }
        });
        assert_eq!(extract_response(&responses_api), Some("c".into()));
        assert_eq!(extract_response(&json!({"result": {}})), None);
    }

    #[test]
    fn extract_response_rejects_output_without_text() {
        let reasoning_only = json!({
            "output": [
                {"type": "reasoning", "content": [{"type": "reasoning_text", "text": "hmm"}]}
            ]
        });
        assert_eq!(extract_response(&reasoning_only), None);
        assert_eq!(extract_response(&json!({"output": []})), None);
    }

    #[tokio::test]
    async fn run_rejects_reply_without_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RUN_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"result": {"output": []}})),
            )
            .mount(&server)
            .await;

        let err = provider(&server).run(MODEL, &payload(None)).await.unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[tokio::test]
    async fn run_sends_bearer_token_and_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RUN_PATH))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({
                "messages": [{"role": "user", "content": "hi"}],
                "max_tokens": 1024
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": {"response": "hello!"}, "success": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let output = provider(&server).run(MODEL, &payload(None)).await.unwrap();
        assert_eq!(output.response, "hello!");
    }

    #[tokio::test]
    async fn run_aggregates_event_stream() {
        let server = MockServer::start().await;
        let sse_body = concat!(
            "data: {\"response\":\"Hel\"}\n\n",
            "data: {\"response\":\"lo\"}\n\n",
            "data: [DONE]\n\n",
        );
        Mock::given(method("POST"))
            .and(path(RUN_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(sse_body, "text/event-stream"),
            )
            .mount(&server)
            .await;

        let output = provider(&server).run(MODEL, &payload(Some(true))).await.unwrap();
        assert_eq!(output.response, "Hello");
    }

    #[tokio::test]
    async fn run_maps_error_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RUN_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = provider(&server).run(MODEL, &payload(None)).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn run_reports_upstream_failure_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RUN_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
            .mount(&server)
            .await;

        let err = provider(&server).run(MODEL, &payload(None)).await.unwrap_err();
        match err {
            LlmError::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "model overloaded");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn run_raw_passes_reply_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RUN_PATH))
            .respond_with(
                ResponseTemplate::new(429).set_body_raw(
                    r#"{"errors":[{"message":"rate limited"}]}"#,
                    "application/json",
                ),
            )
            .mount(&server)
            .await;

        let raw = provider(&server).run_raw(MODEL, &payload(None)).await.unwrap();
        assert_eq!(raw.status, 429);
        assert_eq!(raw.content_type.as_deref(), Some("application/json"));
        assert_eq!(raw.body, br#"{"errors":[{"message":"rate limited"}]}"#.to_vec());
    }

    #[test]
    fn from_config_requires_account_id() {
        let config = InferenceConfig {
            account_id: Some(String::new()),
            api_token_env: "GROUNDCHAT_TEST_UNSET_TOKEN".into(),
            ..InferenceConfig::default()
        };
        assert!(matches!(
            CloudflareInference::from_config(&config),
            Err(LlmError::NotConfigured(_))
        ));
    }

    #[test]
    fn from_config_requires_token() {
        let config = InferenceConfig {
            account_id: Some("acct".into()),
            api_token_env: "GROUNDCHAT_TEST_UNSET_TOKEN".into(),
            ..InferenceConfig::default()
        };
        assert!(matches!(
            CloudflareInference::from_config(&config),
            Err(LlmError::NotConfigured(_))
        ));
    }
}
