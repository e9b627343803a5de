//! InferenceProvider trait definition.
//!
//! Implementations live in groundchat-infra (e.g., `CloudflareInference`).

use std::future::Future;

use groundchat_types::llm::{InferenceOutput, InferencePayload, LlmError, RawInferenceResponse};

/// A hosted model-inference backend.
pub trait InferenceProvider: Send + Sync + 'static {
    /// Human-readable backend name (e.g., "cloudflare").
    fn name(&self) -> &str;

    /// Run `model` and return the structured result.
    fn run(
        &self,
        model: &str,
        payload: &InferencePayload,
    ) -> impl Future<Output = Result<InferenceOutput, LlmError>> + Send;

    /// Run `model` and return the upstream reply untouched.
    ///
    /// Non-2xx upstream statuses are part of the reply, not errors; `Err`
    /// means no reply was obtained at all.
    fn run_raw(
        &self,
        model: &str,
        payload: &InferencePayload,
    ) -> impl Future<Output = Result<RawInferenceResponse, LlmError>> + Send;
}
