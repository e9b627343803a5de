//! Observability setup for Groundchat: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
