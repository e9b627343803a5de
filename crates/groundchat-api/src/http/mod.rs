//! HTTP API layer for Groundchat.
//!
//! Axum-based chat endpoints (one per configured route), a health check,
//! CORS support, and optional static asset serving.

pub mod error;
pub mod handlers;
pub mod router;
