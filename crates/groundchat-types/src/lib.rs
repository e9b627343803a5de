//! Shared domain types for Groundchat.
//!
//! This crate contains the turn-scoped data model: chat messages and
//! conversations, locales, stream events and their wire framing, inference
//! payloads, scrape/search results, configuration, and error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod event;
pub mod llm;
pub mod locale;
pub mod web;
