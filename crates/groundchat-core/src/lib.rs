//! Turn orchestration and capability traits for Groundchat.
//!
//! This crate defines the "ports" (the inference and browser-automation
//! traits) that the infrastructure layer implements, plus everything that
//! happens inside a turn: classification, gathering, context assembly,
//! payload construction, and the state machine that ties them together.
//! It depends only on `groundchat-types` -- never on `groundchat-infra`
//! or any HTTP/browser crate.

pub mod browser;
pub mod classify;
pub mod context;
pub mod inference;
pub mod payload;
pub mod prompt;
pub mod turn;
