//! Infrastructure layer for Groundchat.
//!
//! Contains implementations of the capability traits defined in
//! `groundchat-core`: the Workers AI REST inference client, Chromium browser
//! automation over CDP, and the TOML config file loader.

pub mod browser;
pub mod config;
pub mod inference;
