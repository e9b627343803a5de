//! Inference capability adapters.

pub mod cloudflare;
pub mod streaming;

pub use cloudflare::CloudflareInference;
