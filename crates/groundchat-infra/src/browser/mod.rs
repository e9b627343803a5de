//! Browser-automation adapters.

pub mod chromium;

pub use chromium::ChromiumAutomation;
