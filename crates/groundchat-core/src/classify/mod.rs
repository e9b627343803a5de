//! Classification of the triggering user utterance.
//!
//! All three classifiers are pure functions over the latest user message and
//! run once per turn, before any gathering starts:
//! - [`language::detect_locale`]: which locale to answer and search in
//! - [`trigger::needs_live_search`]: whether fresh web data is warranted
//! - [`urls::extract_urls`]: which pages the user explicitly pointed at

pub mod language;
pub mod trigger;
pub mod urls;

pub use language::detect_locale;
pub use trigger::needs_live_search;
pub use urls::extract_urls;
