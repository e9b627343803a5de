//! Response/query language of a turn.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Locale detected from the latest user message.
///
/// Chosen once per turn and reused for status texts, search-provider
/// selection and the context instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ko,
    Ja,
    Zh,
    #[default]
    En,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::Ko, Locale::Ja, Locale::Zh, Locale::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ko => "ko",
            Locale::Ja => "ja",
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ko" => Ok(Locale::Ko),
            "ja" => Ok(Locale::Ja),
            "zh" => Ok(Locale::Zh),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale: '{other}'")),
        }
    }
}
