//! Script-based locale detection.

use groundchat_types::locale::Locale;

fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7AF}').contains(&c)
}

fn is_kana(c: char) -> bool {
    // Hiragana and Katakana blocks.
    ('\u{3040}'..='\u{309F}').contains(&c) || ('\u{30A0}'..='\u{30FF}').contains(&c)
}

fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Classify an utterance into a [`Locale`].
///
/// Checked in priority order: Korean syllables, then kana, then CJK
/// ideographs, defaulting to English. Japanese text routinely mixes kanji
/// with kana, so kana must win over ideographs.
pub fn detect_locale(text: &str) -> Locale {
    if text.chars().any(is_hangul_syllable) {
        Locale::Ko
    } else if text.chars().any(is_kana) {
        Locale::Ja
    } else if text.chars().any(is_cjk_ideograph) {
        Locale::Zh
    } else {
        Locale::En
    }
}
