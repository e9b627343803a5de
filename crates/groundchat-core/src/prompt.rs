//! Localized progress and context text.
//!
//! Every user-facing string of a turn is selected by the turn's [`Locale`],
//! except diagnostics about the automation capability, which are fixed
//! English so operators can grep for them.

use groundchat_types::locale::Locale;

/// Inline text substituted for a scrape or search when no browser is configured.
pub const BROWSER_UNAVAILABLE: &str =
    "Browser automation is not available, so live web data could not be retrieved.";

/// Status emitted before visiting the extracted URLs.
pub fn status_scraping(locale: Locale) -> &'static str {
    match locale {
        Locale::Ko => "웹 페이지를 읽는 중입니다...",
        Locale::Ja => "ウェブページを読み込んでいます...",
        Locale::Zh => "正在读取网页...",
        Locale::En => "Reading web pages...",
    }
}

/// Status emitted before the live search.
pub fn status_searching(locale: Locale) -> &'static str {
    match locale {
        Locale::Ko => "최신 정보를 검색하는 중입니다...",
        Locale::Ja => "最新情報を検索しています...",
        Locale::Zh => "正在搜索最新信息...",
        Locale::En => "Searching the web for up-to-date information...",
    }
}

/// Status emitted before context assembly and inference.
pub fn status_processing(locale: Locale) -> &'static str {
    match locale {
        Locale::Ko => "응답을 생성하는 중입니다...",
        Locale::Ja => "回答を生成しています...",
        Locale::Zh => "正在生成回答...",
        Locale::En => "Generating a response...",
    }
}

/// Instruction appended after the gathered blocks.
pub fn context_instruction(locale: Locale) -> &'static str {
    match locale {
        Locale::Ko => {
            "위의 웹 정보를 활용하여 사용자의 질문에 답하고, 사용한 정보의 출처(URL)를 밝혀 주세요."
        }
        Locale::Ja => {
            "上記のウェブ情報を活用してユーザーの質問に答え、使用した情報の出典(URL)を明記してください。"
        }
        Locale::Zh => "请利用以上网络信息回答用户的问题，并注明所用信息的来源（URL）。",
        Locale::En => {
            "Use the web information above to answer the user's question, and cite the sources (URLs) you relied on."
        }
    }
}

/// Text rendered when a search returns no usable entries.
pub fn no_results(locale: Locale, query: &str) -> String {
    match locale {
        Locale::Ko => format!("[Web search: {query}]\n검색 결과가 없습니다."),
        Locale::Ja => format!("[Web search: {query}]\n検索結果が見つかりませんでした。"),
        Locale::Zh => format!("[Web search: {query}]\n未找到搜索结果。"),
        Locale::En => format!("[Web search: {query}]\nNo search results were found."),
    }
}

/// Inline diagnostic for a failed page visit.
pub fn scrape_failed(url: &str, reason: &str) -> String {
    format!("[Web page: {url}]\nFailed to read this page: {reason}")
}

/// Inline diagnostic for a failed search.
pub fn search_failed(query: &str, reason: &str) -> String {
    format!("[Web search: {query}]\nSearch failed: {reason}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_locale_has_distinct_status_text() {
        for locale in Locale::ALL {
            let texts = [
                status_scraping(locale),
                status_searching(locale),
                status_processing(locale),
            ];
            assert!(texts.iter().all(|t| !t.is_empty()));
            assert_ne!(texts[0], texts[1]);
            assert_ne!(texts[1], texts[2]);
        }
    }

    #[test]
    fn test_no_results_mentions_query() {
        for locale in Locale::ALL {
            assert!(no_results(locale, "rust 1.90").contains("rust 1.90"));
        }
    }

    #[test]
    fn test_failure_text_carries_reason() {
        let text = scrape_failed("https://a.com", "timed out");
        assert!(text.contains("https://a.com"));
        assert!(text.ends_with("timed out"));
        assert!(search_failed("q", "boom").contains("boom"));
    }
}
