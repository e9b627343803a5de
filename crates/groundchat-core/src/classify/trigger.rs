//! Keyword-driven live-search trigger.
//!
//! The pattern set leans toward recall: a false positive costs one extra
//! search, a false negative yields a stale answer.

use std::sync::LazyLock;

use regex::RegexSet;

/// Patterns grouped by topic, each group covering en/ko/ja/zh.
const TRIGGER_PATTERNS: &[&str] = &[
    // Recency markers
    r"(?i)\b(latest|newest|recent(ly)?|current(ly)?|today|tonight|tomorrow|yesterday|now|right now|this (week|month|year)|up[- ]to[- ]date)\b",
    r"(최신|최근|오늘|내일|어제|지금|현재|요즘|이번 ?(주|달|해))",
    r"(最新|最近|今日|きょう|明日|昨日|今週|今月|今年|現在|いま)",
    r"(最新|最近|今天|明天|昨天|现在|現在|目前|本周|这周|本月|今年)",
    // Volatile facts: weather, prices, markets, exchange rates, scores
    r"(?i)\b(weather|forecast|temperature|price[sd]?|cost|stocks?|shares?|market|exchange rate|currency|bitcoin|crypto|score[sd]?|results?)\b",
    r"(날씨|기온|예보|가격|시세|주가|주식|환율|코인|비트코인|점수|경기 ?결과)",
    r"(天気|気温|予報|価格|値段|株価|株式|為替|レート|ビットコイン|試合結果)",
    r"(天气|天氣|气温|預報|预报|价格|價格|股价|股價|股票|汇率|匯率|比特币|比分)",
    // News
    r"(?i)\b(news|headlines?|breaking|announce(d|ment)?|released?|update[sd]?)\b",
    r"(뉴스|소식|속보|발표|출시)",
    r"(ニュース|速報|発表|発売)",
    r"(新闻|新聞|头条|快讯|发布|發布)",
    // "Who currently holds role X"
    r"(?i)\bwho\s+(is|are)\s+(the\s+)?(current|present|new|now)\b",
    r"(?i)\bwho\s+(is|are)\s+(the\s+)?(president|prime minister|ceo|chairman|leader|champion|king|queen)\b",
    r"(현재|지금).{0,10}(누구|대통령|총리|대표)",
    r"(?i)(대통령|총리|수상|대표|회장|사장|ceo).{0,10}누구",
    r"(?i)(大統領|首相|社長|ceo).{0,6}(誰|だれ)",
    r"(?i)(总统|總統|总理|總理|首相|ceo).{0,6}(是谁|是誰)",
];

static TRIGGERS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(TRIGGER_PATTERNS).expect("trigger patterns are valid regexes")
});

/// Whether `text` warrants a live web search before answering.
pub fn needs_live_search(text: &str) -> bool {
    TRIGGERS.is_match(text)
}
