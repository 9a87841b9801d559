//! Keywords registered by `f_AddDefaultKeyword*` calls, plus the example
//! identifiers marked with `ignore(...)` in `HighlighterrCxx.cpp`.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{KeywordEntry, KeywordMap};

static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"f_AddDefaultKeyword_?(?:C|Cpp|CLike)?\(\s*"([^"]+)"\s*,\s*EClassification::(EClassification_[A-Za-z0-9_]+)\s*\)"#,
    )
    .expect("keyword pattern")
});

static JS_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"f_AddDefaultKeyword_JS\(").expect("js keyword pattern"));

/// `ignore("kw", EClassification::X, ...)`
static IGNORE_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"ignore\s*\(\s*"([^"]+)"\s*,\s*EClassification::(EClassification_[A-Za-z0-9_]+)\s*,"#,
    )
    .expect("ignore call pattern")
});

/// `{ "prefix", EClassification::X, bool } ... ignore(kw)`
static IGNORE_TRAILER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{[^\n]*?EClassification::(EClassification_[A-Za-z0-9_]+)[^\n]*?\}[^\n]*?ignore\(\s*([A-Za-z0-9_]+)\s*\)",
    )
    .expect("ignore trailer pattern")
});

/// Examples are collected first; a keyword call never overrides one.
pub fn parse_keywords(source: &str) -> KeywordMap {
    let mut keywords = KeywordMap::new();

    for line in source.lines() {
        let found = IGNORE_CALL_RE
            .captures(line)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .or_else(|| {
                IGNORE_TRAILER_RE
                    .captures(line)
                    .map(|caps| (caps[2].to_string(), caps[1].to_string()))
            });
        if let Some((keyword, classification)) = found {
            keywords.insert(
                keyword,
                KeywordEntry {
                    classification,
                    example: true,
                },
            );
        }
    }

    for line in source.lines() {
        if JS_KEYWORD_RE.is_match(line) {
            continue;
        }
        let Some(caps) = KEYWORD_RE.captures(line) else {
            continue;
        };
        keywords
            .entry(caps[1].to_string())
            .or_insert_with(|| KeywordEntry {
                classification: caps[2].to_string(),
                example: false,
            });
    }

    keywords
}
