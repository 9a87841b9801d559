//! TextMate injection grammar for C/C++.
//!
//! Keyword patterns come first, one per scope, followed by one pattern per
//! prefix ordered longest first so that the first matching rule mirrors the
//! classifier's precedence.

use indexmap::IndexMap;

use crate::model::{Grammar, GrammarPattern, KeywordMap, PrefixMap};
use crate::processor::scope_name::classification_to_scope;

pub const SCOPE_NAME: &str = "malterlib.injection";
pub const INJECTION_SELECTOR: &str = "L:source.c -meta.preprocessor -string -comment, L:source.cpp -meta.preprocessor -string -comment";

pub fn generate_grammar(prefixes: &PrefixMap, keywords: &KeywordMap) -> Grammar {
    let mut by_scope: IndexMap<String, Vec<&str>> = IndexMap::new();
    for (kw, entry) in keywords {
        if entry.example || entry.classification.is_empty() {
            continue;
        }
        by_scope
            .entry(classification_to_scope(&entry.classification))
            .or_default()
            .push(kw);
    }

    let mut patterns: Vec<GrammarPattern> = by_scope
        .iter()
        .map(|(scope, words)| GrammarPattern::captured(format!("({})", keyword_regex(words)), scope))
        .collect();

    let mut ordered: Vec<(&String, String)> = prefixes
        .iter()
        .map(|(prefix, entry)| (prefix, classification_to_scope(&entry.classification)))
        .collect();
    ordered.sort_by_key(|(prefix, _)| std::cmp::Reverse(prefix.len()));

    for (prefix, scope) in ordered {
        let regex = format!(r"\b{}[A-Za-z0-9_]+\b", regex::escape(prefix));
        patterns.push(GrammarPattern::captured(format!("({regex})"), &scope));
    }

    Grammar {
        scope_name: SCOPE_NAME.to_string(),
        injection_selector: INJECTION_SELECTOR.to_string(),
        patterns,
        repository: serde_json::Map::new(),
    }
}

/// `\b(?:long|short)\b|#(?:include)\b`
fn keyword_regex(words: &[&str]) -> String {
    let (hash, plain): (Vec<&str>, Vec<&str>) = words.iter().partition(|k| k.starts_with('#'));

    let mut parts = Vec::new();
    if !plain.is_empty() {
        parts.push(format!(r"\b(?:{})\b", alternation(plain)));
    }
    if !hash.is_empty() {
        let stripped = hash.into_iter().map(|k| &k[1..]).collect();
        parts.push(format!(r"#(?:{})\b", alternation(stripped)));
    }
    parts.join("|")
}

fn alternation(mut words: Vec<&str>) -> String {
    words.sort_by_key(|k| std::cmp::Reverse(k.len()));
    words
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{KeywordEntry, PrefixEntry};
    use pretty_assertions::assert_eq;

    fn keyword(cls: &str, example: bool) -> KeywordEntry {
        KeywordEntry {
            classification: cls.into(),
            example,
        }
    }

    #[test]
    fn keyword_patterns_grouped_by_scope() {
        let mut keywords = KeywordMap::new();
        keywords.insert("auto".into(), keyword("EClassification_Keyword", false));
        keywords.insert("constexpr".into(), keyword("EClassification_Keyword", false));
        keywords.insert("#include".into(), keyword("EClassification_Keyword", false));
        keywords.insert("#if".into(), keyword("EClassification_Keyword", false));
        keywords.insert("CExample".into(), keyword("EClassification_Type", true));

        let grammar = generate_grammar(&PrefixMap::new(), &keywords);

        assert_eq!(grammar.patterns.len(), 1);
        assert_eq!(
            grammar.patterns[0].regex.as_deref(),
            Some(r"(\b(?:constexpr|auto)\b|#(?:include|if)\b)")
        );
        assert_eq!(grammar.patterns[0].scope(), Some("malterlib-keyword"));
    }

    #[test]
    fn prefix_patterns_longest_first() {
        let mut prefixes = PrefixMap::new();
        for (p, cls) in [
            ("C", "EClassification_Type"),
            ("fg_", "EClassification_GlobalFunction"),
            ("m_", "EClassification_MemberVariable"),
        ] {
            prefixes.insert(
                p.into(),
                PrefixEntry {
                    classification: cls.into(),
                    variable: false,
                },
            );
        }

        let grammar = generate_grammar(&prefixes, &KeywordMap::new());
        let regexes: Vec<_> = grammar
            .patterns
            .iter()
            .map(|p| p.regex.clone().unwrap())
            .collect();
        assert_eq!(
            regexes,
            vec![
                r"(\bfg_[A-Za-z0-9_]+\b)",
                r"(\bm_[A-Za-z0-9_]+\b)",
                r"(\bC[A-Za-z0-9_]+\b)",
            ]
        );
        assert_eq!(grammar.patterns[0].scope(), Some("malterlib-global-function"));
    }

    #[test]
    fn serialises_like_a_textmate_grammar() {
        let grammar = generate_grammar(&PrefixMap::new(), &KeywordMap::new());
        let json = serde_json::to_value(&grammar).unwrap();
        assert_eq!(json["scopeName"], SCOPE_NAME);
        assert!(json["patterns"].as_array().unwrap().is_empty());
        assert!(json["repository"].as_object().unwrap().is_empty());
    }
}
