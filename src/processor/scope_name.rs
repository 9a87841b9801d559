//! `EClassification_*` enumerator names -> `malterlib-*` scope names.

use std::sync::LazyLock;

use fancy_regex::Regex;

const CLASSIFICATION_PREFIX: &str = "EClassification_";

/// Misspellings in the C++ enum, fixed before splitting into words.
const CORRECTIONS: &[(&str, &str)] = &[("bulit", "built")];

/// Scope of `EClassification_Enum`, used for enum type names.
pub const ENUM_SCOPE: &str = "malterlib-enum";
/// Scope of `EClassification_Type`, used for CoreFoundation `*Ref` types.
pub const TYPE_SCOPE: &str = "malterlib-type";

/// Convert an enumerator such as `EClassification_TemplateTypeParam` into its
/// scope, `malterlib-template-type-param`.
pub fn classification_to_scope(classification: &str) -> String {
    let name = classification.replace(CLASSIFICATION_PREFIX, "");

    let mut parts = Vec::new();
    for seg in name.split('_') {
        match seg.strip_prefix("Template") {
            Some(rest) => {
                parts.push("template".to_string());
                if !rest.is_empty() {
                    parts.push(camel_to_kebab(rest));
                }
            }
            None => parts.push(camel_to_kebab(seg)),
        }
    }

    format!("malterlib-{}", parts.join("-"))
}

/// `URLParserBuiltIn` -> `url-parser-builtin`.
fn camel_to_kebab(segment: &str) -> String {
    let mut segment = segment.to_string();
    for (wrong, right) in CORRECTIONS {
        segment = segment
            .replace(&capitalize(wrong), &capitalize(right))
            .replace(wrong, right);
    }

    let words: Vec<String> = split_words(&segment)
        .into_iter()
        .map(|w| w.to_ascii_lowercase())
        .collect();
    words.join("-").replace("built-in", "builtin")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A run of capitals that ends the segment or precedes a Capital+lowercase
/// pair (acronyms like `URL` stay whole), or an optional capital followed by
/// lowercase letters and digits.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z]+(?=[A-Z][a-z]|$)|[A-Z]?[a-z0-9]+").expect("word pattern")
});

/// Split a CamelCase segment into words. Characters outside any word are
/// dropped.
fn split_words(s: &str) -> Vec<&str> {
    WORD_RE
        .find_iter(s)
        .filter_map(Result::ok)
        .map(|m| m.as_str())
        .collect()
}
