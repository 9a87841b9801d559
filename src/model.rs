use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Highest prefix length the C++ highlighter looks at.
pub const MAX_PREFIX_LEN: usize = 6;

/// `prefixmap.json`: prefix -> classification. Sorted on disk.
pub type PrefixMap = BTreeMap<String, PrefixEntry>;

/// `keywords.json`: keyword -> classification. Sorted on disk.
pub type KeywordMap = BTreeMap<String, KeywordEntry>;

/// `classifications.json`: `EClassification_*` -> scope, in enum order.
pub type ClassificationMap = IndexMap<String, String>;

/// ─────────────────────────────────────────────────────
/// Extracted tables
/// ─────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PrefixValue")]
pub struct PrefixEntry {
    pub classification: String,
    /// Variable prefixes accept a concept character before the capital.
    pub variable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "KeywordValue")]
pub struct KeywordEntry {
    pub classification: String,
    /// Examples only document a prefix; they never become keyword rules.
    #[serde(skip_serializing_if = "is_false")]
    pub example: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Older tables stored the bare classification string.
#[derive(Deserialize)]
#[serde(untagged)]
enum PrefixValue {
    Name(String),
    Entry {
        classification: String,
        #[serde(default)]
        variable: bool,
    },
}

impl From<PrefixValue> for PrefixEntry {
    fn from(v: PrefixValue) -> Self {
        match v {
            PrefixValue::Name(classification) => Self {
                classification,
                variable: false,
            },
            PrefixValue::Entry {
                classification,
                variable,
            } => Self {
                classification,
                variable,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeywordValue {
    Name(String),
    Entry {
        classification: String,
        #[serde(default)]
        example: bool,
    },
}

impl From<KeywordValue> for KeywordEntry {
    fn from(v: KeywordValue) -> Self {
        match v {
            KeywordValue::Name(classification) => Self {
                classification,
                example: false,
            },
            KeywordValue::Entry {
                classification,
                example,
            } => Self {
                classification,
                example,
            },
        }
    }
}

/// ─────────────────────────────────────────────────────
/// Combined scope table consumed by the extension
/// ─────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scopes {
    #[serde(default)]
    pub keywords: IndexMap<String, String>,
    #[serde(default)]
    pub prefixes: IndexMap<String, PrefixScope>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixScope {
    pub scope: String,
    #[serde(default)]
    pub variable: bool,
}

/// ─────────────────────────────────────────────────────
/// TextMate grammar
/// ─────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    pub scope_name: String,
    #[serde(default)]
    pub injection_selector: String,
    #[serde(default)]
    pub patterns: Vec<GrammarPattern>,
    #[serde(default)]
    pub repository: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammarPattern {
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub captures: IndexMap<String, Capture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl GrammarPattern {
    /// Pattern matching `regex` whose first capture carries `scope`.
    pub fn captured(regex: String, scope: &str) -> Self {
        let mut captures = IndexMap::new();
        captures.insert(
            "1".to_string(),
            Capture {
                name: Some(scope.to_string()),
            },
        );
        Self {
            regex: Some(regex),
            captures,
            name: None,
        }
    }

    /// Top-level `name`, falling back to the scope of capture 1.
    pub fn scope(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or_else(|| self.captures.get("1").and_then(|c| c.name.as_deref()))
    }
}

/// One entry of `colorexamples.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColorExample {
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub examples: Vec<String>,
}
