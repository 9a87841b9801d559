//! clangd `SemanticTokens` rules that reproduce the classifier with regexes.
//!
//! clangd can only attach modifiers to a token, so every scope is encoded as
//! a unique, non-empty set of `CustomN` modifiers. VS Code then maps the
//! modifier selector (`*.custom0.custom2`) back to the scope.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Scopes;
use crate::processor::scope_name::{ENUM_SCOPE, TYPE_SCOPE};

/// Modifiers clangd supports: `Custom0` … `Custom8`.
pub const MAX_MODIFIERS: usize = 9;

const CONCEPT_CLASS: &str = "[binpfro]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub regex: String,
    pub modifiers: Vec<String>,
    /// Hyphenated scope, e.g. `malterlib-member-variable`.
    pub scope: String,
}

impl Rule {
    /// TextMate form of the scope, e.g. `malterlib.member.variable`.
    pub fn textmate_scope(&self) -> String {
        self.scope.replace('-', ".")
    }
}

/// Build the rules: keyword rules first, then merged prefix rules.
pub fn build_rules(scopes: &Scopes) -> Result<Vec<Rule>> {
    let mut pending: Vec<(String, String)> = Vec::new();

    let mut by_scope: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (kw, scope) in &scopes.keywords {
        by_scope.entry(scope).or_default().push(kw);
    }
    for (scope, mut words) in by_scope {
        words.sort_unstable();
        let escaped: Vec<String> = words.into_iter().map(regex::escape).collect();
        pending.push((anchor(&escaped.join("|")), scope.to_string()));
    }

    let mut prefix_regexes: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut ordered: Vec<_> = scopes.prefixes.iter().collect();
    ordered.sort_by_key(|(prefix, _)| std::cmp::Reverse(prefix.len()));

    for (prefix, info) in ordered {
        let mut add = |scope: &str, regex: String| {
            prefix_regexes.entry(scope.to_string()).or_default().push(regex);
        };
        match prefix.as_str() {
            "E" => {
                add(info.scope.as_str(), "E[A-Z][A-Za-z0-9_]*_[A-Za-z0-9_]*".into());
                add(ENUM_SCOPE, "E[A-Z][A-Za-z0-9]*".into());
            }
            "CF" => {
                add(TYPE_SCOPE, "CF[A-Z][A-Za-z0-9_]*Ref".into());
                add(info.scope.as_str(), "CF[A-Z][A-Za-z0-9_]*".into());
            }
            _ => {
                let escaped = regex::escape(prefix);
                let regex = if info.variable {
                    format!("{escaped}({CONCEPT_CLASS}?[A-Z][A-Za-z0-9_]*)")
                } else {
                    format!("{escaped}[A-Z][A-Za-z0-9_]*")
                };
                add(info.scope.as_str(), regex);
            }
        }
    }
    for (scope, regexes) in prefix_regexes {
        pending.push((anchor(&regexes.join("|")), scope));
    }

    assign_modifiers(pending)
}

/// `^a$`, or `^(a|b)$` for alternatives.
fn anchor(body: &str) -> String {
    if body.contains('|') {
        format!("^({body})$")
    } else {
        format!("^{body}$")
    }
}

/// Smallest modifier count whose non-empty subsets cover `scopes`.
pub fn required_modifiers(scopes: usize) -> Result<usize> {
    let mut m = 0;
    while (1usize << m) - 1 < scopes {
        m += 1;
    }
    if m > MAX_MODIFIERS {
        return Err(Error::TooManyScopes {
            scopes,
            max: MAX_MODIFIERS,
        });
    }
    Ok(m)
}

/// All non-empty subsets of `0..n`: singles, then pairs, … each in
/// lexicographic order.
pub fn modifier_combinations(n: usize) -> impl Iterator<Item = Vec<usize>> {
    (1..=n).flat_map(move |k| (0..n).combinations(k))
}

/// Give each scope the next modifier set at its first rule.
fn assign_modifiers(pending: Vec<(String, String)>) -> Result<Vec<Rule>> {
    let distinct = {
        let mut seen: Vec<&str> = pending.iter().map(|(_, s)| s.as_str()).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    };
    let used = required_modifiers(distinct)?;
    let names: Vec<String> = (0..used).map(|i| format!("Custom{i}")).collect();

    let mut combos = modifier_combinations(used);
    let mut assigned: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut rules = Vec::with_capacity(pending.len());
    for (regex, scope) in pending {
        let modifiers = match assigned.get(&scope) {
            Some(m) => m.clone(),
            None => {
                let combo = combos.next().ok_or(Error::TooManyScopes {
                    scopes: distinct,
                    max: MAX_MODIFIERS,
                })?;
                let m: Vec<String> = combo.into_iter().map(|i| names[i].clone()).collect();
                assigned.insert(scope.clone(), m.clone());
                m
            }
        };
        rules.push(Rule {
            regex,
            modifiers,
            scope,
        });
    }
    Ok(rules)
}

/// `semanticScopesForPackage.json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticScopes {
    pub semantic_token_scopes: Vec<LanguageScopes>,
}

#[derive(Debug, Serialize)]
pub struct LanguageScopes {
    pub language: String,
    pub scopes: IndexMap<String, Vec<String>>,
}

pub fn semantic_scopes(rules: &[Rule]) -> SemanticScopes {
    let mut scopes: IndexMap<String, Vec<String>> = IndexMap::new();
    for rule in rules {
        let selector = format!(
            "*.{}",
            rule.modifiers
                .iter()
                .map(|m| m.to_lowercase())
                .collect::<Vec<_>>()
                .join(".")
        );
        let list = scopes.entry(selector).or_default();
        let textmate = rule.textmate_scope();
        if !list.contains(&textmate) {
            list.push(textmate);
        }
    }
    SemanticScopes {
        semantic_token_scopes: vec![LanguageScopes {
            language: "cpp".to_string(),
            scopes,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PrefixScope;
    use pretty_assertions::assert_eq;

    fn scopes() -> Scopes {
        let mut s = Scopes::default();
        s.keywords.insert("auto".into(), "malterlib-keyword".into());
        s.keywords.insert("int".into(), "malterlib-keyword".into());
        s.keywords.insert("nullptr".into(), "malterlib-constant".into());
        for (p, scope, variable) in [
            ("C", "malterlib-type", false),
            ("CF", "malterlib-function", false),
            ("E", "malterlib-enumerator", false),
            ("m_", "malterlib-member-variable", true),
        ] {
            s.prefixes.insert(
                p.into(),
                PrefixScope {
                    scope: scope.into(),
                    variable,
                },
            );
        }
        s
    }

    #[test]
    fn combinations_by_size_then_lexicographic() {
        let all: Vec<Vec<usize>> = modifier_combinations(3).collect();
        assert_eq!(
            all,
            vec![
                vec![0],
                vec![1],
                vec![2],
                vec![0, 1],
                vec![0, 2],
                vec![1, 2],
                vec![0, 1, 2],
            ]
        );
        assert_eq!(modifier_combinations(9).count(), 511);
    }

    #[test]
    fn modifier_capacity() {
        assert_eq!(required_modifiers(0).unwrap(), 0);
        assert_eq!(required_modifiers(1).unwrap(), 1);
        assert_eq!(required_modifiers(3).unwrap(), 2);
        assert_eq!(required_modifiers(4).unwrap(), 3);
        assert_eq!(required_modifiers(511).unwrap(), 9);
        assert!(matches!(
            required_modifiers(512),
            Err(Error::TooManyScopes { scopes: 512, .. })
        ));
    }

    #[test]
    fn builds_rules_in_order() {
        let rules = build_rules(&scopes()).unwrap();
        let summary: Vec<(&str, &str)> = rules
            .iter()
            .map(|r| (r.regex.as_str(), r.scope.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("^nullptr$", "malterlib-constant"),
                ("^(auto|int)$", "malterlib-keyword"),
                (
                    "^(CF[A-Z][A-Za-z0-9_]*Ref|C[A-Z][A-Za-z0-9_]*)$",
                    "malterlib-type"
                ),
                ("^CF[A-Z][A-Za-z0-9_]*$", "malterlib-function"),
                (
                    "^m_([binpfro]?[A-Z][A-Za-z0-9_]*)$",
                    "malterlib-member-variable"
                ),
                ("^E[A-Z][A-Za-z0-9_]*_[A-Za-z0-9_]*$", "malterlib-enumerator"),
                ("^E[A-Z][A-Za-z0-9]*$", "malterlib-enum"),
            ]
        );
    }

    #[test]
    fn modifiers_unique_per_scope() {
        let rules = build_rules(&scopes()).unwrap();
        // 7 scopes -> 3 modifiers
        assert_eq!(rules[0].modifiers, vec!["Custom0"]);
        assert_eq!(rules[1].modifiers, vec!["Custom1"]);
        assert_eq!(rules[2].modifiers, vec!["Custom2"]);
        assert_eq!(rules[3].modifiers, vec!["Custom0", "Custom1"]);
        let mut sets: Vec<_> = rules.iter().map(|r| r.modifiers.clone()).collect();
        sets.sort();
        sets.dedup();
        assert_eq!(sets.len(), rules.len());
    }

    #[test]
    fn semantic_scopes_by_selector() {
        let rules = build_rules(&scopes()).unwrap();
        let json = serde_json::to_value(semantic_scopes(&rules)).unwrap();
        let cpp = &json["semanticTokenScopes"][0];
        assert_eq!(cpp["language"], "cpp");
        assert_eq!(cpp["scopes"]["*.custom0"][0], "malterlib.constant");
        assert_eq!(cpp["scopes"]["*.custom0.custom1"][0], "malterlib.function");
    }
}
