//! Identifier classifier mirrored from the C++ highlighter.
//!
//! Lookup order:
//!   1. exact keyword
//!   2. prefixes, longest first; non-variable before variable at each length
//!
//! Non-variable prefixes need an upper-case character right after the
//! prefix. Variable prefixes additionally allow one concept character
//! (`binpfro`) in between, e.g. `m_pValue`.

use std::collections::HashMap;

use crate::model::{MAX_PREFIX_LEN, Scopes};
use crate::processor::scope_name::{ENUM_SCOPE, TYPE_SCOPE};

const CONCEPT_CHARS: &str = "binpfro";

#[derive(Debug, Default)]
pub struct Classifier {
    keywords: HashMap<String, String>,
    /// `by_len[n]` holds the non-variable prefixes of length `n`.
    by_len: Vec<HashMap<String, String>>,
    /// Same for variable prefixes.
    by_len_var: Vec<HashMap<String, String>>,
}

impl Classifier {
    pub fn new(scopes: &Scopes) -> Self {
        let longest = scopes
            .prefixes
            .keys()
            .map(|p| p.chars().count())
            .max()
            .unwrap_or(0);
        let max_len = longest.max(MAX_PREFIX_LEN);

        let mut by_len = vec![HashMap::new(); max_len + 1];
        let mut by_len_var = vec![HashMap::new(); max_len + 1];
        for (prefix, info) in &scopes.prefixes {
            let bucket = if info.variable {
                &mut by_len_var
            } else {
                &mut by_len
            };
            bucket[prefix.chars().count()].insert(prefix.clone(), info.scope.clone());
        }

        let keywords = scopes
            .keywords
            .iter()
            .filter(|(_, scope)| !scope.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            keywords,
            by_len,
            by_len_var,
        }
    }

    fn max_prefix_len(&self) -> usize {
        self.by_len.len().saturating_sub(1)
    }

    /// Scope for `name`, or `None` when nothing matches.
    pub fn classify(&self, name: &str) -> Option<&str> {
        if let Some(scope) = self.keywords.get(name) {
            return Some(scope.as_str());
        }

        let len = name.chars().count();
        for i in (0..=len.min(self.max_prefix_len())).rev() {
            let end = name.char_indices().nth(i).map_or(name.len(), |(at, _)| at);
            let prefix = &name[..end];

            if let Some(scope) = self.by_len[i].get(prefix) {
                if match_other_prefix(name, prefix) {
                    if prefix == "E" && !name.contains('_') {
                        return Some(ENUM_SCOPE);
                    }
                    if prefix == "CF" && name.ends_with("Ref") {
                        return Some(TYPE_SCOPE);
                    }
                    return Some(scope.as_str());
                }
            }
            if let Some(scope) = self.by_len_var[i].get(prefix) {
                if match_variable_prefix(name, prefix) {
                    return Some(scope.as_str());
                }
            }
        }
        None
    }
}

/// Upper-case as the C++ highlighter sees it: `A-Z`, digits and the Latin-1
/// capitals block.
pub fn is_upper_case(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch.is_ascii_digit() || ('\u{c0}'..='\u{df}').contains(&ch)
}

pub fn match_variable_prefix(identifier: &str, prefix: &str) -> bool {
    let Some(rest) = identifier.strip_prefix(prefix) else {
        return false;
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(ch) if is_upper_case(ch) => true,
        Some(ch) if CONCEPT_CHARS.contains(ch) => chars.next().is_some_and(is_upper_case),
        _ => false,
    }
}

pub fn match_other_prefix(identifier: &str, prefix: &str) -> bool {
    identifier
        .strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(is_upper_case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PrefixScope;

    fn scopes() -> Scopes {
        let mut s = Scopes::default();
        s.keywords.insert("auto".into(), "malterlib-keyword".into());
        s.keywords.insert("fg_Test".into(), "malterlib-special".into());
        for (p, scope, variable) in [
            ("C", "malterlib-type", false),
            ("E", "malterlib-enumerator", false),
            ("CF", "malterlib-function", false),
            ("f", "malterlib-function", false),
            ("fg_", "malterlib-global-function", false),
            ("m_", "malterlib-member-variable", true),
            ("_", "malterlib-parameter", true),
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
    fn keywords_win_over_prefixes() {
        let c = Classifier::new(&scopes());
        assert_eq!(c.classify("auto"), Some("malterlib-keyword"));
        assert_eq!(c.classify("fg_Test"), Some("malterlib-special"));
        assert_eq!(c.classify("fg_Other"), Some("malterlib-global-function"));
    }

    #[test]
    fn longest_prefix_first() {
        let c = Classifier::new(&scopes());
        assert_eq!(c.classify("CString"), Some("malterlib-type"));
        assert_eq!(c.classify("CFRelease"), Some("malterlib-function"));
        assert_eq!(c.classify("fDoIt"), Some("malterlib-function"));
        assert_eq!(c.classify("fdoit"), None);
        assert_eq!(c.classify("C"), None);
    }

    #[test]
    fn enum_and_core_foundation_special_cases() {
        let c = Classifier::new(&scopes());
        assert_eq!(c.classify("EColor"), Some(ENUM_SCOPE));
        assert_eq!(c.classify("EColor_Red"), Some("malterlib-enumerator"));
        assert_eq!(c.classify("CFStringRef"), Some(TYPE_SCOPE));
    }

    #[test]
    fn variable_prefixes_allow_concept_char() {
        let c = Classifier::new(&scopes());
        assert_eq!(c.classify("m_Value"), Some("malterlib-member-variable"));
        assert_eq!(c.classify("m_pValue"), Some("malterlib-member-variable"));
        assert_eq!(c.classify("m_bEnabled"), Some("malterlib-member-variable"));
        assert_eq!(c.classify("m_xValue"), None);
        assert_eq!(c.classify("m_p"), None);
        assert_eq!(c.classify("_Param"), Some("malterlib-parameter"));
    }

    #[test]
    fn prefixes_longer_than_default_limit() {
        let mut s = scopes();
        for (p, scope, variable) in [
            ("mp_Longer", "malterlib-long-member", true),
            ("Longest", "malterlib-long-type", false),
        ] {
            s.prefixes.insert(
                p.into(),
                PrefixScope {
                    scope: scope.into(),
                    variable,
                },
            );
        }
        let c = Classifier::new(&s);
        assert_eq!(c.classify("mp_LongerpValue"), Some("malterlib-long-member"));
        assert_eq!(c.classify("mp_LongerValue"), Some("malterlib-long-member"));
        assert_eq!(c.classify("mp_LongerxValue"), None);
        assert_eq!(c.classify("LongestName"), Some("malterlib-long-type"));
        // shorter prefixes still apply
        assert_eq!(c.classify("m_pValue"), Some("malterlib-member-variable"));
    }

    #[test]
    fn upper_case_rules() {
        assert!(is_upper_case('A'));
        assert!(is_upper_case('7'));
        assert!(is_upper_case('Ä'));
        assert!(!is_upper_case('a'));
        assert!(!is_upper_case('_'));
        assert!(match_other_prefix("C3D", "C"));
        assert!(!match_other_prefix("Cx", "C"));
        assert!(!match_variable_prefix("m_", "m_"));
    }
}
