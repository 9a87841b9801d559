//! Merge the extracted tables into `scopes.json`.

use std::collections::BTreeSet;

use crate::model::{ClassificationMap, KeywordMap, PrefixMap, PrefixScope, Scopes};

/// Keywords and prefixes whose classification is unknown are dropped, as
/// are example keywords.
pub fn combine(
    keywords: &KeywordMap,
    prefixes: &PrefixMap,
    classifications: &ClassificationMap,
) -> Scopes {
    let keywords: indexmap::IndexMap<_, _> = keywords
        .iter()
        .filter(|(_, entry)| !entry.example)
        .filter_map(|(kw, entry)| {
            let scope = classifications.get(&entry.classification)?;
            Some((kw.clone(), scope.clone()))
        })
        .collect();

    let prefixes: indexmap::IndexMap<_, _> = prefixes
        .iter()
        .filter_map(|(prefix, entry)| {
            let scope = classifications.get(&entry.classification)?;
            Some((
                prefix.clone(),
                PrefixScope {
                    scope: scope.clone(),
                    variable: entry.variable,
                },
            ))
        })
        .collect();

    let scopes: BTreeSet<&String> = keywords
        .values()
        .chain(prefixes.values().map(|p| &p.scope))
        .collect();
    let scopes = scopes.into_iter().cloned().collect();

    Scopes {
        keywords,
        prefixes,
        scopes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{KeywordEntry, PrefixEntry};

    #[test]
    fn combines_tables() {
        let mut keywords = KeywordMap::new();
        for (kw, cls, example) in [
            ("auto", "EClassification_Keyword", false),
            ("CExample", "EClassification_Type", true),
            ("mystery", "EClassification_Unknown", false),
        ] {
            keywords.insert(
                kw.into(),
                KeywordEntry {
                    classification: cls.into(),
                    example,
                },
            );
        }
        let mut prefixes = PrefixMap::new();
        prefixes.insert(
            "C".into(),
            PrefixEntry {
                classification: "EClassification_Type".into(),
                variable: false,
            },
        );
        prefixes.insert(
            "m_".into(),
            PrefixEntry {
                classification: "EClassification_MemberVariable".into(),
                variable: true,
            },
        );
        let classifications: ClassificationMap = [
            ("EClassification_Keyword", "malterlib-keyword"),
            ("EClassification_Type", "malterlib-type"),
            ("EClassification_MemberVariable", "malterlib-member-variable"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let scopes = combine(&keywords, &prefixes, &classifications);

        assert_eq!(scopes.keywords.len(), 1);
        assert_eq!(scopes.keywords["auto"], "malterlib-keyword");
        assert!(scopes.prefixes["m_"].variable);
        assert_eq!(
            scopes.scopes,
            vec!["malterlib-keyword", "malterlib-member-variable", "malterlib-type"]
        );
    }
}
