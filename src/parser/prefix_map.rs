//! `ms_PrefixMap` entries of `HighlighterrCxx.cpp`.
//!
//! ```text
//! { "m_", EClassification::EClassification_MemberVariable, true },
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{PrefixEntry, PrefixMap};

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\{\s*"([^"]*)"\s*,\s*EClassification::(EClassification_[A-Za-z0-9_]+)\s*,\s*(true|false)\s*\}"#,
    )
    .expect("prefix map pattern")
});

/// Collect every prefix entry; a repeated prefix keeps the last entry.
pub fn parse_prefix_map(source: &str) -> PrefixMap {
    ENTRY_RE
        .captures_iter(source)
        .map(|caps| {
            (
                caps[1].to_string(),
                PrefixEntry {
                    classification: caps[2].to_string(),
                    variable: &caps[3] == "true",
                },
            )
        })
        .collect()
}
