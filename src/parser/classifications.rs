//! Enumerators of `enum class EClassification` in `HighlighterrCxx.h`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::ClassificationMap;
use crate::processor::scope_name::classification_to_scope;

static ENUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)enum\s+class\s+EClassification\s*(?::\s*[A-Za-z0-9_:]+\s*)?\{([^}]+)\}")
        .expect("enum pattern")
});

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("comment pattern"));

/// Enumerator names in declaration order.
pub fn parse_enumerators(header: &str) -> Result<Vec<String>> {
    let caps = ENUM_RE.captures(header).ok_or(Error::MissingEnum)?;
    let body = COMMENT_RE.replace_all(&caps[1], "");

    Ok(body
        .split(',')
        .map(|entry| entry.split('=').next().unwrap_or_default().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect())
}

/// Map every enumerator to its scope.
pub fn parse_classifications(header: &str) -> Result<ClassificationMap> {
    Ok(parse_enumerators(header)?
        .into_iter()
        .map(|name| {
            let scope = classification_to_scope(&name);
            (name, scope)
        })
        .collect())
}
