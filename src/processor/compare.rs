//! Scopes the extension manifest maps semantic tokens to, but the theme
//! never colours.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::processor::theme::rule_scopes;

/// Scopes coloured by the editor itself or intentionally left plain.
pub const EXCEPTION_SCOPES: &[&str] = &[
    "malterlib.character",
    "malterlib.comment.background",
    "malterlib.comment.foreground",
    "malterlib.comment.url",
    "malterlib.documentation.comment.foreground",
    "malterlib.documentation.comment.foreground.keyword",
    "malterlib.number",
    "malterlib.operator",
    "malterlib.plain.text",
    "malterlib.preprocessor.operator",
    "malterlib.string",
    "malterlib.typedef",
    "malterlib.unknown",
];

const SCOPE_PREFIX: &str = "malterlib.";

/// `malterlib.*` scopes of the theme's `tokenColors`.
pub fn theme_scopes(theme: &Value) -> BTreeSet<String> {
    theme
        .get("tokenColors")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .flat_map(rule_scopes)
        .filter(|s| s.starts_with(SCOPE_PREFIX))
        .collect()
}

/// `malterlib.*` scopes of `contributes.semanticTokenScopes[].scopes` in
/// `package.json`.
pub fn package_scopes(package: &Value) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    let languages = package
        .pointer("/contributes/semanticTokenScopes")
        .and_then(Value::as_array)
        .into_iter()
        .flatten();
    for language in languages {
        let Some(map) = language.get("scopes").and_then(Value::as_object) else {
            continue;
        };
        for list in map.values().filter_map(Value::as_array) {
            out.extend(
                list.iter()
                    .filter_map(Value::as_str)
                    .filter(|s| s.starts_with(SCOPE_PREFIX))
                    .map(str::to_string),
            );
        }
    }
    out
}

#[derive(Debug, Default)]
pub struct ScopeComparison {
    pub theme: BTreeSet<String>,
    pub package: BTreeSet<String>,
    /// Sorted.
    pub missing_in_theme: Vec<String>,
}

impl ScopeComparison {
    pub fn print(&self) {
        println!("=== SCOPE COMPARISON ===");
        println!("Total scopes in theme: {}", self.theme.len());
        println!("Total scopes in package.json: {}", self.package.len());
        println!("Exception scopes (ignored): {}", EXCEPTION_SCOPES.len());
        println!();

        if self.missing_in_theme.is_empty() {
            println!("All package.json scopes are present in theme");
        } else {
            println!("=== SCOPES IN PACKAGE.JSON BUT MISSING IN THEME ===");
            for scope in &self.missing_in_theme {
                println!("  {scope}");
            }
            println!("\nTotal missing: {}", self.missing_in_theme.len());
        }
        println!();
    }
}

pub fn compare_scopes(theme: &Value, package: &Value) -> ScopeComparison {
    let theme = theme_scopes(theme);
    let package = package_scopes(package);
    let missing_in_theme = package
        .iter()
        .filter(|s| !theme.contains(*s) && !EXCEPTION_SCOPES.contains(&s.as_str()))
        .cloned()
        .collect();
    ScopeComparison {
        theme,
        package,
        missing_in_theme,
    }
}
