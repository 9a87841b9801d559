//! Editor theme variants derived from `themes/malterlib.json`.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use crate::error::Result;
use crate::model::ColorExample;
use crate::processor::color::displayp3_hex_to_srgb_hex;

pub const SRGB_THEME_NAME: &str = "Malterlib (sRGB)";
pub const NO_TOKENS_THEME_NAME: &str = "Malterlib (Dark Modern Syntax)";

/// Rewrite every `#` colour stored under one of `keys`, at any depth.
///
/// Returns the number of colours converted.
pub fn convert_colors(
    value: &mut Value,
    keys: &[&str],
    convert: &impl Fn(&str) -> Result<String>,
) -> Result<usize> {
    let mut count = 0;
    match value {
        Value::Object(map) => {
            for (k, v) in map.iter_mut() {
                match v {
                    Value::String(s) if keys.contains(&k.as_str()) && s.starts_with('#') => {
                        *s = convert(s)?;
                        count += 1;
                    }
                    _ => count += convert_colors(v, keys, convert)?,
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                count += convert_colors(item, keys, convert)?;
            }
        }
        _ => {}
    }
    Ok(count)
}

/// sRGB copy of the theme, with `foreground` and `background` converted.
pub fn srgb_theme(theme: &Value) -> Result<(Value, usize)> {
    let mut out = theme.clone();
    let count = convert_colors(
        &mut out,
        &["foreground", "background"],
        &displayp3_hex_to_srgb_hex,
    )?;
    if let Value::Object(map) = &mut out {
        map.insert("name".into(), json!(SRGB_THEME_NAME));
        map.insert("type".into(), json!("dark"));
        map.insert("highlightingColorSpace".into(), json!("srgb"));
    }
    Ok((out, count))
}

/// The theme's workbench colours combined with another theme's
/// `tokenColors` (none when `token_colors` is empty).
pub fn no_tokens_theme(theme: &Value, token_colors: Vec<Value>) -> Value {
    let field = |k: &str| theme.get(k).cloned().unwrap_or(Value::Null);

    let mut out = Map::new();
    out.insert("$schema".into(), field("$schema"));
    out.insert("name".into(), json!(NO_TOKENS_THEME_NAME));
    out.insert("type".into(), field("type"));
    out.insert("semanticHighlighting".into(), field("semanticHighlighting"));
    out.insert("highlightingColorSpace".into(), field("highlightingColorSpace"));
    out.insert("colorSpace".into(), field("colorSpace"));
    out.insert(
        "colors".into(),
        theme.get("colors").cloned().unwrap_or_else(|| json!({})),
    );
    if !token_colors.is_empty() {
        out.insert("tokenColors".into(), Value::Array(token_colors));
    }
    Value::Object(out)
}

/// `scope` of a token colour rule; a single string counts as a list of one.
pub fn rule_scopes(rule: &Value) -> Vec<String> {
    match rule.get("scope") {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|s| s.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn foreground(rule: &Value) -> String {
    rule.get("settings")
        .and_then(|s| s.get("foreground"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase()
}

/// Recursively sort object keys, so equal settings compare equal.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k.clone(), canonical(v))).collect())
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

/// Where an entry sorts after deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    /// Colour listed in `colorexamples.json`, by its position there.
    Example(usize),
    Malterlib,
    Other,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Example(_) => "colorexamples",
            Priority::Malterlib => "malterlib-other",
            Priority::Other => "non-malterlib-other",
        }
    }
}

pub fn priority(rule: &Value, color_order: &HashMap<String, usize>) -> Priority {
    if let Some(&idx) = color_order.get(&foreground(rule)) {
        return Priority::Example(idx);
    }
    if rule_scopes(rule).iter().any(|s| s.contains("malterlib.")) {
        Priority::Malterlib
    } else {
        Priority::Other
    }
}

/// Lower-cased colour -> position in `colorexamples.json`.
pub fn color_order(examples: &[ColorExample]) -> HashMap<String, usize> {
    examples
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.color.is_empty())
        .map(|(i, e)| (e.color.to_lowercase(), i))
        .collect()
}

#[derive(Debug, Default)]
pub struct DedupeReport {
    pub original: usize,
    pub deduplicated: usize,
    /// Scopes that appeared in more than one entry: scope -> (entry index,
    /// foreground) for each appearance.
    pub duplicate_scopes: IndexMap<String, Vec<(usize, String)>>,
    pub by_priority: [usize; 3],
}

impl DedupeReport {
    pub fn print(&self, theme: &Value, color_order: &HashMap<String, usize>) {
        println!("Original tokenColors entries: {}", self.original);
        println!("After deduplication: {}", self.deduplicated);
        println!(
            "Reduction: {} entries",
            self.original.saturating_sub(self.deduplicated)
        );
        println!("Entries with colors from colorexamples.json: {}", self.by_priority[0]);
        println!("Malterlib entries with other colors: {}", self.by_priority[1]);
        println!("Non-malterlib entries with other colors: {}", self.by_priority[2]);

        if self.duplicate_scopes.is_empty() {
            println!("\nNo duplicate scopes found - all scopes were unique");
        } else {
            println!(
                "\nFound {} scopes that appeared in multiple entries (now merged):",
                self.duplicate_scopes.len()
            );
            let mut sorted: Vec<_> = self.duplicate_scopes.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            for (scope, entries) in sorted {
                println!("\n  {scope} (appeared in {} entries):", entries.len());
                for (idx, color) in entries {
                    println!("    Entry {}: {color}", idx + 1);
                }
            }
        }

        println!("\nFirst 10 entries after sorting:");
        let rules = theme
            .get("tokenColors")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for (i, rule) in rules.iter().take(10).enumerate() {
            let scopes = rule_scopes(rule);
            let fg = rule
                .get("settings")
                .and_then(|s| s.get("foreground"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            println!(
                "  {}. [{}] {fg} - {} scopes",
                i + 1,
                priority(rule, color_order).label(),
                scopes.len()
            );
            if let Some(first) = scopes.first() {
                println!("      First scope: {first}");
            }
        }
    }
}

/// Merge `tokenColors` entries with identical settings, then order them by
/// [`Priority`]. The theme is modified in place.
pub fn dedupe_token_colors(theme: &mut Value, color_order: &HashMap<String, usize>) -> DedupeReport {
    let mut report = DedupeReport::default();
    let rules: Vec<Value> = theme
        .get("tokenColors")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    report.original = rules.len();

    for (i, rule) in rules.iter().enumerate() {
        let color = rule
            .get("settings")
            .and_then(|s| s.get("foreground"))
            .and_then(Value::as_str)
            .unwrap_or("N/A")
            .to_string();
        for scope in rule_scopes(rule) {
            report
                .duplicate_scopes
                .entry(scope)
                .or_default()
                .push((i, color.clone()));
        }
    }
    report.duplicate_scopes.retain(|_, entries| entries.len() > 1);

    // settings (canonical JSON) -> merged scopes
    let mut groups: IndexMap<String, (Value, Vec<String>)> = IndexMap::new();
    for rule in &rules {
        let settings = canonical(rule.get("settings").unwrap_or(&json!({})));
        let key = settings.to_string();
        let (_, scopes) = groups.entry(key).or_insert_with(|| (settings, Vec::new()));
        for scope in rule_scopes(rule) {
            if !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }
    }

    let mut merged: Vec<Value> = groups
        .into_values()
        .map(|(settings, scopes)| json!({ "scope": scopes, "settings": settings }))
        .collect();
    merged.sort_by_key(|rule| priority(rule, color_order));

    for rule in &merged {
        let slot = match priority(rule, color_order) {
            Priority::Example(_) => 0,
            Priority::Malterlib => 1,
            Priority::Other => 2,
        };
        report.by_priority[slot] += 1;
    }
    report.deduplicated = merged.len();

    if let Value::Object(map) = theme {
        map.insert("tokenColors".into(), Value::Array(merged));
    }
    report
}
