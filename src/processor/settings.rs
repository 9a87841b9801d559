//! Recommended `settings.json` snippets: a Display-P3 variant and an sRGB
//! fallback for displays without wide-gamut support.

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use crate::error::{Error, Result};
use crate::model::ColorExample;
use crate::processor::classifier::Classifier;
use crate::processor::color::displayp3_hex_to_srgb_hex;
use crate::processor::theme::convert_colors;

pub const TOKEN_COLOR_CUSTOMIZATIONS: &str = "editor.tokenColorCustomizations";
pub const SEMANTIC_TOKEN_COLOR_CUSTOMIZATIONS: &str = "editor.semanticTokenColorCustomizations";
pub const HIGHLIGHTING_COLOR_SPACE: &str = "workbench.highlightingColorSpace";

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPair {
    pub display_p3: Value,
    pub srgb: Value,
}

fn template_object(template: &Value) -> Result<&Map<String, Value>> {
    template
        .as_object()
        .ok_or_else(|| Error::NotAnObject("settingsTemplate.json".into()))
}

/// Template with its `foreground` colours converted to sRGB.
fn srgb_template(template: &Map<String, Value>) -> Result<Map<String, Value>> {
    let mut value = Value::Object(template.clone());
    convert_colors(&mut value, &["foreground"], &displayp3_hex_to_srgb_hex)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::NotAnObject("settingsTemplate.json".into())),
    }
}

/// Settings carrying the theme's `tokenColors` as textMate rules.
pub fn settings_from_theme(theme: &Value, template: &Value, theme_path: &Path) -> Result<SettingsPair> {
    let theme = theme
        .as_object()
        .ok_or_else(|| Error::NotAnObject(theme_path.display().to_string()))?;
    let rules = theme
        .get("tokenColors")
        .and_then(Value::as_array)
        .filter(|rules| !rules.is_empty())
        .ok_or_else(|| Error::MissingTokenColors(theme_path.to_path_buf()))?;
    let template = template_object(template)?;

    let mut srgb_rules = Value::Array(rules.clone());
    if let Value::Array(items) = &mut srgb_rules {
        for rule in items {
            if let Some(settings) = rule.get_mut("settings") {
                if let Some(Value::String(fg)) = settings.get_mut("foreground") {
                    if fg.starts_with('#') {
                        *fg = displayp3_hex_to_srgb_hex(fg)?;
                    }
                }
            }
        }
    }

    let mut display_p3 = template.clone();
    display_p3.insert(
        TOKEN_COLOR_CUSTOMIZATIONS.into(),
        json!({ "textMateRules": rules }),
    );

    let mut srgb = srgb_template(template)?;
    srgb.insert(HIGHLIGHTING_COLOR_SPACE.into(), json!("srgb"));
    srgb.insert(
        TOKEN_COLOR_CUSTOMIZATIONS.into(),
        json!({ "textMateRules": srgb_rules }),
    );

    Ok(SettingsPair {
        display_p3: Value::Object(display_p3),
        srgb: Value::Object(srgb),
    })
}

/// Outcome of classifying the colour examples.
#[derive(Debug, Default)]
pub struct SemanticColors {
    /// scope -> the single colour its examples use
    pub rules: IndexMap<String, String>,
    /// scope -> every colour its examples use, when more than one
    pub conflicting: IndexMap<String, BTreeSet<String>>,
    /// (scope, colour) -> examples
    pub examples: IndexMap<(String, String), Vec<String>>,
}

impl SemanticColors {
    pub fn covered(&self) -> impl Iterator<Item = &str> {
        self.rules
            .keys()
            .chain(self.conflicting.keys())
            .map(String::as_str)
    }
}

/// Classify each example identifier and keep scopes that map to exactly one
/// colour.
pub fn semantic_colors(examples: &[ColorExample], classifier: &Classifier) -> SemanticColors {
    let mut by_scope: IndexMap<String, BTreeSet<String>> = IndexMap::new();
    let mut out = SemanticColors::default();

    for entry in examples {
        for example in &entry.examples {
            let Some(scope) = classifier.classify(example) else {
                continue;
            };
            by_scope
                .entry(scope.to_string())
                .or_default()
                .insert(entry.color.clone());
            out.examples
                .entry((scope.to_string(), entry.color.clone()))
                .or_default()
                .push(example.clone());
        }
    }

    for (scope, colors) in by_scope {
        if colors.len() == 1 {
            if let Some(color) = colors.into_iter().next() {
                out.rules.insert(scope, color);
            }
        } else {
            out.conflicting.insert(scope, colors);
        }
    }
    out
}

/// Settings carrying `editor.semanticTokenColorCustomizations`.
pub fn settings_from_semantic_colors(colors: &SemanticColors, template: &Value) -> Result<SettingsPair> {
    let template = template_object(template)?;

    let mut srgb_rules = Map::new();
    for (scope, color) in &colors.rules {
        srgb_rules.insert(scope.clone(), json!(displayp3_hex_to_srgb_hex(color)?));
    }

    let mut display_p3 = template.clone();
    display_p3.insert(
        SEMANTIC_TOKEN_COLOR_CUSTOMIZATIONS.into(),
        json!({ "enabled": true, "rules": colors.rules }),
    );

    let mut srgb = srgb_template(template)?;
    srgb.insert(
        SEMANTIC_TOKEN_COLOR_CUSTOMIZATIONS.into(),
        json!({ "enabled": true, "rules": srgb_rules }),
    );

    Ok(SettingsPair {
        display_p3: Value::Object(display_p3),
        srgb: Value::Object(srgb),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PrefixScope, Scopes};
    use std::path::PathBuf;

    fn template() -> Value {
        json!({
            "editor.semanticHighlighting.enabled": true,
            "workbench.colorCustomizations": {
                "editor.selectionHighlight": { "foreground": "#ff0000" },
                "editorBracketHighlight.foreground1": "#00ff00"
            }
        })
    }

    #[test]
    fn textmate_rules_from_theme() {
        let theme = json!({
            "tokenColors": [
                { "scope": "malterlib.type", "settings": { "foreground": "#b05050", "fontStyle": "bold" } }
            ]
        });
        let pair = settings_from_theme(&theme, &template(), Path::new("theme.json")).unwrap();

        let rules = &pair.display_p3[TOKEN_COLOR_CUSTOMIZATIONS]["textMateRules"];
        assert_eq!(rules[0]["settings"]["foreground"], "#b05050");

        let srgb_rules = &pair.srgb[TOKEN_COLOR_CUSTOMIZATIONS]["textMateRules"];
        assert_eq!(srgb_rules[0]["settings"]["foreground"], "#be484d");
        assert_eq!(srgb_rules[0]["settings"]["fontStyle"], "bold");
        assert_eq!(pair.srgb[HIGHLIGHTING_COLOR_SPACE], "srgb");
        assert!(pair.display_p3.get(HIGHLIGHTING_COLOR_SPACE).is_none());

        // only `foreground` keys of the template are converted
        let colors = &pair.srgb["workbench.colorCustomizations"];
        assert_eq!(colors["editorBracketHighlight.foreground1"], "#00ff00");
    }

    #[test]
    fn missing_token_colors_is_an_error() {
        let err = settings_from_theme(&json!({ "tokenColors": [] }), &template(), Path::new("t.json"))
            .unwrap_err();
        assert!(matches!(err, Error::MissingTokenColors(p) if p == PathBuf::from("t.json")));
    }

    #[test]
    fn theme_must_be_an_object() {
        let err = settings_from_theme(&json!([]), &template(), Path::new("themes/malterlib.json"))
            .unwrap_err();
        assert!(matches!(err, Error::NotAnObject(p) if p == "themes/malterlib.json"));
    }

    #[test]
    fn template_must_be_an_object() {
        let theme = json!({ "tokenColors": [ { "scope": "x", "settings": {} } ] });
        assert!(matches!(
            settings_from_theme(&theme, &json!([1, 2]), Path::new("t.json")),
            Err(Error::NotAnObject(_))
        ));
    }

    #[test]
    fn semantic_colors_drop_conflicts() {
        let mut scopes = Scopes::default();
        for (p, scope) in [("C", "malterlib-type"), ("f", "malterlib-function")] {
            scopes.prefixes.insert(
                p.into(),
                PrefixScope {
                    scope: scope.into(),
                    variable: false,
                },
            );
        }
        let classifier = Classifier::new(&scopes);
        let examples = vec![
            ColorExample {
                color: "#ff0000".into(),
                examples: vec!["CString".into(), "fRun".into(), "unknown".into()],
            },
            ColorExample {
                color: "#00ff00".into(),
                examples: vec!["fStop".into()],
            },
        ];

        let colors = semantic_colors(&examples, &classifier);
        assert_eq!(colors.rules.len(), 1);
        assert_eq!(colors.rules["malterlib-type"], "#ff0000");
        assert_eq!(colors.conflicting["malterlib-function"].len(), 2);
        assert_eq!(
            colors.examples[&("malterlib-function".to_string(), "#00ff00".to_string())],
            vec!["fStop"]
        );

        let pair = settings_from_semantic_colors(&colors, &template()).unwrap();
        let rules = &pair.display_p3[SEMANTIC_TOKEN_COLOR_CUSTOMIZATIONS];
        assert_eq!(rules["enabled"], true);
        assert_eq!(rules["rules"]["malterlib-type"], "#ff0000");
        assert_eq!(
            pair.srgb["workbench.colorCustomizations"]["editor.selectionHighlight"]["foreground"],
            "#ff0000"
        );
    }
}
