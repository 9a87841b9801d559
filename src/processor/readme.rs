//! README generation: the template's placeholders are filled with the
//! recommended settings and `.clangd` configuration.

use serde_json::Value;

pub const SETTINGS_TAG: &str = "{RecommendedSettings}";
pub const SETTINGS_SRGB_TAG: &str = "{RecommendedSettingsSRGB}";
pub const CLANGD_TAG: &str = "{RecommendedClangD}";

/// Body of a pretty-printed settings object: only the lines nested inside
/// the outer braces, so it can be pasted into an existing `settings.json`.
pub fn settings_body(settings: &Value) -> serde_json::Result<String> {
    let pretty = serde_json::to_string_pretty(settings)?;
    Ok(pretty
        .lines()
        .filter(|line| line.starts_with("  "))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn render_readme(template: &str, settings: &str, settings_srgb: &str, clangd: &str) -> String {
    template
        .replace(SETTINGS_TAG, settings)
        .replace(SETTINGS_SRGB_TAG, settings_srgb)
        .replace(CLANGD_TAG, clangd.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn settings_body_drops_outer_braces() {
        let body = settings_body(&json!({ "a": 1, "b": { "c": true } })).unwrap();
        assert_eq!(body, "  \"a\": 1,\n  \"b\": {\n    \"c\": true\n  }");
    }

    #[test]
    fn fills_placeholders() {
        let template = "# Readme\n{RecommendedSettings}\n--\n{RecommendedSettingsSRGB}\n```\n{RecommendedClangD}\n```\n";
        let out = render_readme(template, "  p3", "  srgb", "\nSemanticTokens:\n\n");
        assert_eq!(out, "# Readme\n  p3\n--\n  srgb\n```\nSemanticTokens:\n```\n");
    }
}
