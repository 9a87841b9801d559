//! Emit the `.clangd` YAML for the semantic-token rules.

use std::collections::{HashMap, VecDeque};
use std::fmt::Write as _;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::processor::clangd::Rule;

static SCOPE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\s*([A-Za-z0-9_.-]+)").expect("scope tag pattern"));

const REGEX_KEY: &str = "- regex:";
const ADD_KEY: &str = "add:";

/// Single-quoted YAML scalar.
fn quoted(regex: &str) -> String {
    format!("'{}'", regex.replace('\'', "''"))
}

fn unknown_section(out: &mut String, rules: &[Rule]) {
    out.push_str("    Unknown:\n");
    for rule in rules {
        let _ = writeln!(out, "      {REGEX_KEY} {}", quoted(&rule.regex));
        let _ = writeln!(
            out,
            "        {ADD_KEY} [{}]  # {}",
            rule.modifiers.join(", "),
            rule.textmate_scope()
        );
    }
}

/// Without a template, all rules go into a single `Unknown` section.
///
/// With one, every `- regex:` line whose following `add:` line carries a
/// `# scope` comment is replaced by the next rule for that scope; the tag may
/// be written with dots or hyphens. An `Unknown` section holding every rule
/// is always appended.
pub fn render(rules: &[Rule], template: Option<&str>) -> String {
    let mut out = String::new();

    let Some(template) = template else {
        out.push_str("SemanticTokens:\n  Rules:\n");
        unknown_section(&mut out, rules);
        return out;
    };

    let mut remaining: HashMap<&str, VecDeque<&Rule>> = HashMap::new();
    for rule in rules {
        remaining.entry(rule.scope.as_str()).or_default().push_back(rule);
    }

    let lines: Vec<&str> = template.lines().collect();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if let (Some(regex_at), Some(add_line)) = (line.find(REGEX_KEY), lines.get(i + 1)) {
            let tagged = line[..regex_at].trim().is_empty();
            let tag = SCOPE_TAG_RE
                .captures(add_line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str());
            let add_at = add_line.find(ADD_KEY);

            if let (true, Some(tag), Some(add_at)) = (tagged, tag, add_at) {
                let next = remaining
                    .get_mut(tag)
                    .and_then(VecDeque::pop_front)
                    .or_else(|| {
                        remaining
                            .get_mut(tag.replace('.', "-").as_str())
                            .and_then(VecDeque::pop_front)
                    });
                if let Some(rule) = next {
                    let _ = writeln!(out, "{}{REGEX_KEY} {}", &line[..regex_at], quoted(&rule.regex));
                    let _ = writeln!(
                        out,
                        "{}{ADD_KEY} [{}]  # {tag}",
                        &add_line[..add_at],
                        rule.modifiers.join(", ")
                    );
                    i += 2;
                    continue;
                }
            }
        }
        out.push_str(line);
        out.push('\n');
        i += 1;
    }

    unknown_section(&mut out, rules);
    out
}

pub fn emit(rules: &[Rule], template: Option<&str>, path: &Path) -> io::Result<()> {
    super::write_text(path, &render(rules, template))
}
