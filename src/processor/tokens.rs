//! Semantic tokens for a C/C++ file, the way the editor extension produces
//! them at runtime.
//!
//! Per line, comments, string/char literals and `#include <...>` targets are
//! excluded; every remaining identifier (`name`, `#name`, `[[`, `]]`) is
//! classified. Block comments carry over to the following lines.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::Scopes;
use crate::processor::classifier::Classifier;

static IDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[|\]\]|#[A-Za-z_][A-Za-z0-9_]*|[A-Za-z_][A-Za-z0-9_]*")
        .expect("identifier pattern")
});

static STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^\\"]|\\.)*"|'(?:[^\\']|\\.)*'"#).expect("string pattern")
});

static INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s*include\s*").expect("include pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Zero-based.
    pub line: usize,
    /// Zero-based, in characters.
    pub column: usize,
    /// In characters.
    pub length: usize,
    pub scope: String,
    /// Index of `scope` in the `scopes` list of `scopes.json`.
    pub token_type: usize,
}

pub struct Tokenizer {
    classifier: Classifier,
    legend: HashMap<String, usize>,
}

impl Tokenizer {
    pub fn new(scopes: &Scopes) -> Self {
        let legend = scopes
            .scopes
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        Self {
            classifier: Classifier::new(scopes),
            legend,
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut in_block_comment = false;

        for (line_no, line) in text.lines().enumerate() {
            let regions = excluded_regions(line, &mut in_block_comment);

            for m in IDENT_RE.find_iter(line) {
                let (start, end) = (m.start(), m.end());
                if regions.iter().any(|&(s, e)| start < e && end > s) {
                    continue;
                }
                let Some(scope) = self.classifier.classify(m.as_str()) else {
                    continue;
                };
                // scopes outside the legend cannot be encoded
                let Some(&token_type) = self.legend.get(scope) else {
                    continue;
                };
                tokens.push(Token {
                    line: line_no,
                    column: line[..start].chars().count(),
                    length: m.as_str().chars().count(),
                    scope: scope.to_string(),
                    token_type,
                });
            }
        }
        tokens
    }
}

/// Byte ranges of `line` that must not produce tokens.
fn excluded_regions(line: &str, in_block_comment: &mut bool) -> Vec<(usize, usize)> {
    let mut regions = Vec::new();

    let mut at = 0;
    while at < line.len() {
        if *in_block_comment {
            match line[at..].find("*/") {
                Some(off) => {
                    regions.push((at, at + off + 2));
                    at += off + 2;
                    *in_block_comment = false;
                }
                None => {
                    regions.push((at, line.len()));
                    break;
                }
            }
            continue;
        }

        let block = line[at..].find("/*").map(|off| at + off);
        let comment = line[at..].find("//").map(|off| at + off);
        match (block, comment) {
            (Some(start), c) if c.is_none_or(|c| start < c) => {
                match line[start + 2..].find("*/") {
                    Some(off) => {
                        let end = start + 2 + off + 2;
                        regions.push((start, end));
                        at = end;
                    }
                    None => {
                        regions.push((start, line.len()));
                        *in_block_comment = true;
                        break;
                    }
                }
            }
            (_, Some(start)) => {
                regions.push((start, line.len()));
                break;
            }
            _ => break,
        }
    }

    regions.extend(STRING_RE.find_iter(line).map(|m| (m.start(), m.end())));

    if let Some(include) = INCLUDE_RE.find(line) {
        let rest = include.end();
        if let Some(open) = line[rest..].find('<').map(|o| rest + o) {
            if let Some(close) = line[open + 1..].find('>').map(|o| open + 1 + o) {
                regions.push((open, close + 1));
            }
        }
    }

    regions.sort_unstable();
    regions
}
