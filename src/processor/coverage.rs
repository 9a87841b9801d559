//! Check that every keyword is matched by some grammar pattern, and by the
//! pattern carrying the expected scope.

use indexmap::IndexMap;
use regex::Regex;
use tracing::warn;

use crate::model::{ClassificationMap, Grammar, KeywordMap};

/// How many entries per group the report prints.
const SAMPLE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeMismatch {
    pub keyword: String,
    pub classification: String,
    pub got: String,
    pub expected: String,
}

#[derive(Debug, Default)]
pub struct CoverageReport {
    pub total: usize,
    pub matched: usize,
    /// classification -> keywords no pattern matched
    pub unmatched: IndexMap<String, Vec<String>>,
    pub mismatches: Vec<ScopeMismatch>,
    /// Patterns that failed to compile, with the error.
    pub invalid_patterns: Vec<(String, String)>,
}

impl CoverageReport {
    pub fn unmatched_count(&self) -> usize {
        self.total - self.matched
    }

    pub fn is_clean(&self) -> bool {
        self.unmatched.is_empty() && self.mismatches.is_empty()
    }

    pub fn print(&self) {
        for (pattern, err) in &self.invalid_patterns {
            println!("Failed to compile pattern '{pattern}': {err}");
        }
        println!("Total keywords: {}", self.total);
        println!("Matched keywords: {}", self.matched);
        println!("Unmatched keywords: {}\n", self.unmatched_count());

        for (classification, words) in &self.unmatched {
            println!("{classification} ({}):", words.len());
            let sample: Vec<&str> = words.iter().take(SAMPLE).map(String::as_str).collect();
            let more = if words.len() > SAMPLE { " ..." } else { "" };
            println!("  {}{more}\n", sample.join(", "));
        }

        if !self.mismatches.is_empty() {
            println!("\nScope mismatches:");
            for m in self.mismatches.iter().take(SAMPLE) {
                println!("  {}: expected {}, got {}", m.keyword, m.expected, m.got);
            }
        }
    }
}

/// Compile each grammar pattern anchored to the whole identifier.
fn compile_patterns(grammar: &Grammar, report: &mut CoverageReport) -> Vec<(Regex, Option<String>)> {
    let mut compiled = Vec::new();
    for pattern in &grammar.patterns {
        let Some(source) = &pattern.regex else {
            continue;
        };
        match Regex::new(&format!("^{source}$")) {
            Ok(re) => compiled.push((re, pattern.scope().map(str::to_string))),
            Err(e) => {
                warn!(pattern = %source, "grammar pattern does not compile");
                report.invalid_patterns.push((source.clone(), e.to_string()));
            }
        }
    }
    compiled
}

pub fn check_coverage(
    keywords: &KeywordMap,
    grammar: &Grammar,
    classifications: &ClassificationMap,
) -> CoverageReport {
    let mut report = CoverageReport {
        total: keywords.len(),
        ..Default::default()
    };
    let patterns = compile_patterns(grammar, &mut report);

    for (keyword, entry) in keywords {
        if keyword.is_empty() {
            continue;
        }

        // the first matching pattern decides; one without a scope is a miss
        let hit = patterns.iter().find(|(re, _)| re.is_match(keyword));
        let Some((_, Some(got))) = hit else {
            report
                .unmatched
                .entry(entry.classification.clone())
                .or_default()
                .push(keyword.clone());
            continue;
        };
        report.matched += 1;

        let Some(expected) = classifications.get(&entry.classification) else {
            continue;
        };
        if got != expected {
            report.mismatches.push(ScopeMismatch {
                keyword: keyword.clone(),
                classification: entry.classification.clone(),
                got: got.clone(),
                expected: expected.clone(),
            });
        }
    }

    report
}
