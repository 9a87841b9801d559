//! One function per subcommand: load inputs, run the processor, write the
//! artifact.

use std::fs;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Paths;
use crate::model::{ClassificationMap, ColorExample, Grammar, KeywordMap, PrefixMap, Scopes};
use crate::parser::{self, classifications, keywords, prefix_map};
use crate::processor::settings::SettingsPair;
use crate::processor::tokens::Tokenizer;
use crate::processor::{Classifier, clangd, combine, compare, coverage, grammar, readme, settings, theme};
use crate::writer;

pub fn prefix_map(paths: &Paths) -> Result<PrefixMap> {
    let path = paths.cpp_source();
    let source = parser::read_source(&path)?;
    let map = prefix_map::parse_prefix_map(&source);

    let out = paths.prefix_map();
    writer::json::emit(&map, &out).with_context(|| format!("Writing {}", out.display()))?;
    info!(prefixes = map.len(), "wrote {}", paths.display(&out));
    Ok(map)
}

pub fn classifications(paths: &Paths) -> Result<ClassificationMap> {
    let path = paths.cpp_header();
    let header = parser::read_source(&path)?;
    let map = classifications::parse_classifications(&header)
        .with_context(|| format!("Parsing {}", path.display()))?;

    let out = paths.classifications();
    writer::json::emit(&map, &out).with_context(|| format!("Writing {}", out.display()))?;
    info!(classifications = map.len(), "wrote {}", paths.display(&out));
    Ok(map)
}

pub fn keywords(paths: &Paths) -> Result<KeywordMap> {
    let path = paths.cpp_source();
    let source = parser::read_source(&path)?;
    let map = keywords::parse_keywords(&source);
    let examples = map.values().filter(|e| e.example).count();

    let out = paths.keywords();
    writer::json::emit(&map, &out).with_context(|| format!("Writing {}", out.display()))?;
    info!(keywords = map.len(), examples, "wrote {}", paths.display(&out));
    Ok(map)
}

pub fn combine(paths: &Paths) -> Result<Scopes> {
    let keywords: KeywordMap = parser::read_json_or_default(&paths.keywords())?;
    let prefixes: PrefixMap = parser::read_json_or_default(&paths.prefix_map())?;
    let classifications: ClassificationMap = parser::read_json_or_default(&paths.classifications())?;

    let scopes = combine::combine(&keywords, &prefixes, &classifications);

    let out = paths.scopes();
    writer::json::emit(&scopes, &out).with_context(|| format!("Writing {}", out.display()))?;
    info!(
        keywords = scopes.keywords.len(),
        prefixes = scopes.prefixes.len(),
        scopes = scopes.scopes.len(),
        "wrote {}",
        paths.display(&out)
    );
    Ok(scopes)
}

pub fn grammar(paths: &Paths) -> Result<Grammar> {
    let prefixes: PrefixMap = parser::read_json(&paths.prefix_map())?;
    let keywords: KeywordMap = parser::read_json(&paths.keywords())?;

    let grammar = grammar::generate_grammar(&prefixes, &keywords);

    let out = paths.grammar();
    writer::json::emit(&grammar, &out).with_context(|| format!("Writing {}", out.display()))?;
    info!(patterns = grammar.patterns.len(), "wrote {}", paths.display(&out));
    Ok(grammar)
}

pub fn coverage(paths: &Paths) -> Result<coverage::CoverageReport> {
    let keywords: KeywordMap = parser::read_json(&paths.keywords())?;
    let grammar: Grammar = parser::read_json(&paths.grammar())?;
    let classifications: ClassificationMap = parser::read_json_or_default(&paths.classifications())?;

    let report = coverage::check_coverage(&keywords, &grammar, &classifications);
    report.print();
    if !report.is_clean() {
        warn!(
            unmatched = report.unmatched_count(),
            mismatches = report.mismatches.len(),
            "grammar does not cover every keyword"
        );
    }
    Ok(report)
}

pub fn clangd(paths: &Paths) -> Result<Vec<clangd::Rule>> {
    let scopes: Scopes = parser::read_json(&paths.scopes())?;
    let rules = clangd::build_rules(&scopes).with_context(|| "Building clangd rules")?;

    let template_path = paths.clangd_template();
    let template = if template_path.exists() {
        let text = fs::read_to_string(&template_path)
            .with_context(|| format!("Reading {}", template_path.display()))?;
        Some(text)
    } else {
        debug!("no {}, writing plain rules", paths.display(&template_path));
        None
    };

    let out = paths.clangd();
    writer::clangd::emit(&rules, template.as_deref(), &out)
        .with_context(|| format!("Writing {}", out.display()))?;
    info!(
        rules = rules.len(),
        templated = template.is_some(),
        "wrote {}",
        paths.display(&out)
    );

    let out = paths.semantic_scopes();
    writer::json::emit(&clangd::semantic_scopes(&rules), &out)
        .with_context(|| format!("Writing {}", out.display()))?;
    info!("wrote {}", paths.display(&out));
    Ok(rules)
}

fn write_settings(paths: &Paths, pair: &SettingsPair) -> Result<()> {
    for (value, out) in [
        (&pair.display_p3, paths.settings()),
        (&pair.srgb, paths.settings_srgb()),
    ] {
        writer::json::emit(value, &out).with_context(|| format!("Writing {}", out.display()))?;
        info!("wrote {}", paths.display(&out));
    }
    Ok(())
}

pub fn settings(paths: &Paths) -> Result<()> {
    let theme_path = paths.theme();
    let theme: Value = parser::read_json_lenient(&theme_path)?;
    let template: Value = parser::read_json_lenient(&paths.settings_template())?;

    let pair = settings::settings_from_theme(&theme, &template, &theme_path)
        .with_context(|| "Building settings from theme")?;
    write_settings(paths, &pair)
}

pub fn semantic_colors(paths: &Paths) -> Result<()> {
    let scopes: Scopes = parser::read_json(&paths.scopes())?;
    let examples: Vec<ColorExample> = parser::read_json_lenient(&paths.color_examples())?;
    let template: Value = parser::read_json_lenient(&paths.settings_template())?;

    let classifier = Classifier::new(&scopes);
    let colors = settings::semantic_colors(&examples, &classifier);

    let covered: Vec<&str> = colors.covered().collect();
    let uncovered: Vec<&String> = scopes
        .scopes
        .iter()
        .filter(|s| !covered.contains(&s.as_str()))
        .collect();
    println!("Scopes with a colour: {}", colors.rules.len());
    if !uncovered.is_empty() {
        println!("\nScopes without examples ({}):", uncovered.len());
        for scope in &uncovered {
            println!("  {scope}");
        }
    }
    if !colors.conflicting.is_empty() {
        println!("\nScopes with conflicting colours (discarded):");
        for (scope, set) in &colors.conflicting {
            println!("  {scope}:");
            for color in set {
                let examples = colors
                    .examples
                    .get(&(scope.clone(), color.clone()))
                    .map(|e| e.join(", "))
                    .unwrap_or_default();
                println!("    {color}: {examples}");
            }
        }
    }

    let pair = settings::settings_from_semantic_colors(&colors, &template)
        .with_context(|| "Building semantic colour settings")?;
    write_settings(paths, &pair)
}

pub fn srgb_theme(paths: &Paths) -> Result<()> {
    let theme: Value = parser::read_json_lenient(&paths.theme())?;
    let (srgb, count) = theme::srgb_theme(&theme).with_context(|| "Converting theme colours")?;

    let out = paths.theme_srgb();
    writer::json::emit_theme(&srgb, &out).with_context(|| format!("Writing {}", out.display()))?;
    info!(colors = count, "wrote {}", paths.display(&out));
    Ok(())
}

/// `tokenColors` of the Dark Modern theme; problems only warn.
fn dark_modern_token_colors(paths: &Paths) -> Vec<Value> {
    let path = paths.dark_modern();
    match parser::read_json_lenient::<Value>(&path) {
        Ok(theme) => {
            let colors = theme
                .get("tokenColors")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            if colors.is_empty() {
                warn!("{} has no tokenColors", paths.display(&path));
            }
            colors
        }
        Err(e) => {
            warn!("could not load {}: {e:#}", paths.display(&path));
            Vec::new()
        }
    }
}

pub fn no_tokens_theme(paths: &Paths) -> Result<()> {
    let theme: Value = parser::read_json_lenient(&paths.theme())?;
    let token_colors = dark_modern_token_colors(paths);
    let count = token_colors.len();

    let out = paths.theme_no_tokens();
    writer::json::emit_theme(&theme::no_tokens_theme(&theme, token_colors), &out)
        .with_context(|| format!("Writing {}", out.display()))?;
    info!(token_colors = count, "wrote {}", paths.display(&out));
    Ok(())
}

pub fn dedupe(paths: &Paths) -> Result<theme::DedupeReport> {
    let theme_path = paths.theme();
    let mut theme: Value = parser::read_json_lenient(&theme_path)?;
    let examples: Vec<ColorExample> = if paths.color_examples().exists() {
        parser::read_json_lenient(&paths.color_examples())?
    } else {
        warn!("{} not found, ordering without it", paths.display(&paths.color_examples()));
        Vec::new()
    };
    let order = theme::color_order(&examples);

    let report = theme::dedupe_token_colors(&mut theme, &order);
    writer::json::emit_theme(&theme, &theme_path)
        .with_context(|| format!("Writing {}", theme_path.display()))?;
    report.print(&theme, &order);
    info!(
        before = report.original,
        after = report.deduplicated,
        "rewrote {}",
        paths.display(&theme_path)
    );
    Ok(report)
}

pub fn compare_scopes(paths: &Paths) -> Result<compare::ScopeComparison> {
    let theme: Value = parser::read_json_lenient(&paths.theme())?;
    let package: Value = parser::read_json(&paths.package_json())?;

    let cmp = compare::compare_scopes(&theme, &package);
    cmp.print();
    Ok(cmp)
}

pub fn readme(paths: &Paths) -> Result<()> {
    let template_path = paths.readme_template();
    let template = fs::read_to_string(&template_path)
        .with_context(|| format!("Reading {}", template_path.display()))?;
    let settings: Value = parser::read_json(&paths.settings())?;
    let settings_srgb: Value = parser::read_json(&paths.settings_srgb())?;

    let clangd_path = paths.clangd();
    let clangd = if clangd_path.exists() {
        fs::read_to_string(&clangd_path).with_context(|| format!("Reading {}", clangd_path.display()))?
    } else {
        warn!("{} not found, leaving its section empty", paths.display(&clangd_path));
        String::new()
    };

    let text = readme::render_readme(
        &template,
        &readme::settings_body(&settings)?,
        &readme::settings_body(&settings_srgb)?,
        &clangd,
    );
    let out = paths.readme();
    writer::write_text(&out, &text).with_context(|| format!("Writing {}", out.display()))?;
    info!("wrote {}", paths.display(&out));
    Ok(())
}

pub fn tokens(paths: &Paths, file: &std::path::Path, json: bool) -> Result<()> {
    let scopes: Scopes = parser::read_json(&paths.scopes())?;
    let text = parser::read_source(file)?;

    let tokens = Tokenizer::new(&scopes).tokenize(&text);
    debug!(tokens = tokens.len(), file = %file.display(), "tokenized");
    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for t in &tokens {
            println!("{}:{} {} {}", t.line + 1, t.column + 1, text_at(&text, t), t.scope);
        }
    }
    Ok(())
}

/// Source text of a token, for the plain listing.
fn text_at<'a>(text: &'a str, token: &crate::processor::tokens::Token) -> &'a str {
    let line = text.lines().nth(token.line).unwrap_or_default();
    let start = line
        .char_indices()
        .nth(token.column)
        .map_or(line.len(), |(i, _)| i);
    let end = line[start..]
        .char_indices()
        .nth(token.length)
        .map_or(line.len(), |(i, _)| start + i);
    &line[start..end]
}

/// Every generation step in dependency order.
pub fn update_all(paths: &Paths) -> Result<()> {
    // 1. ── Extract ─────────────────────────────────────────────────────
    prefix_map(paths).with_context(|| "Updating prefix map")?;
    classifications(paths).with_context(|| "Updating classifications")?;
    keywords(paths).with_context(|| "Updating keywords")?;

    // 2. ── Generate ────────────────────────────────────────────────────
    settings(paths).with_context(|| "Updating settings")?;
    combine(paths).with_context(|| "Combining scopes")?;
    grammar(paths).with_context(|| "Generating grammar")?;
    srgb_theme(paths).with_context(|| "Generating sRGB theme")?;
    no_tokens_theme(paths).with_context(|| "Generating no-tokens theme")?;
    clangd(paths).with_context(|| "Generating clangd config")?;
    readme(paths).with_context(|| "Updating README")?;

    // 3. ── Verify ──────────────────────────────────────────────────────
    coverage(paths).with_context(|| "Checking grammar coverage")?;

    info!("all artifacts updated");
    Ok(())
}
