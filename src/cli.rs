use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Paths;

#[derive(Parser, Debug)]
#[command(name = "scopegen", author, version)]
#[command(about = "Generate grammar, clangd, theme and settings artifacts for the Malterlib highlighter")]
pub struct Cli {
    /// Extension root holding the generated artifacts
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// HighlighterrCxx source directory (defaults to <root>/../Highlighterr/HighlighterrCxx)
    #[arg(short, long, global = true)]
    pub source: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn paths(&self) -> Paths {
        Paths::new(&self.root, self.source.clone())
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Regenerate every artifact (the default)
    UpdateAll,
    /// Extract identifier prefixes from HighlighterrCxx.cpp
    PrefixMap,
    /// Extract the EClassification enum from HighlighterrCxx.h
    Classifications,
    /// Extract keywords and example identifiers from HighlighterrCxx.cpp
    Keywords,
    /// Write the TextMate injection grammar
    Grammar,
    /// Check that every keyword is matched by the grammar
    Coverage,
    /// Merge keywords, prefixes and classifications into scopes.json
    Combine,
    /// Write .clangd rules and the package.json semantic scopes
    Clangd,
    /// Write settings.json / settingsSRGB.json from the theme
    Settings,
    /// Write semantic colour rules from colorexamples.json into the settings
    SemanticColors,
    /// Write the sRGB variant of the theme
    SrgbTheme,
    /// Write the theme variant with Dark Modern token colours
    NoTokensTheme,
    /// Merge theme tokenColors with identical settings
    Dedupe,
    /// Report package.json scopes the theme does not colour
    CompareScopes,
    /// Fill README-template.md
    Readme,
    /// Print the semantic tokens of a C/C++ file
    Tokens {
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_update_all() {
        let cli = Cli::try_parse_from(["scopegen"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(!cli.verbose);
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["scopegen", "tokens", "a.cpp", "--json", "--root", "ext", "-v"])
            .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Tokens {
                file: "a.cpp".into(),
                json: true
            })
        );
        assert_eq!(cli.paths().source, PathBuf::from("ext/../Highlighterr/HighlighterrCxx"));
        assert!(cli.verbose);
    }

    #[test]
    fn kebab_case_subcommands() {
        for name in ["prefix-map", "semantic-colors", "srgb-theme", "no-tokens-theme", "compare-scopes"] {
            assert!(Cli::try_parse_from(["scopegen", name]).is_ok(), "{name}");
        }
    }
}
