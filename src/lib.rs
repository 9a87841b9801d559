pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

pub use error::{Error, Result};

use cli::{Cli, Command};

pub fn run(args: &Cli) -> anyhow::Result<()> {
    let paths = args.paths();
    tracing::debug!(root = %paths.root.display(), source = %paths.source.display(), "resolved paths");

    match args.command.clone().unwrap_or(Command::UpdateAll) {
        Command::UpdateAll => {
            commands::update_all(&paths)?;
        }
        Command::PrefixMap => {
            commands::prefix_map(&paths)?;
        }
        Command::Classifications => {
            commands::classifications(&paths)?;
        }
        Command::Keywords => {
            commands::keywords(&paths)?;
        }
        Command::Grammar => {
            commands::grammar(&paths)?;
        }
        Command::Coverage => {
            commands::coverage(&paths)?;
        }
        Command::Combine => {
            commands::combine(&paths)?;
        }
        Command::Clangd => {
            commands::clangd(&paths)?;
        }
        Command::Settings => {
            commands::settings(&paths)?;
        }
        Command::SemanticColors => {
            commands::semantic_colors(&paths)?;
        }
        Command::SrgbTheme => {
            commands::srgb_theme(&paths)?;
        }
        Command::NoTokensTheme => {
            commands::no_tokens_theme(&paths)?;
        }
        Command::Dedupe => {
            commands::dedupe(&paths)?;
        }
        Command::CompareScopes => {
            commands::compare_scopes(&paths)?;
        }
        Command::Readme => {
            commands::readme(&paths)?;
        }
        Command::Tokens { file, json } => {
            commands::tokens(&paths, &file, json)?;
        }
    }

    Ok(())
}
