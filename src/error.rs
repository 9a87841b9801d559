use std::path::PathBuf;

/// Failures raised by the parsing and processing stages.
///
/// Command-level code wraps these in `anyhow` with the file or step that
/// produced them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not locate `enum class EClassification` in the header")]
    MissingEnum,

    #[error("invalid hex colour: {0}")]
    InvalidColor(String),

    #[error("{scopes} scopes exceed encoding capacity of {max} modifiers")]
    TooManyScopes { scopes: usize, max: usize },

    #[error("{0} must contain a JSON object at the root")]
    NotAnObject(String),

    #[error("no `tokenColors` array found in {}", .0.display())]
    MissingTokenColors(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
