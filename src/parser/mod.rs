//! Readers for the C++ highlighter sources and the JSON tables.
pub mod classifications;
pub mod keywords;
pub mod prefix_map;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Read a C++ file, replacing invalid UTF-8 rather than failing on it.
pub fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(anyhow!("{} not found", path.display()));
    }
    let bytes = fs::read(path).with_context(|| format!("Reading {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "source loaded");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Strict JSON, as written by this tool.
pub fn load_from_json<T: DeserializeOwned>(json: &str) -> serde_json::Result<T> {
    serde_json::from_str(json)
}

/// Hand-edited JSON: `//` and `/* */` comments and trailing commas allowed.
pub fn load_from_json_lenient<T: DeserializeOwned>(json: &str) -> serde_json_lenient::Result<T> {
    let mut deserializer = serde_json_lenient::Deserializer::from_str(json);
    T::deserialize(&mut deserializer)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    load_from_json(&json).with_context(|| format!("Parsing {}", path.display()))
}

pub fn read_json_lenient<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    load_from_json_lenient(&json).with_context(|| format!("Parsing {}", path.display()))
}

/// Like [`read_json`], but a missing file yields the default value.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if path.exists() {
        read_json(path)
    } else {
        debug!(path = %path.display(), "missing, using empty table");
        Ok(T::default())
    }
}
