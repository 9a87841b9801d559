//! Component 4 – writers. Each one serialises a processed value to disk.
pub mod clangd;
pub mod json;

use std::fs;
use std::io;
use std::path::Path;

/// Write `text`, creating missing parent directories.
pub fn write_text(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)
}
