//! Pretty-printed JSON artifacts.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;

/// Tables, grammar, settings.
pub const INDENT: &[u8] = b"  ";
/// Theme files.
pub const THEME_INDENT: &[u8] = b"    ";

pub fn to_string<T: Serialize + ?Sized>(value: &T, indent: &[u8]) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only produces UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn emit<T: Serialize + ?Sized>(value: &T, path: &Path) -> io::Result<()> {
    super::write_text(path, &to_string(value, INDENT)?)
}

pub fn emit_theme<T: Serialize + ?Sized>(value: &T, path: &Path) -> io::Result<()> {
    super::write_text(path, &to_string(value, THEME_INDENT)?)
}
