//! Locations of every input and generated artifact.

use std::path::{Path, PathBuf};

/// Resolves artifact paths from the extension root and the highlighter
/// source directory.
#[derive(Debug, Clone)]
pub struct Paths {
    pub root: PathBuf,
    pub source: PathBuf,
}

impl Paths {
    /// `source` defaults to `<root>/../Highlighterr/HighlighterrCxx`.
    pub fn new(root: impl Into<PathBuf>, source: Option<PathBuf>) -> Self {
        let root = root.into();
        let source = source.unwrap_or_else(|| {
            root.join("..")
                .join("Highlighterr")
                .join("HighlighterrCxx")
        });
        Self { root, source }
    }

    pub fn cpp_source(&self) -> PathBuf {
        self.source.join("HighlighterrCxx.cpp")
    }

    pub fn cpp_header(&self) -> PathBuf {
        self.source.join("HighlighterrCxx.h")
    }

    pub fn prefix_map(&self) -> PathBuf {
        self.root.join("prefixmap.json")
    }

    pub fn keywords(&self) -> PathBuf {
        self.root.join("keywords.json")
    }

    pub fn classifications(&self) -> PathBuf {
        self.root.join("classifications.json")
    }

    pub fn scopes(&self) -> PathBuf {
        self.root.join("scopes.json")
    }

    pub fn grammar(&self) -> PathBuf {
        self.root.join("syntaxes").join("malterlib.tmLanguage.json")
    }

    pub fn theme(&self) -> PathBuf {
        self.root.join("themes").join("malterlib.json")
    }

    pub fn theme_srgb(&self) -> PathBuf {
        self.root.join("themes").join("malterlibSRGB.json")
    }

    pub fn theme_no_tokens(&self) -> PathBuf {
        self.root.join("themes").join("malterlibNoTokens.json")
    }

    pub fn dark_modern(&self) -> PathBuf {
        self.root.join("darkModern.json")
    }

    pub fn color_examples(&self) -> PathBuf {
        self.root.join("colorexamples.json")
    }

    pub fn settings_template(&self) -> PathBuf {
        self.root.join("settingsTemplate.json")
    }

    pub fn settings(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    pub fn settings_srgb(&self) -> PathBuf {
        self.root.join("settingsSRGB.json")
    }

    pub fn clangd(&self) -> PathBuf {
        self.root.join(".clangd")
    }

    pub fn clangd_template(&self) -> PathBuf {
        self.root.join(".clangd-template")
    }

    pub fn semantic_scopes(&self) -> PathBuf {
        self.root.join("semanticScopesForPackage.json")
    }

    pub fn package_json(&self) -> PathBuf {
        self.root.join("package.json")
    }

    pub fn readme_template(&self) -> PathBuf {
        self.root.join("README-template.md")
    }

    pub fn readme(&self) -> PathBuf {
        self.root.join("README.md")
    }

    /// Path shown in log lines: relative to the root when possible.
    pub fn display<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
        path.strip_prefix(&self.root).unwrap_or(path).display()
    }
}
