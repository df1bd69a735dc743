//! Language registry
//!
//! The SyntaxManager maps file extensions to language definitions and
//! builds highlighters for them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::builtin;
use super::highlighter::Highlighter;
use super::language::LanguageDefinition;
use crate::error::Result;

/// Registry of language definitions
pub struct SyntaxManager {
    /// Language definitions by name
    languages: HashMap<String, LanguageDefinition>,
    /// Extension to language name mapping
    extension_map: HashMap<String, String>,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
}

impl SyntaxManager {
    /// Create a new syntax manager with built-in languages
    pub fn new() -> Self {
        let mut manager = Self::empty();

        // Load built-in languages
        for lang in builtin::all_languages() {
            manager.add_language(lang);
        }

        manager
    }

    /// Create a syntax manager without any languages
    pub fn empty() -> Self {
        Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
            enabled: true,
        }
    }

    /// Add a language definition, replacing one with the same name
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        let name = lang.name.clone();
        for ext in &lang.extensions {
            self.extension_map.insert(ext.to_lowercase(), name.clone());
        }
        self.languages.insert(name, lang);
    }

    /// Load a language definition from a TOML file and register it
    ///
    /// Returns the name of the loaded language.
    pub fn load_file(&mut self, path: &Path) -> Result<String> {
        let lang = LanguageDefinition::load(path)?;
        // Reject definitions that would fail later when highlighting
        lang.highlighter()?;
        let name = lang.name.clone();
        debug!(language = %name, path = %path.display(), "loaded language definition");
        self.add_language(lang);
        Ok(name)
    }

    /// Load every `*.toml` definition in a directory
    ///
    /// Returns the names of the loaded languages, sorted.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<String>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("toml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut names = Vec::with_capacity(paths.len());
        for path in paths {
            names.push(self.load_file(&path)?);
        }
        names.sort();
        Ok(names)
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// Get a language definition by name
    pub fn get_language(&self, name: &str) -> Option<&LanguageDefinition> {
        self.languages.get(name)
    }

    /// Build a highlighter for a language by name
    ///
    /// `Ok(None)` if the language is unknown or highlighting is disabled.
    pub fn highlighter(&self, name: &str) -> Result<Option<Highlighter>> {
        if !self.enabled {
            return Ok(None);
        }
        match self.languages.get(name) {
            Some(lang) => Ok(Some(lang.highlighter()?)),
            None => Ok(None),
        }
    }

    /// Build a highlighter for a file, detected by extension
    pub fn highlighter_for_path(&self, filename: &Path) -> Result<Option<Highlighter>> {
        match self.detect_language(filename) {
            Some(name) => self.highlighter(name),
            None => Ok(None),
        }
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

impl Default for SyntaxManager {
    fn default() -> Self {
        Self::new()
    }
}
