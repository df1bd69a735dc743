//! Built-in language definitions
//!
//! This module provides syntax highlighting definitions for
//! common languages, tagged with tokens of the standard taxonomy.

mod python;
mod rust;
mod toml_lang;

use super::language::LanguageDefinition;

/// Get all built-in language definitions
pub fn all_languages() -> Vec<LanguageDefinition> {
    vec![
        rust::rust_language(),
        python::python_language(),
        toml_lang::toml_language(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_compile() {
        for lang in all_languages() {
            assert!(lang.highlighter().is_ok(), "{} failed to compile", lang.name);
        }
    }
}
