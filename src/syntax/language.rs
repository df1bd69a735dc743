//! Language definitions for syntax highlighting
//!
//! A [`LanguageDefinition`] is a flat list of token rules tried in
//! priority order at every scan position. Definitions are written in
//! Rust (see `builtin`) or loaded from TOML:
//!
//! ```toml
//! name = "INI"
//! extensions = ["ini"]
//! ignore = []
//!
//! [[rules]]
//! name = "section"
//! pattern = '\[[^\]\n]*\]'
//! token = "Keyword"
//! priority = 90
//!
//! [[rules]]
//! name = "key"
//! pattern = '[\w.]+'
//! followed_by = '='
//! style = "class:key"
//! priority = 80
//! ```

use std::cmp::Reverse;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::highlighter::Highlighter;
use super::peg::Peg;
use super::rules::Rule;
use super::style::StyleTag;
use super::tokens::TokenTree;
use crate::error::{HighlightError, Result};

fn default_true() -> bool {
    true
}

/// One token rule of a language
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDefinition {
    /// Name for debugging and error messages
    pub name: String,
    /// Regex to match (exclusive with `literal`)
    #[serde(default)]
    pub pattern: Option<String>,
    /// Exact text to match (exclusive with `pattern`)
    #[serde(default)]
    pub literal: Option<String>,
    /// Regex that must follow the match without being part of it
    #[serde(default)]
    pub followed_by: Option<String>,
    /// Free-form style (exclusive with `token`)
    #[serde(default)]
    pub style: Option<String>,
    /// Taxonomy path such as `Keyword.Constant` (exclusive with `style`)
    #[serde(default)]
    pub token: Option<String>,
    /// Higher priority rules are tried first
    #[serde(default)]
    pub priority: i32,
}

impl RuleDefinition {
    /// Regex rule with a free-form style
    pub fn styled(name: &str, pattern: &str, style: &str, priority: i32) -> Self {
        Self {
            name: name.to_string(),
            pattern: Some(pattern.to_string()),
            literal: None,
            followed_by: None,
            style: Some(style.to_string()),
            token: None,
            priority,
        }
    }

    /// Regex rule tagged with a taxonomy token
    pub fn token(name: &str, pattern: &str, token: &str, priority: i32) -> Self {
        Self {
            name: name.to_string(),
            pattern: Some(pattern.to_string()),
            literal: None,
            followed_by: None,
            style: None,
            token: Some(token.to_string()),
            priority,
        }
    }

    /// Builder: require `pattern` to follow the match
    pub fn followed_by(mut self, pattern: &str) -> Self {
        self.followed_by = Some(pattern.to_string());
        self
    }

    fn compile(&self, taxonomy: Option<&TokenTree>) -> Result<Rule> {
        let terminal = match (&self.pattern, &self.literal) {
            (Some(pattern), None) => Rule::pattern(pattern)?,
            (None, Some(literal)) => Rule::literal(literal),
            _ => {
                return Err(HighlightError::Definition(format!(
                    "rule `{}` needs exactly one of `pattern` or `literal`",
                    self.name
                )))
            }
        };

        let style = match (&self.style, &self.token) {
            (Some(style), None) => Some(StyleTag::from(style.as_str())),
            (None, Some(path)) => {
                let token = taxonomy.and_then(|tree| tree.lookup(path)).ok_or_else(|| {
                    HighlightError::Definition(format!(
                        "rule `{}` uses unknown token `{}`",
                        self.name, path
                    ))
                })?;
                Some(StyleTag::Token(token))
            }
            (None, None) => None,
            (Some(_), Some(_)) => {
                return Err(HighlightError::Definition(format!(
                    "rule `{}` sets both `style` and `token`",
                    self.name
                )))
            }
        };

        let rule = match style {
            Some(style) => terminal.styled(style),
            None => terminal,
        };
        match &self.followed_by {
            Some(pattern) => {
                let lookahead = Rule::not(Rule::not(Rule::pattern(pattern)?));
                Ok(Rule::seq(vec![rule, lookahead]))
            }
            None => Ok(rule),
        }
    }
}

/// A complete language definition for syntax highlighting
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageDefinition {
    /// Language name (e.g., "Rust", "Python")
    pub name: String,
    /// File extensions (e.g., ["rs"], ["py", "pyw"])
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Whether whitespace between tokens is skipped
    #[serde(default = "default_true")]
    pub skip_whitespace: bool,
    /// Patterns skipped like whitespace and never styled
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Token rules
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

impl LanguageDefinition {
    /// Create a new empty language definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            skip_whitespace: true,
            ignore: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Parse a definition from TOML
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a definition from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Add a token rule
    pub fn add_rule(&mut self, rule: RuleDefinition) {
        self.rules.push(rule);
    }

    /// Whether any rule is tagged with a taxonomy token
    pub fn uses_tokens(&self) -> bool {
        self.rules.iter().any(|rule| rule.token.is_some())
    }

    /// Compile the rules into a grammar
    ///
    /// Rules are tried by descending priority; equal priorities keep
    /// their definition order. `taxonomy` resolves `token` rules.
    pub fn compile(&self, taxonomy: Option<&TokenTree>) -> Result<Peg> {
        let mut ordered: Vec<&RuleDefinition> = self.rules.iter().collect();
        ordered.sort_by_key(|rule| Reverse(rule.priority));

        let alternatives = ordered
            .into_iter()
            .map(|rule| rule.compile(taxonomy))
            .collect::<Result<Vec<_>>>()?;

        let mut builder = Peg::builder()
            .start(Rule::choice(alternatives))
            .skip_whitespace(self.skip_whitespace);
        for pattern in &self.ignore {
            builder = builder.ignore(Rule::pattern(pattern)?);
        }
        builder.build()
    }

    /// Build a highlighter for this language
    ///
    /// Token rules resolve against the standard taxonomy, which then
    /// also drives HTML classes.
    pub fn highlighter(&self) -> Result<Highlighter> {
        if self.uses_tokens() {
            let tree = TokenTree::standard();
            let grammar = self.compile(Some(&tree))?;
            Ok(Highlighter::with_taxonomy(grammar, tree))
        } else {
            Ok(Highlighter::new(self.compile(None)?))
        }
    }
}
