//! Style tags and styled fragments
//!
//! This module provides the data that flows out of the highlighter:
//! a style tag attached to each run of text.

use std::fmt;

use super::tokens::TokenId;

/// The style attached to a captured run of text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Free-form style string, space separated (`"class:int bold"`)
    Str(String),
    /// A node of a hierarchical token taxonomy
    Token(TokenId),
}

impl StyleTag {
    /// The free-form default style (no styling)
    pub fn plain() -> Self {
        StyleTag::Str(String::new())
    }

    /// Build a free-form `class:<name>` style
    pub fn class(name: &str) -> Self {
        StyleTag::Str(format!("class:{}", name))
    }

    /// Check if this is the empty free-form style
    pub fn is_plain(&self) -> bool {
        matches!(self, StyleTag::Str(s) if s.trim().is_empty())
    }

    /// Class names carried by a free-form style
    ///
    /// Only `class:<name>` tokens count; anything else in the string is ignored.
    /// Token tags carry no free-form classes.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        let style = match self {
            StyleTag::Str(s) => s.as_str(),
            StyleTag::Token(_) => "",
        };
        style
            .split_whitespace()
            .filter_map(|part| part.strip_prefix("class:"))
    }
}

impl Default for StyleTag {
    fn default() -> Self {
        Self::plain()
    }
}

impl From<&str> for StyleTag {
    fn from(style: &str) -> Self {
        StyleTag::Str(style.to_string())
    }
}

impl From<String> for StyleTag {
    fn from(style: String) -> Self {
        StyleTag::Str(style)
    }
}

impl From<TokenId> for StyleTag {
    fn from(token: TokenId) -> Self {
        StyleTag::Token(token)
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleTag::Str(s) => f.write_str(s),
            StyleTag::Token(id) => write!(f, "token#{}", id.index()),
        }
    }
}

/// A styled run of text in a highlighted document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Style for this run
    pub style: StyleTag,
    /// The text, copied verbatim from the input
    pub text: String,
}

impl Fragment {
    /// Create a new fragment
    pub fn new(style: impl Into<StyleTag>, text: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            text: text.into(),
        }
    }

    /// Get the length of this fragment in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if fragment is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
