//! The highlighter: scan, reconstruct, render
//!
//! A [`Highlighter`] owns a grammar and, optionally, a token taxonomy.
//! Every call scans the whole input with a fresh capture context, so
//! calls never see each other's captures.

use super::grammar::Grammar;
use super::lines::HighlightedDocument;
use super::peg::Peg;
use super::reconstruct::reconstruct;
use super::render::{render_html, terminal_fragments};
use super::scan::{scan, DiagnosticSink, TracingSink};
use super::style::{Fragment, StyleTag};
use super::tokens::Taxonomy;
use crate::error::Result;

/// Grammar-driven syntax highlighter
pub struct Highlighter<G = Peg> {
    grammar: G,
    taxonomy: Option<Box<dyn Taxonomy>>,
    default_style: StyleTag,
}

impl<G: Grammar> Highlighter<G> {
    /// Highlighter for a grammar styled with free-form style strings
    pub fn new(grammar: G) -> Self {
        Self {
            grammar,
            taxonomy: None,
            default_style: StyleTag::plain(),
        }
    }

    /// Highlighter for a grammar styled with taxonomy tokens
    ///
    /// Unstyled text gets the taxonomy's text token.
    pub fn with_taxonomy(grammar: G, taxonomy: impl Taxonomy + 'static) -> Self {
        let default_style = StyleTag::Token(taxonomy.text_token());
        Self {
            grammar,
            taxonomy: Some(Box::new(taxonomy)),
            default_style,
        }
    }

    /// Builder: set the style for text no rule captured
    pub fn with_default_style(mut self, style: impl Into<StyleTag>) -> Self {
        self.default_style = style.into();
        self
    }

    /// The grammar being scanned
    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    /// The taxonomy, if highlighting with tokens
    pub fn taxonomy(&self) -> Option<&dyn Taxonomy> {
        self.taxonomy.as_deref()
    }

    /// Style for text no rule captured
    pub fn default_style(&self) -> &StyleTag {
        &self.default_style
    }

    /// Styled fragments exactly as captured, before any output adapter
    pub fn fragments(&self, text: &str, sink: &mut dyn DiagnosticSink) -> Result<Vec<Fragment>> {
        let report = scan(&self.grammar, text, sink)?;
        Ok(reconstruct(text, &report.captures, &self.default_style))
    }

    /// Highlight text for terminal display
    ///
    /// Grammar faults are logged through `tracing`. Panics in grammar code
    /// are recovered from, but still pass through the process panic hook
    /// (see [`scan`]).
    pub fn highlight(&self, text: &str) -> Result<Vec<Fragment>> {
        self.highlight_with(text, &mut TracingSink)
    }

    /// Highlight text for terminal display, reporting faults to `sink`
    pub fn highlight_with(
        &self,
        text: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<Fragment>> {
        let fragments = self.fragments(text, sink)?;
        Ok(terminal_fragments(fragments, self.taxonomy()))
    }

    /// Highlight raw bytes, which must be UTF-8 text
    pub fn highlight_bytes(&self, bytes: &[u8]) -> Result<Vec<Fragment>> {
        let text = std::str::from_utf8(bytes)?;
        self.highlight(text)
    }

    /// Highlight text as HTML
    pub fn highlight_html(&self, text: &str) -> Result<String> {
        self.highlight_html_with(text, &mut TracingSink)
    }

    /// Highlight text as HTML, reporting faults to `sink`
    pub fn highlight_html_with(&self, text: &str, sink: &mut dyn DiagnosticSink) -> Result<String> {
        let fragments = self.fragments(text, sink)?;
        Ok(render_html(&fragments, self.taxonomy()))
    }

    /// Highlight a document for line-by-line display
    pub fn lex_document(&self, text: &str) -> Result<HighlightedDocument> {
        let fragments = self.highlight(text)?;
        Ok(HighlightedDocument::new(&fragments))
    }
}
