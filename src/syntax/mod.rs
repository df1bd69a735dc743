//! Grammar-driven syntax highlighting
//!
//! A [`Grammar`] is scanned over the whole input; every styled match it
//! records becomes a [`Capture`]. The captures are merged with
//! default-styled filler into [`Fragment`]s that cover the input
//! exactly, which are then handed out for terminal display or rendered
//! as HTML.

mod builtin;
mod capture;
mod grammar;
mod highlighter;
mod language;
mod lines;
mod manager;
mod peg;
mod reconstruct;
mod render;
mod rules;
mod scan;
mod style;
mod tokens;

pub use builtin::all_languages;
pub use capture::{wrap, Capture, CaptureTable, Mark, ScanContext};
pub use grammar::{Grammar, GrammarFault, MatchOutcome};
pub use highlighter::Highlighter;
pub use language::{LanguageDefinition, RuleDefinition};
pub use lines::{split_lines, HighlightedDocument};
pub use manager::SyntaxManager;
pub use peg::{Peg, PegBuilder, MAX_DEPTH};
pub use reconstruct::reconstruct;
pub use render::{escape_html, html_classes, render_html, terminal_fragments};
pub use rules::{CustomFn, CustomRule, Pattern, Rule};
pub use scan::{scan, Diagnostic, DiagnosticSink, ScanReport, TracingSink};
pub use style::{Fragment, StyleTag};
pub use tokens::{css_class, Taxonomy, TokenId, TokenTree, ROOT_CLASS};
