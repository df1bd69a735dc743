//! grammar-highlight - grammar-driven syntax highlighting
//!
//! Highlights text by scanning it with a parsing grammar whose rules
//! mark the spans they match with a style. The result is a gapless list
//! of styled fragments, ready for terminal display or HTML.
//!
//! ```
//! use grammar_highlight::{Fragment, Highlighter, Peg, Rule};
//!
//! let int = Rule::pattern(r"\d+")?.styled("class:int");
//! let grammar = Peg::from_rule(Rule::delimited(int, Rule::literal(",")))?;
//! let highlighter = Highlighter::new(grammar);
//!
//! let fragments = highlighter.highlight("1, 2")?;
//! assert_eq!(fragments[0], Fragment::new("class:int", "1"));
//! assert_eq!(fragments[1], Fragment::new("", ", "));
//! # Ok::<(), grammar_highlight::HighlightError>(())
//! ```

pub mod error;
pub mod syntax;

pub use error::{HighlightError, Result};
pub use syntax::{
    Fragment, Grammar, GrammarFault, HighlightedDocument, Highlighter, LanguageDefinition,
    MatchOutcome, Peg, Rule, StyleTag, SyntaxManager, TokenTree,
};
