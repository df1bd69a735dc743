//! Rule combinators for the bundled grammar
//!
//! This module defines the building blocks of a [`Peg`](super::peg::Peg)
//! grammar: terminals (literals, regex patterns, custom closures) and the
//! combinators that compose them.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use regex::Regex;

use super::capture;
use super::grammar::MatchOutcome;
use super::style::StyleTag;
use crate::error::{HighlightError, Result};

/// Signature of a user-supplied matching closure
///
/// Called with the full input and the offset to match at; returns the
/// outcome directly so user code can report its own faults.
pub type CustomFn = dyn Fn(&str, usize) -> MatchOutcome;

/// A grammar rule
#[derive(Clone, Debug)]
pub enum Rule {
    /// Exact text
    Literal(String),
    /// Regex anchored at the current offset
    Pattern(Pattern),
    /// All rules in order
    Seq(Vec<Rule>),
    /// First rule that matches
    Choice(Vec<Rule>),
    /// Between `min` and `max` consecutive matches
    Repeat {
        rule: Box<Rule>,
        min: usize,
        max: Option<usize>,
    },
    /// Succeeds without consuming when the rule does not match
    Not(Box<Rule>),
    /// A named rule of the enclosing grammar
    Ref(String),
    /// Records a capture when the inner rule matches
    Capture { style: StyleTag, rule: Box<Rule> },
    /// User-supplied matching logic
    Custom(CustomRule),
}

impl Rule {
    /// Match exact text
    pub fn literal(text: &str) -> Self {
        Rule::Literal(text.to_string())
    }

    /// Match a regex at the current offset
    pub fn pattern(pattern: &str) -> Result<Self> {
        Pattern::new(pattern).map(Rule::Pattern)
    }

    /// Match every rule in order
    pub fn seq(rules: Vec<Rule>) -> Self {
        Rule::Seq(rules)
    }

    /// Match the first rule that succeeds
    pub fn choice(rules: Vec<Rule>) -> Self {
        Rule::Choice(rules)
    }

    /// Match `rule` between `min` and `max` times
    pub fn repeat(rule: Rule, min: usize, max: Option<usize>) -> Self {
        Rule::Repeat {
            rule: Box::new(rule),
            min,
            max,
        }
    }

    /// Zero or more
    pub fn many0(rule: Rule) -> Self {
        Self::repeat(rule, 0, None)
    }

    /// One or more
    pub fn many1(rule: Rule) -> Self {
        Self::repeat(rule, 1, None)
    }

    /// Zero or one
    pub fn optional(rule: Rule) -> Self {
        Self::repeat(rule, 0, Some(1))
    }

    /// Negative lookahead
    pub fn not(rule: Rule) -> Self {
        Rule::Not(Box::new(rule))
    }

    /// Reference a named rule
    pub fn reference(name: &str) -> Self {
        Rule::Ref(name.to_string())
    }

    /// `item (delimiter item)*`
    pub fn delimited(item: Rule, delimiter: Rule) -> Self {
        Rule::Seq(vec![
            item.clone(),
            Self::many0(Rule::Seq(vec![delimiter, item])),
        ])
    }

    /// Match with a closure
    pub fn custom<F>(name: &str, func: F) -> Self
    where
        F: Fn(&str, usize) -> MatchOutcome + 'static,
    {
        Rule::Custom(CustomRule {
            name: name.to_string(),
            func: Rc::new(func),
        })
    }

    /// Capture matches of this rule with `style`
    pub fn styled(self, style: impl Into<StyleTag>) -> Self {
        capture::wrap(style, self)
    }

    /// Visit this rule and every rule nested in it
    pub(crate) fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Rule)) {
        visit(self);
        match self {
            Rule::Seq(rules) | Rule::Choice(rules) => {
                for rule in rules {
                    rule.walk(visit);
                }
            }
            Rule::Repeat { rule, .. } | Rule::Not(rule) | Rule::Capture { rule, .. } => {
                rule.walk(visit)
            }
            Rule::Literal(_) | Rule::Pattern(_) | Rule::Ref(_) | Rule::Custom(_) => {}
        }
    }
}

/// A named user closure
#[derive(Clone)]
pub struct CustomRule {
    pub name: String,
    pub(crate) func: Rc<CustomFn>,
}

impl CustomRule {
    /// Run the closure
    pub fn call(&self, text: &str, offset: usize) -> MatchOutcome {
        (self.func)(text, offset)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule").field("name", &self.name).finish()
    }
}

/// Last forward search of a pattern
#[derive(Debug, Clone, Copy)]
struct Search {
    generation: u64,
    from: usize,
    found: Option<(usize, usize)>,
}

/// A compiled regex terminal
///
/// Searches run over the whole input so assertions such as `\b` see the
/// text before the offset. The last forward search is remembered: while
/// the scan moves forward it keeps answering from that result until the
/// offset passes the match it found.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
    last: Cell<Option<Search>>,
}

impl Pattern {
    /// Compile a pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| HighlightError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
            last: Cell::new(None),
        })
    }

    /// The pattern source
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// End of a match starting exactly at `offset`
    ///
    /// `generation` ties the remembered search to one input; callers bump
    /// it whenever the input may have changed.
    pub fn match_at(&self, text: &str, offset: usize, generation: u64) -> Option<usize> {
        if offset > text.len() {
            return None;
        }

        if let Some(last) = self.last.get() {
            if last.generation == generation && last.from <= offset {
                match last.found {
                    None => return None,
                    Some((start, end)) if start >= offset => {
                        return (start == offset).then_some(end);
                    }
                    Some(_) => {}
                }
            }
        }

        let found = self
            .regex
            .find_at(text, offset)
            .map(|m| (m.start(), m.end()));
        self.last.set(Some(Search {
            generation,
            from: offset,
            found,
        }));
        found.filter(|&(start, _)| start == offset).map(|(_, end)| end)
    }
}
