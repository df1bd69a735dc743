//! Bundled parsing-expression grammar
//!
//! [`Peg`] evaluates a tree of [`Rule`]s with ordered choice and
//! backtracking, and implements the [`Grammar`] capability the scan
//! driver consumes. Named rules are memoized per offset for the length of
//! one scan, together with the captures they recorded.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::capture::{Capture, ScanContext};
use super::grammar::{Grammar, GrammarFault, MatchOutcome};
use super::rules::Rule;
use crate::error::{HighlightError, Result};

/// Memoized result of a named rule at one offset
#[derive(Clone)]
struct Memo {
    outcome: MatchOutcome,
    captures: Vec<Capture>,
}

/// (rule index, offset, skipping enabled)
type MemoKey = (usize, usize, bool);

/// Deepest rule nesting one match attempt may reach
pub const MAX_DEPTH: usize = 256;

/// A parsing-expression grammar
///
/// Holds its match cache in a `RefCell`, so a `Peg` cannot be shared
/// between threads; highlight calls on one instance run one at a time.
pub struct Peg {
    rules: Vec<Rule>,
    names: HashMap<String, usize>,
    start: Rule,
    ignore: Vec<Rule>,
    skip_whitespace: bool,
    memo: RefCell<HashMap<MemoKey, Memo>>,
    generation: Cell<u64>,
    depth: Cell<usize>,
}

impl Peg {
    /// Start building a grammar with named rules
    pub fn builder() -> PegBuilder {
        PegBuilder::new()
    }

    /// Grammar consisting of a single rule with default whitespace skipping
    pub fn from_rule(start: Rule) -> Result<Self> {
        PegBuilder::new().start(start).build()
    }

    /// Look up a named rule
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.names.get(name).map(|&index| &self.rules[index])
    }

    fn skip_from(&self, text: &str, offset: usize) -> std::result::Result<usize, GrammarFault> {
        let mut pos = offset;
        loop {
            let before = pos;
            if self.skip_whitespace {
                if let Some(rest) = text.get(pos..) {
                    pos += rest.len() - rest.trim_start().len();
                }
            }
            for rule in &self.ignore {
                // Ignored input is never styled
                let mut scratch = ScanContext::new();
                match self.eval(rule, text, pos, &mut scratch, false) {
                    MatchOutcome::Matched { end } if end > pos => pos = end,
                    MatchOutcome::Fault(fault) => return Err(fault),
                    _ => {}
                }
            }
            if pos == before {
                return Ok(pos);
            }
        }
    }

    fn terminal_start(
        &self,
        text: &str,
        pos: usize,
        skip: bool,
    ) -> std::result::Result<usize, GrammarFault> {
        if skip {
            self.skip_from(text, pos)
        } else {
            Ok(pos)
        }
    }

    fn eval(
        &self,
        rule: &Rule,
        text: &str,
        pos: usize,
        scan: &mut ScanContext,
        skip: bool,
    ) -> MatchOutcome {
        let depth = self.depth.get();
        if depth >= MAX_DEPTH {
            return MatchOutcome::Fault(GrammarFault::new(
                "RecursionLimit",
                format!("rules nested deeper than {} at offset {}", MAX_DEPTH, pos),
            ));
        }
        self.depth.set(depth + 1);
        let outcome = self.eval_rule(rule, text, pos, scan, skip);
        self.depth.set(depth);
        outcome
    }

    fn eval_rule(
        &self,
        rule: &Rule,
        text: &str,
        pos: usize,
        scan: &mut ScanContext,
        skip: bool,
    ) -> MatchOutcome {
        match rule {
            Rule::Literal(literal) => {
                let start = match self.terminal_start(text, pos, skip) {
                    Ok(start) => start,
                    Err(fault) => return MatchOutcome::Fault(fault),
                };
                match text.get(start..) {
                    Some(rest) if rest.starts_with(literal.as_str()) => MatchOutcome::Matched {
                        end: start + literal.len(),
                    },
                    _ => MatchOutcome::NoMatch,
                }
            }

            Rule::Pattern(pattern) => {
                let start = match self.terminal_start(text, pos, skip) {
                    Ok(start) => start,
                    Err(fault) => return MatchOutcome::Fault(fault),
                };
                match pattern.match_at(text, start, self.generation.get()) {
                    Some(end) => MatchOutcome::Matched { end },
                    None => MatchOutcome::NoMatch,
                }
            }

            Rule::Seq(rules) => {
                let mark = scan.mark();
                let mut cursor = pos;
                for rule in rules {
                    match self.eval(rule, text, cursor, scan, skip) {
                        MatchOutcome::Matched { end } => cursor = end,
                        other => {
                            scan.rollback(mark);
                            return other;
                        }
                    }
                }
                MatchOutcome::Matched { end: cursor }
            }

            Rule::Choice(rules) => {
                for rule in rules {
                    let mark = scan.mark();
                    match self.eval(rule, text, pos, scan, skip) {
                        MatchOutcome::NoMatch => scan.rollback(mark),
                        MatchOutcome::Fault(fault) => {
                            scan.rollback(mark);
                            return MatchOutcome::Fault(fault);
                        }
                        matched => return matched,
                    }
                }
                MatchOutcome::NoMatch
            }

            Rule::Repeat { rule, min, max } => {
                let mark = scan.mark();
                let mut cursor = pos;
                let mut count = 0;
                while max.map_or(true, |max| count < max) {
                    let attempt = scan.mark();
                    match self.eval(rule, text, cursor, scan, skip) {
                        MatchOutcome::Matched { end } if end == cursor => {
                            // An empty match would repeat forever
                            count = count.max(*min);
                            break;
                        }
                        MatchOutcome::Matched { end } => {
                            count += 1;
                            cursor = end;
                        }
                        MatchOutcome::NoMatch => {
                            scan.rollback(attempt);
                            break;
                        }
                        MatchOutcome::Fault(fault) => {
                            scan.rollback(mark);
                            return MatchOutcome::Fault(fault);
                        }
                    }
                }
                if count < *min {
                    scan.rollback(mark);
                    MatchOutcome::NoMatch
                } else {
                    MatchOutcome::Matched { end: cursor }
                }
            }

            Rule::Not(rule) => {
                let mark = scan.mark();
                let outcome = self.eval(rule, text, pos, scan, skip);
                scan.rollback(mark);
                match outcome {
                    MatchOutcome::Matched { .. } => MatchOutcome::NoMatch,
                    MatchOutcome::NoMatch => MatchOutcome::Matched { end: pos },
                    fault => fault,
                }
            }

            Rule::Ref(name) => match self.names.get(name) {
                Some(&index) => self.eval_named(index, text, pos, scan, skip),
                None => MatchOutcome::Fault(GrammarFault::new(
                    "UnknownRule",
                    format!("no rule named `{}`", name),
                )),
            },

            Rule::Capture { style, rule } => {
                let start = match self.terminal_start(text, pos, skip) {
                    Ok(start) => start,
                    Err(fault) => return MatchOutcome::Fault(fault),
                };
                let outcome = self.eval(rule, text, start, scan, skip);
                if let MatchOutcome::Matched { end } = outcome {
                    scan.record(Capture::new(start, end, style.clone()));
                }
                outcome
            }

            Rule::Custom(custom) => {
                let start = match self.terminal_start(text, pos, skip) {
                    Ok(start) => start,
                    Err(fault) => return MatchOutcome::Fault(fault),
                };
                match custom.call(text, start) {
                    MatchOutcome::Matched { end }
                        if end < start || end > text.len() || !text.is_char_boundary(end) =>
                    {
                        MatchOutcome::Fault(GrammarFault::new(
                            "InvalidMatch",
                            format!(
                                "rule `{}` matched from {} to invalid offset {}",
                                custom.name, start, end
                            ),
                        ))
                    }
                    outcome => outcome,
                }
            }
        }
    }

    fn eval_named(
        &self,
        index: usize,
        text: &str,
        pos: usize,
        scan: &mut ScanContext,
        skip: bool,
    ) -> MatchOutcome {
        let key = (index, pos, skip);
        let cached = self.memo.borrow().get(&key).cloned();
        if let Some(memo) = cached {
            scan.replay(&memo.captures);
            return memo.outcome;
        }

        // A rule re-entered at the same offset fails instead of recursing
        self.memo.borrow_mut().insert(
            key,
            Memo {
                outcome: MatchOutcome::NoMatch,
                captures: Vec::new(),
            },
        );

        let mark = scan.mark();
        let outcome = self.eval(&self.rules[index], text, pos, scan, skip);
        if let MatchOutcome::Fault(_) = outcome {
            // Faults depend on nesting depth, not just the offset
            self.memo.borrow_mut().remove(&key);
            return outcome;
        }
        let captures = if outcome.is_match() {
            scan.since(mark).to_vec()
        } else {
            Vec::new()
        };
        self.memo.borrow_mut().insert(
            key,
            Memo {
                outcome: outcome.clone(),
                captures,
            },
        );
        outcome
    }
}

impl Grammar for Peg {
    fn match_at(&self, text: &str, offset: usize, scan: &mut ScanContext) -> MatchOutcome {
        self.depth.set(0);
        self.eval(&self.start, text, offset, scan, true)
    }

    fn skip(&self, text: &str, offset: usize) -> std::result::Result<usize, GrammarFault> {
        self.depth.set(0);
        self.skip_from(text, offset)
    }

    fn invalidate_cache(&self) {
        self.memo.borrow_mut().clear();
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

/// Builder for [`Peg`]
pub struct PegBuilder {
    rules: Vec<(String, Rule)>,
    start: Option<Rule>,
    ignore: Vec<Rule>,
    skip_whitespace: bool,
}

impl PegBuilder {
    /// Create an empty builder that skips whitespace
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            start: None,
            ignore: Vec::new(),
            skip_whitespace: true,
        }
    }

    /// Add (or replace) a named rule
    pub fn rule(mut self, name: &str, rule: Rule) -> Self {
        match self.rules.iter_mut().find(|(existing, _)| existing == name) {
            Some(slot) => slot.1 = rule,
            None => self.rules.push((name.to_string(), rule)),
        }
        self
    }

    /// Set the rule every scan attempt starts from
    pub fn start(mut self, rule: Rule) -> Self {
        self.start = Some(rule);
        self
    }

    /// Start from a named rule
    pub fn start_rule(self, name: &str) -> Self {
        self.start(Rule::reference(name))
    }

    /// Skip input matching `rule` before every terminal (comments, etc.)
    pub fn ignore(mut self, rule: Rule) -> Self {
        self.ignore.push(rule);
        self
    }

    /// Whether terminals skip leading whitespace
    pub fn skip_whitespace(mut self, skip: bool) -> Self {
        self.skip_whitespace = skip;
        self
    }

    /// Validate references and build the grammar
    pub fn build(self) -> Result<Peg> {
        let start = self
            .start
            .ok_or_else(|| HighlightError::Definition("grammar has no start rule".to_string()))?;

        let mut names = HashMap::new();
        let mut rules = Vec::with_capacity(self.rules.len());
        for (index, (name, rule)) in self.rules.into_iter().enumerate() {
            names.insert(name, index);
            rules.push(rule);
        }

        let mut missing = None;
        for rule in rules.iter().chain(&self.ignore).chain(std::iter::once(&start)) {
            rule.walk(&mut |r| {
                if let Rule::Ref(name) = r {
                    if missing.is_none() && !names.contains_key(name) {
                        missing = Some(name.clone());
                    }
                }
            });
        }
        if let Some(name) = missing {
            return Err(HighlightError::Definition(format!("unknown rule `{}`", name)));
        }

        Ok(Peg {
            rules,
            names,
            start,
            ignore: self.ignore,
            skip_whitespace: self.skip_whitespace,
            memo: RefCell::new(HashMap::new()),
            generation: Cell::new(0),
            depth: Cell::new(0),
        })
    }
}

impl Default for PegBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::StyleTag;

    fn run(peg: &Peg, text: &str, offset: usize) -> (MatchOutcome, Vec<Capture>) {
        peg.invalidate_cache();
        let mut scan = ScanContext::new();
        let outcome = peg.match_at(text, offset, &mut scan);
        let captures = scan.captures().to_vec();
        (outcome, captures)
    }

    fn int() -> Rule {
        Rule::pattern(r"\d+").unwrap().styled("class:int")
    }

    #[test]
    fn test_literal_skips_whitespace() {
        let peg = Peg::from_rule(Rule::literal("let")).unwrap();
        let (outcome, _) = run(&peg, "  let", 0);
        assert_eq!(outcome, MatchOutcome::Matched { end: 5 });
    }

    #[test]
    fn test_no_whitespace_skipping() {
        let peg = Peg::builder()
            .start(Rule::literal("let"))
            .skip_whitespace(false)
            .build()
            .unwrap();
        let (outcome, _) = run(&peg, "  let", 0);
        assert_eq!(outcome, MatchOutcome::NoMatch);
    }

    #[test]
    fn test_delimited_captures() {
        let peg = Peg::from_rule(Rule::delimited(int(), Rule::literal(","))).unwrap();
        let (outcome, captures) = run(&peg, "1, 2, 3", 0);

        assert_eq!(outcome, MatchOutcome::Matched { end: 7 });
        let starts: Vec<_> = captures.iter().map(|c| (c.start, c.end)).collect();
        assert_eq!(starts, vec![(0, 1), (3, 4), (6, 7)]);
    }

    #[test]
    fn test_failed_branch_leaves_no_captures() {
        // First branch captures the int, then fails on the missing ";"
        let rule = Rule::choice(vec![
            Rule::seq(vec![int(), Rule::literal(";")]),
            Rule::pattern(r"\d+").unwrap(),
        ]);
        let peg = Peg::from_rule(rule).unwrap();
        let (outcome, captures) = run(&peg, "42", 0);

        assert_eq!(outcome, MatchOutcome::Matched { end: 2 });
        assert!(captures.is_empty());
    }

    #[test]
    fn test_capture_starts_after_whitespace() {
        let peg = Peg::from_rule(int()).unwrap();
        let (_, captures) = run(&peg, "   7", 0);
        assert_eq!(captures, vec![Capture::new(3, 4, StyleTag::class("int"))]);
    }

    #[test]
    fn test_not_consumes_nothing() {
        let rule = Rule::seq(vec![Rule::not(Rule::literal("x")), Rule::pattern(r"\w").unwrap()]);
        let peg = Peg::from_rule(rule).unwrap();
        assert_eq!(run(&peg, "a", 0).0, MatchOutcome::Matched { end: 1 });
        assert_eq!(run(&peg, "x", 0).0, MatchOutcome::NoMatch);
    }

    #[test]
    fn test_repeat_bounds() {
        let digit = Rule::pattern(r"\d").unwrap();
        let peg = Peg::from_rule(Rule::repeat(digit, 2, Some(3))).unwrap();
        assert_eq!(run(&peg, "1", 0).0, MatchOutcome::NoMatch);
        assert_eq!(run(&peg, "12345", 0).0, MatchOutcome::Matched { end: 3 });
    }

    #[test]
    fn test_repeat_of_empty_match_terminates() {
        let peg = Peg::from_rule(Rule::many1(Rule::literal(""))).unwrap();
        assert_eq!(run(&peg, "abc", 0).0, MatchOutcome::Matched { end: 0 });
    }

    #[test]
    fn test_left_recursion_fails_instead_of_looping() {
        let peg = Peg::builder()
            .rule(
                "expr",
                Rule::choice(vec![
                    Rule::seq(vec![Rule::reference("expr"), Rule::literal("+"), int()]),
                    int(),
                ]),
            )
            .start_rule("expr")
            .build()
            .unwrap();
        assert_eq!(run(&peg, "1+2", 0).0, MatchOutcome::Matched { end: 1 });
    }

    fn right_recursive_list() -> Peg {
        let a = Rule::literal("a").styled("class:a");
        Peg::builder()
            .rule(
                "list",
                Rule::choice(vec![Rule::seq(vec![a.clone(), Rule::reference("list")]), a]),
            )
            .start_rule("list")
            .build()
            .unwrap()
    }

    #[test]
    fn test_deep_nesting_is_a_fault() {
        let peg = right_recursive_list();
        match run(&peg, &"a".repeat(5_000), 0).0 {
            MatchOutcome::Fault(fault) => assert_eq!(fault.kind, "RecursionLimit"),
            other => panic!("expected fault, got {:?}", other),
        }
        // Shallow input still matches after the fault
        assert_eq!(run(&peg, "aaa", 0).0, MatchOutcome::Matched { end: 3 });
    }

    #[test]
    fn test_memo_replays_captures() {
        // Both branches go through the same named rule at offset 0
        let peg = Peg::builder()
            .rule("num", int())
            .start(Rule::choice(vec![
                Rule::seq(vec![Rule::reference("num"), Rule::literal("!")]),
                Rule::reference("num"),
            ]))
            .build()
            .unwrap();
        let (outcome, captures) = run(&peg, "5", 0);

        assert_eq!(outcome, MatchOutcome::Matched { end: 1 });
        assert_eq!(captures.len(), 1);
    }

    #[test]
    fn test_unknown_reference_is_rejected() {
        let result = Peg::builder().start_rule("missing").build();
        assert!(matches!(result, Err(HighlightError::Definition(_))));
    }

    #[test]
    fn test_missing_start_is_rejected() {
        let result = Peg::builder().rule("a", Rule::literal("a")).build();
        assert!(matches!(result, Err(HighlightError::Definition(_))));
    }

    #[test]
    fn test_custom_invalid_end_is_fault() {
        let peg = Peg::from_rule(Rule::custom("overrun", |text: &str, _| {
            MatchOutcome::Matched { end: text.len() + 5 }
        }))
        .unwrap();
        match run(&peg, "abc", 0).0 {
            MatchOutcome::Fault(fault) => assert_eq!(fault.kind, "InvalidMatch"),
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_ignore_rules_are_skipped() {
        let peg = Peg::builder()
            .start(int())
            .ignore(Rule::pattern(r"#[^\n]*").unwrap())
            .build()
            .unwrap();
        assert_eq!(peg.skip("# note\n 4", 0), Ok(8));
        let (_, captures) = run(&peg, "# note\n 4", 0);
        assert_eq!(captures[0].start, 8);
    }

    #[test]
    fn test_ignore_fault_fails_skip() {
        let peg = Peg::builder()
            .start(int())
            .ignore(Rule::custom("broken", |_: &str, _| {
                MatchOutcome::Fault(GrammarFault::new("Broken", "cannot skip"))
            }))
            .build()
            .unwrap();
        assert_eq!(peg.skip("1", 0), Err(GrammarFault::new("Broken", "cannot skip")));
    }
}
