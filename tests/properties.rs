//! Property tests for invariants that hold for any input

use grammar_highlight::syntax::{scan, Diagnostic, MatchOutcome};
use grammar_highlight::{Fragment, Highlighter, Peg, Rule, SyntaxManager};
use proptest::prelude::*;
use std::path::Path;

fn int_list() -> Highlighter {
    let int = Rule::pattern(r"\d+").unwrap().styled("class:int");
    let grammar = Peg::from_rule(Rule::delimited(int, Rule::literal(","))).unwrap();
    Highlighter::new(grammar)
}

fn rust() -> Highlighter {
    SyntaxManager::new()
        .highlighter_for_path(Path::new("x.rs"))
        .unwrap()
        .unwrap()
}

fn joined(fragments: &[Fragment]) -> String {
    fragments.iter().map(|f| f.text.as_str()).collect()
}

proptest! {
    #[test]
    fn fragments_concatenate_to_input(text in any::<String>()) {
        let fragments = int_list().highlight(&text).unwrap();
        prop_assert_eq!(joined(&fragments), text);
    }

    #[test]
    fn fragments_are_never_empty(text in "[0-9, a-z@\n]{0,40}") {
        let fragments = int_list().highlight(&text).unwrap();
        prop_assert!(fragments.iter().all(|f| !f.text.is_empty()));
    }

    #[test]
    fn rust_highlighting_covers_input(text in "[ -~\n\u{e9}\u{4e2d}]{0,80}") {
        let fragments = rust().highlight(&text).unwrap();
        prop_assert_eq!(joined(&fragments), text);
    }

    #[test]
    fn highlighting_is_idempotent(text in "[0-9, x]{0,30}") {
        let highlighter = int_list();
        let first = highlighter.highlight(&text).unwrap();
        let second = highlighter.highlight(&text).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unmatched_text_is_one_fragment(text in "[a-z ]{1,30}") {
        let fragments = int_list().highlight(&text).unwrap();
        prop_assert_eq!(fragments, vec![Fragment::new("", text.as_str())]);
    }

    #[test]
    fn zero_width_grammar_terminates(text in any::<String>()) {
        let grammar = Peg::from_rule(
            Rule::custom("nothing", |_: &str, offset| MatchOutcome::Matched { end: offset })
                .styled("class:empty"),
        )
        .unwrap();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let report = scan(&grammar, &text, &mut sink).unwrap();
        prop_assert!(report.attempts <= text.len() + 1);
        prop_assert!(sink.is_empty());

        let fragments = Highlighter::new(grammar).highlight(&text).unwrap();
        prop_assert_eq!(joined(&fragments), text);
    }

    #[test]
    fn html_never_contains_raw_markup(text in "[<>&'\"0-9 ]{0,30}") {
        let html = int_list().highlight_html(&text).unwrap();
        let inner = html
            .strip_prefix("<span class=\"highlight\">")
            .and_then(|rest| rest.strip_suffix("</span>"))
            .unwrap()
            .replace("<span class=\"int\">", "")
            .replace("</span>", "");
        prop_assert!(!inner.contains(['<', '>', '"', '\'']));
    }
}
