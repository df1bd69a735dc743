//! End-to-end highlighting through the public API

use grammar_highlight::syntax::{Diagnostic, MatchOutcome};
use grammar_highlight::{Fragment, Highlighter, LanguageDefinition, Peg, Rule, SyntaxManager};
use rstest::rstest;
use std::path::Path;

fn int_list() -> Highlighter {
    let int = Rule::pattern(r"\d+").unwrap().styled("class:int");
    let grammar = Peg::from_rule(Rule::delimited(int, Rule::literal(","))).unwrap();
    Highlighter::new(grammar)
}

fn texts(fragments: &[Fragment]) -> Vec<&str> {
    fragments.iter().map(|f| f.text.as_str()).collect()
}

#[rstest]
#[case("1, 2, 3", vec!["1", ", ", "2", ", ", "3"])]
#[case("1, @, 3", vec!["1", ", @, ", "3"])]
#[case("42", vec!["42"])]
#[case("no digits here", vec!["no digits here"])]
#[case("", vec![])]
#[case("x1", vec!["x", "1"])]
fn splits_int_lists(#[case] input: &str, #[case] expected: Vec<&str>) {
    let fragments = int_list().highlight(input).unwrap();
    assert_eq!(texts(&fragments), expected);
}

#[rstest]
#[case("42", "<span class=\"highlight\"><span class=\"int\">42</span></span>")]
#[case("a<b", "<span class=\"highlight\">a&lt;b</span>")]
#[case("", "<span class=\"highlight\"></span>")]
#[case("'7'", "<span class=\"highlight\">&#x27;<span class=\"int\">7</span>&#x27;</span>")]
fn renders_html(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(int_list().highlight_html(input).unwrap(), expected);
}

#[test]
fn example_list_html() {
    assert_eq!(
        int_list().highlight_html("1, 2, 3").unwrap(),
        "<span class=\"highlight\"><span class=\"int\">1</span>, <span class=\"int\">2</span>, \
         <span class=\"int\">3</span></span>"
    );
}

#[test]
fn whole_match_is_one_fragment() {
    let grammar = Peg::builder()
        .start(Rule::pattern(r"(?s).+").unwrap().styled("class:all"))
        .skip_whitespace(false)
        .build()
        .unwrap();
    let fragments = Highlighter::new(grammar).highlight("  all\nof it ").unwrap();
    assert_eq!(fragments, vec![Fragment::new("class:all", "  all\nof it ")]);
}

#[test]
fn panicking_rule_does_not_stop_highlighting() {
    let grammar = Peg::from_rule(Rule::choice(vec![
        Rule::pattern(r"\d+").unwrap().styled("class:int"),
        Rule::custom("fragile", |text: &str, offset| {
            if text[offset..].starts_with('?') {
                panic!("cannot handle question marks");
            }
            MatchOutcome::NoMatch
        }),
    ]))
    .unwrap();

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let fragments = Highlighter::new(grammar)
        .highlight_with("1 ? 2", &mut diagnostics)
        .unwrap();

    assert_eq!(texts(&fragments), vec!["1", " ? ", "2"]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, "Panic");
    assert_eq!(diagnostics[0].offset, 2);
    assert!(diagnostics[0].message.contains("question marks"));
}

#[test]
fn deep_recursion_degrades_instead_of_crashing() {
    let a = Rule::literal("a").styled("class:a");
    let grammar = Peg::builder()
        .rule(
            "list",
            Rule::choice(vec![Rule::seq(vec![a.clone(), Rule::reference("list")]), a]),
        )
        .start_rule("list")
        .build()
        .unwrap();
    let text = "a".repeat(5_000);

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let fragments = Highlighter::new(grammar)
        .highlight_with(&text, &mut diagnostics)
        .unwrap();

    assert_eq!(fragments.iter().map(|f| f.text.as_str()).collect::<String>(), text);
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().all(|d| d.kind == "RecursionLimit"));
    assert_eq!(diagnostics[0].offset, 0);
    assert_eq!(fragments.last(), Some(&Fragment::new("class:a", "a")));
}

#[test]
fn document_lines() {
    let manager = SyntaxManager::new();
    let highlighter = manager.highlighter_for_path(Path::new("main.rs")).unwrap().unwrap();
    let document = highlighter.lex_document("fn main() {\n    let x = 1;\n}\n").unwrap();

    assert_eq!(document.line_count(), 4);
    assert_eq!(document.line(0)[0], Fragment::new("class:pygments.keyword", "fn"));
    assert!(document.line(1).contains(&Fragment::new("class:pygments.keyword", "let")));
    assert_eq!(document.line(2), &[Fragment::new("class:pygments.punctuation", "}")][..]);
    assert!(document.line(3).is_empty());
    assert!(document.line(99).is_empty());
}

#[rstest]
#[case("script.py", "Python")]
#[case("Cargo.toml", "TOML")]
#[case("lib.rs", "Rust")]
fn detects_builtin_languages(#[case] file: &str, #[case] language: &str) {
    assert_eq!(SyntaxManager::new().detect_language(Path::new(file)), Some(language));
}

#[test]
fn language_from_toml() {
    let lang = LanguageDefinition::from_toml(
        r#"
name = "Shell"
extensions = ["sh"]
ignore = ['#[^\n]*']

[[rules]]
name = "variable"
pattern = '\$\w+'
token = "Name.Variable"

[[rules]]
name = "builtin"
literal = "echo"
token = "Name.Builtin"
priority = 10
"#,
    )
    .unwrap();
    let highlighter = lang.highlighter().unwrap();

    assert_eq!(
        highlighter.highlight_html("echo $HOME # home").unwrap(),
        "<span class=\"highlight\"><span class=\"nb\">echo</span> \
         <span class=\"nv\">$HOME</span> # home</span>"
    );
}
