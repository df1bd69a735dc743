//! TOML language definition

use crate::syntax::language::{LanguageDefinition, RuleDefinition};

/// Create TOML language definition
pub fn toml_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("TOML");
    lang.add_extension("toml");

    // Comments
    lang.add_rule(RuleDefinition::token("comment", r"#[^\n]*", "Comment.Single", 100));

    // Multi-line strings
    lang.add_rule(RuleDefinition::token("multiline_basic", r#"(?s)""".*?""""#, "Literal.String.Doc", 98));
    lang.add_rule(RuleDefinition::token("multiline_literal", r"(?s)'''.*?'''", "Literal.String.Doc", 98));

    // Single-line strings
    lang.add_rule(RuleDefinition::token("basic_string", r#""(?:[^"\\\n]|\\.)*""#, "Literal.String.Double", 96));
    lang.add_rule(RuleDefinition::token("literal_string", r"'[^'\n]*'", "Literal.String.Single", 96));

    // Table headers only at the start of a line
    lang.add_rule(RuleDefinition::token("table", r"(?m)^\[\[?[^\]\n]+\]\]?", "Keyword.Namespace", 95));

    // Keys (before = sign)
    lang.add_rule(RuleDefinition::token("key", r"[\w\-.]+", "Name.Attribute", 90).followed_by("="));

    // Booleans
    lang.add_rule(RuleDefinition::token("boolean", r"\b(?:true|false)\b", "Keyword.Constant", 80));

    // Dates/times
    lang.add_rule(RuleDefinition::token("datetime", r"\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?)?", "Literal.Date", 75));
    lang.add_rule(RuleDefinition::token("time", r"\d{2}:\d{2}:\d{2}(?:\.\d+)?", "Literal.Date", 74));

    // Numbers
    lang.add_rule(RuleDefinition::token("hex", r"\b0x[0-9a-fA-F_]+\b", "Literal.Number.Hex", 65));
    lang.add_rule(RuleDefinition::token("binary", r"\b0b[01_]+\b", "Literal.Number.Bin", 65));
    lang.add_rule(RuleDefinition::token("octal", r"\b0o[0-7_]+\b", "Literal.Number.Oct", 65));
    lang.add_rule(RuleDefinition::token("float", r"[+-]?(?:\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?|inf|nan)\b", "Literal.Number.Float", 64));
    lang.add_rule(RuleDefinition::token("integer", r"[+-]?\d[\d_]*\b", "Literal.Number.Integer", 63));

    // Punctuation
    lang.add_rule(RuleDefinition::token("punctuation", r"[=\[\]{},.]", "Punctuation", 30));

    lang
}
