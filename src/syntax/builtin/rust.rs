//! Rust language definition

use crate::syntax::language::{LanguageDefinition, RuleDefinition};

/// Create Rust language definition
pub fn rust_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("Rust");
    lang.add_extension("rs");

    // Comments (highest priority)
    lang.add_rule(RuleDefinition::token("doc_comment", r"///[^\n]*", "Literal.String.Doc", 101));
    lang.add_rule(RuleDefinition::token("line_comment", r"//[^\n]*", "Comment.Single", 100));
    lang.add_rule(RuleDefinition::token("block_comment", r"(?s)/\*.*?\*/", "Comment.Multiline", 99));

    // Strings may span lines
    lang.add_rule(RuleDefinition::token("raw_string", r##"(?s)r#*".*?"#*"##, "Literal.String", 97));
    lang.add_rule(RuleDefinition::token("string", r#"(?s)b?"(?:[^"\\]|\\.)*""#, "Literal.String.Double", 96));

    // Attributes
    lang.add_rule(RuleDefinition::token("attribute", r"#!?\[[^\]\n]*\]", "Name.Decorator", 95));

    // Character literals before lifetimes
    lang.add_rule(RuleDefinition::token("char", r"b?'(?:[^'\\]|\\.)'", "Literal.String.Char", 90));
    lang.add_rule(RuleDefinition::token("lifetime", r"'\w+", "Name.Label", 89));

    // Macros (ending with !)
    lang.add_rule(RuleDefinition::token("macro", r"\b\w+!", "Name.Builtin", 85));

    // Keywords
    let keywords = r"\b(?:as|async|await|break|const|continue|crate|dyn|else|enum|extern|fn|for|if|impl|in|let|loop|match|mod|move|mut|pub|ref|return|self|Self|static|struct|super|trait|type|union|unsafe|use|where|while)\b";
    lang.add_rule(RuleDefinition::token("keyword", keywords, "Keyword", 80));
    lang.add_rule(RuleDefinition::token("constant", r"\b(?:true|false)\b", "Keyword.Constant", 80));

    // Built-in types
    let types = r"\b(?:bool|char|str|u8|u16|u32|u64|u128|usize|i8|i16|i32|i64|i128|isize|f32|f64)\b";
    lang.add_rule(RuleDefinition::token("type", types, "Keyword.Type", 75));

    // Type names (capitalized identifiers)
    lang.add_rule(RuleDefinition::token("type_name", r"\b[A-Z][a-zA-Z0-9_]*\b", "Name.Class", 60));

    // Function names at call or definition sites
    lang.add_rule(RuleDefinition::token("function", r"\b[a-z_][a-zA-Z0-9_]*", "Name.Function", 55).followed_by(r"\("));

    // Numbers
    lang.add_rule(RuleDefinition::token("hex", r"\b0x[0-9a-fA-F_]+\b", "Literal.Number.Hex", 65));
    lang.add_rule(RuleDefinition::token("binary", r"\b0b[01_]+\b", "Literal.Number.Bin", 65));
    lang.add_rule(RuleDefinition::token("octal", r"\b0o[0-7_]+\b", "Literal.Number.Oct", 65));
    lang.add_rule(RuleDefinition::token("float", r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?(?:f32|f64)?\b", "Literal.Number.Float", 64));
    lang.add_rule(RuleDefinition::token("integer", r"\b\d[\d_]*(?:u8|u16|u32|u64|u128|usize|i8|i16|i32|i64|i128|isize)?\b", "Literal.Number.Integer", 63));

    // Identifiers, so keywords never match inside them
    lang.add_rule(RuleDefinition::token("identifier", r"\b[a-z_][a-zA-Z0-9_]*\b", "Name", 50));

    // Operators and punctuation
    lang.add_rule(RuleDefinition::token("operator", r"[+\-*/%&|^!<>=@]+", "Operator", 40));
    lang.add_rule(RuleDefinition::token("punctuation", r"[(){}\[\];,.:]", "Punctuation", 30));

    lang
}
