//! Python language definition

use crate::syntax::language::{LanguageDefinition, RuleDefinition};

/// Create Python language definition
pub fn python_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new("Python");
    lang.add_extension("py");
    lang.add_extension("pyw");
    lang.add_extension("pyi");

    // Comments
    lang.add_rule(RuleDefinition::token("comment", r"#[^\n]*", "Comment.Single", 100));

    // Triple-quoted strings (docstrings) span lines
    lang.add_rule(RuleDefinition::token("triple_double", r#"(?s)[rRbBuUfF]{0,2}""".*?""""#, "Literal.String.Doc", 98));
    lang.add_rule(RuleDefinition::token("triple_single", r"(?s)[rRbBuUfF]{0,2}'''.*?'''", "Literal.String.Doc", 98));

    // Regular strings, prefix included
    lang.add_rule(RuleDefinition::token("double_string", r#"[rRbBuUfF]{0,2}"(?:[^"\\\n]|\\.)*""#, "Literal.String.Double", 96));
    lang.add_rule(RuleDefinition::token("single_string", r"[rRbBuUfF]{0,2}'(?:[^'\\\n]|\\.)*'", "Literal.String.Single", 96));

    // Decorators
    lang.add_rule(RuleDefinition::token("decorator", r"@[\w.]+", "Name.Decorator", 95));

    // Keywords
    let keywords = r"\b(?:and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield)\b";
    lang.add_rule(RuleDefinition::token("keyword", keywords, "Keyword", 80));
    lang.add_rule(RuleDefinition::token("constant", r"\b(?:True|False|None)\b", "Keyword.Constant", 80));

    // self/cls
    lang.add_rule(RuleDefinition::token("self", r"\b(?:self|cls)\b", "Name.Builtin.Pseudo", 77));

    // Built-in functions
    let builtins = r"\b(?:abs|all|any|ascii|bin|bool|bytearray|bytes|callable|chr|classmethod|compile|complex|delattr|dict|dir|divmod|enumerate|eval|exec|filter|float|format|frozenset|getattr|globals|hasattr|hash|help|hex|id|input|int|isinstance|issubclass|iter|len|list|locals|map|max|memoryview|min|next|object|oct|open|ord|pow|print|property|range|repr|reversed|round|set|setattr|slice|sorted|staticmethod|str|sum|super|tuple|type|vars|zip)\b";
    lang.add_rule(RuleDefinition::token("builtin", builtins, "Name.Builtin", 75));

    // Numbers
    lang.add_rule(RuleDefinition::token("hex", r"\b0[xX][0-9a-fA-F_]+\b", "Literal.Number.Hex", 65));
    lang.add_rule(RuleDefinition::token("binary", r"\b0[bB][01_]+\b", "Literal.Number.Bin", 65));
    lang.add_rule(RuleDefinition::token("octal", r"\b0[oO][0-7_]+\b", "Literal.Number.Oct", 65));
    lang.add_rule(RuleDefinition::token("float", r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?j?\b", "Literal.Number.Float", 64));
    lang.add_rule(RuleDefinition::token("integer", r"\b\d[\d_]*j?\b", "Literal.Number.Integer", 63));

    // Identifiers
    lang.add_rule(RuleDefinition::token("identifier", r"\b[A-Za-z_]\w*\b", "Name", 50));

    // Operators and punctuation
    lang.add_rule(RuleDefinition::token("operator", r"[+\-*/%&|^!<>=@~]+", "Operator", 40));
    lang.add_rule(RuleDefinition::token("punctuation", r"[(){}\[\];,.:]", "Punctuation", 30));

    lang
}
