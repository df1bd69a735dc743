//! Token taxonomy for syntax highlighting
//!
//! This module defines the hierarchical token types that a grammar
//! can tag text with, and how they resolve to CSS classes and
//! terminal styles.

use std::collections::HashMap;

/// Class used when no node up to the root registers one
pub const ROOT_CLASS: &str = "text";

/// Handle to a node of a token taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(usize);

impl TokenId {
    /// Create a handle from a raw node index
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Raw node index
    pub fn index(self) -> usize {
        self.0
    }
}

/// A hierarchical classification of style tags
///
/// Every node except the root has a parent, so walking `parent` always
/// terminates at the root.
pub trait Taxonomy {
    /// The CSS class registered for exactly this node, if any
    fn canonical_class_name(&self, tag: TokenId) -> Option<&str>;

    /// The parent node, `None` for the root
    fn parent(&self, tag: TokenId) -> Option<TokenId>;

    /// Terminal style string for this node (`class:pygments.keyword.constant`)
    fn display_name(&self, tag: TokenId) -> String;

    /// The node used for text no rule styled
    fn text_token(&self) -> TokenId;
}

/// Resolve the CSS class for a token
///
/// Walks up the parent chain until a node carries a registered class,
/// falling back to [`ROOT_CLASS`] once the root is passed.
pub fn css_class<T: Taxonomy + ?Sized>(taxonomy: &T, tag: TokenId) -> &str {
    let mut node = Some(tag);
    while let Some(current) = node {
        if let Some(class) = taxonomy.canonical_class_name(current) {
            return class;
        }
        node = taxonomy.parent(current);
    }
    ROOT_CLASS
}

struct TokenNode {
    /// Dotted path below the root ("Keyword.Constant"), empty for the root
    path: String,
    parent: Option<TokenId>,
    class: Option<String>,
}

/// Arena-backed token taxonomy
pub struct TokenTree {
    nodes: Vec<TokenNode>,
    by_path: HashMap<String, TokenId>,
    text: TokenId,
}

/// Standard token hierarchy: (parent path, name, class)
const STANDARD_TOKENS: &[(&str, &str, &str)] = &[
    ("", "Text", ""),
    ("Text", "Whitespace", "w"),
    ("", "Escape", "esc"),
    ("", "Error", "err"),
    ("", "Other", "x"),
    ("", "Keyword", "k"),
    ("Keyword", "Constant", "kc"),
    ("Keyword", "Declaration", "kd"),
    ("Keyword", "Namespace", "kn"),
    ("Keyword", "Pseudo", "kp"),
    ("Keyword", "Reserved", "kr"),
    ("Keyword", "Type", "kt"),
    ("", "Name", "n"),
    ("Name", "Attribute", "na"),
    ("Name", "Builtin", "nb"),
    ("Name.Builtin", "Pseudo", "bp"),
    ("Name", "Class", "nc"),
    ("Name", "Constant", "no"),
    ("Name", "Decorator", "nd"),
    ("Name", "Exception", "ne"),
    ("Name", "Function", "nf"),
    ("Name", "Label", "nl"),
    ("Name", "Namespace", "nn"),
    ("Name", "Tag", "nt"),
    ("Name", "Variable", "nv"),
    ("", "Literal", "l"),
    ("Literal", "Date", "ld"),
    ("Literal", "String", "s"),
    ("Literal.String", "Char", "sc"),
    ("Literal.String", "Doc", "sd"),
    ("Literal.String", "Double", "s2"),
    ("Literal.String", "Escape", "se"),
    ("Literal.String", "Regex", "sr"),
    ("Literal.String", "Single", "s1"),
    ("Literal", "Number", "m"),
    ("Literal.Number", "Bin", "mb"),
    ("Literal.Number", "Float", "mf"),
    ("Literal.Number", "Hex", "mh"),
    ("Literal.Number", "Integer", "mi"),
    ("Literal.Number", "Oct", "mo"),
    ("", "Operator", "o"),
    ("Operator", "Word", "ow"),
    ("", "Punctuation", "p"),
    ("", "Comment", "c"),
    ("Comment", "Hashbang", "ch"),
    ("Comment", "Multiline", "cm"),
    ("Comment", "Preproc", "cp"),
    ("Comment", "Single", "c1"),
    ("Comment", "Special", "cs"),
    ("", "Generic", "g"),
    ("Generic", "Deleted", "gd"),
    ("Generic", "Emph", "ge"),
    ("Generic", "Error", "gr"),
    ("Generic", "Heading", "gh"),
    ("Generic", "Inserted", "gi"),
    ("Generic", "Output", "go"),
    ("Generic", "Prompt", "gp"),
    ("Generic", "Strong", "gs"),
];

impl TokenTree {
    /// Create a taxonomy holding only the root
    pub fn new() -> Self {
        let root = TokenNode {
            path: String::new(),
            parent: None,
            class: None,
        };
        let mut by_path = HashMap::new();
        by_path.insert(String::new(), TokenId(0));
        Self {
            nodes: vec![root],
            by_path,
            text: TokenId(0),
        }
    }

    /// Create the standard highlighting taxonomy
    ///
    /// `String` and `Number` are reachable both under `Literal` and as
    /// top-level aliases.
    pub fn standard() -> Self {
        let mut tree = Self::new();
        for &(parent, name, class) in STANDARD_TOKENS {
            let parent = tree.lookup(parent).unwrap_or_else(|| tree.root());
            tree.add(parent, name, Some(class));
        }
        for alias in ["String", "Number"] {
            if let Some(id) = tree.lookup(&format!("Literal.{}", alias)) {
                tree.by_path.insert(alias.to_string(), id);
            }
        }
        if let Some(text) = tree.lookup("Text") {
            tree.text = text;
        }
        tree
    }

    /// The root node
    pub fn root(&self) -> TokenId {
        TokenId(0)
    }

    /// Add a child node, returning the existing one if the path is taken
    ///
    /// An unknown parent attaches the node to the root.
    pub fn add(&mut self, parent: TokenId, name: &str, class: Option<&str>) -> TokenId {
        let parent = if parent.0 < self.nodes.len() { parent } else { self.root() };
        let parent_path = &self.nodes[parent.0].path;
        let path = if parent_path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", parent_path, name)
        };
        if let Some(&existing) = self.by_path.get(&path) {
            return existing;
        }

        let id = TokenId(self.nodes.len());
        self.nodes.push(TokenNode {
            path: path.clone(),
            parent: Some(parent),
            class: class.map(str::to_string),
        });
        self.by_path.insert(path, id);
        id
    }

    /// Register (or clear) the CSS class of a node
    pub fn set_class(&mut self, id: TokenId, class: Option<&str>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.class = class.map(str::to_string);
        }
    }

    /// Choose the node used for unstyled text
    pub fn set_text_token(&mut self, id: TokenId) {
        if id.0 < self.nodes.len() {
            self.text = id;
        }
    }

    /// Find a node by dotted path, with or without a leading `Token.`
    pub fn lookup(&self, path: &str) -> Option<TokenId> {
        let path = match path {
            "Token" => "",
            _ => path.strip_prefix("Token.").unwrap_or(path),
        };
        self.by_path.get(path).copied()
    }

    /// Dotted path of a node, empty for the root
    pub fn path(&self, id: TokenId) -> Option<&str> {
        self.nodes.get(id.0).map(|node| node.path.as_str())
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for TokenTree {
    fn default() -> Self {
        Self::standard()
    }
}

impl Taxonomy for TokenTree {
    fn canonical_class_name(&self, tag: TokenId) -> Option<&str> {
        self.nodes.get(tag.0)?.class.as_deref()
    }

    fn parent(&self, tag: TokenId) -> Option<TokenId> {
        self.nodes.get(tag.0)?.parent
    }

    fn display_name(&self, tag: TokenId) -> String {
        match self.path(tag) {
            Some(path) if !path.is_empty() => format!("class:pygments.{}", path.to_lowercase()),
            _ => "class:pygments".to_string(),
        }
    }

    fn text_token(&self) -> TokenId {
        self.text
    }
}
