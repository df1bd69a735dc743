//! Output adapters for highlighted fragments
//!
//! Fragments go out either as a styled list for terminal display or as
//! HTML where every styled run becomes a `<span>` with CSS classes.

use super::style::{Fragment, StyleTag};
use super::tokens::{css_class, Taxonomy};

/// Prepare fragments for terminal display
///
/// With a taxonomy, token styles are replaced by their display name
/// (`class:pygments.keyword`); free-form styles pass through unchanged.
pub fn terminal_fragments(
    fragments: Vec<Fragment>,
    taxonomy: Option<&dyn Taxonomy>,
) -> Vec<Fragment> {
    let Some(taxonomy) = taxonomy else {
        return fragments;
    };
    fragments
        .into_iter()
        .map(|fragment| match fragment.style {
            StyleTag::Token(id) => Fragment::new(taxonomy.display_name(id), fragment.text),
            StyleTag::Str(_) => fragment,
        })
        .collect()
}

/// CSS classes for one style
///
/// Token styles resolve through the taxonomy's parent chain; free-form
/// styles contribute the name of every `class:<name>` part. Empty names
/// are dropped.
pub fn html_classes(style: &StyleTag, taxonomy: Option<&dyn Taxonomy>) -> Vec<String> {
    let classes: Vec<String> = match style {
        StyleTag::Token(id) => taxonomy
            .map(|taxonomy| vec![css_class(taxonomy, *id).to_string()])
            .unwrap_or_default(),
        StyleTag::Str(_) => style.class_names().map(escape_html).collect(),
    };
    classes.into_iter().filter(|class| !class.is_empty()).collect()
}

/// Render fragments as HTML
///
/// The result is wrapped in `<span class="highlight">`. Fragments
/// without any class are emitted as bare escaped text.
pub fn render_html(fragments: &[Fragment], taxonomy: Option<&dyn Taxonomy>) -> String {
    let mut html = String::from("<span class=\"highlight\">");
    for fragment in fragments {
        let classes = html_classes(&fragment.style, taxonomy);
        let text = escape_html(&fragment.text);
        if classes.is_empty() {
            html.push_str(&text);
        } else {
            html.push_str(&format!("<span class=\"{}\">{}</span>", classes.join(" "), text));
        }
    }
    html.push_str("</span>");
    html
}

/// Escape text for HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::TokenTree;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_free_form_classes() {
        let style = StyleTag::from("bold class:int class:<x> class:");
        assert_eq!(html_classes(&style, None), vec!["int", "&lt;x&gt;"]);
        assert!(html_classes(&StyleTag::from("fg:red"), None).is_empty());
    }

    #[test]
    fn test_token_classes() {
        let tree = TokenTree::standard();
        let constant = StyleTag::Token(tree.lookup("Keyword.Constant").unwrap());
        let text = StyleTag::Token(tree.text_token());

        assert_eq!(html_classes(&constant, Some(&tree)), vec!["kc"]);
        assert!(html_classes(&text, Some(&tree)).is_empty());
        assert!(html_classes(&constant, None).is_empty());
    }

    #[test]
    fn test_render_html() {
        let fragments = vec![
            Fragment::new("class:int", "1"),
            Fragment::new("", " < "),
            Fragment::new("class:int class:big", "2"),
        ];
        assert_eq!(
            render_html(&fragments, None),
            "<span class=\"highlight\"><span class=\"int\">1</span> &lt; \
             <span class=\"int big\">2</span></span>"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_html(&[], None), "<span class=\"highlight\"></span>");
    }

    #[test]
    fn test_terminal_fragments() {
        let tree = TokenTree::standard();
        let keyword = tree.lookup("Keyword").unwrap();
        let fragments = vec![
            Fragment::new(keyword, "fn"),
            Fragment::new("class:plain", " "),
        ];

        let converted = terminal_fragments(fragments.clone(), Some(&tree));
        assert_eq!(converted[0], Fragment::new("class:pygments.keyword", "fn"));
        assert_eq!(converted[1], fragments[1]);
        assert_eq!(terminal_fragments(fragments.clone(), None), fragments);
    }
}
