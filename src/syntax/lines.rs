//! Line-oriented access to highlighted text

use super::style::Fragment;

/// Split fragments at newlines
///
/// Returns one entry per line (a text with `n` newlines has `n + 1`
/// lines). Newlines themselves are dropped, as are fragments left empty
/// by the split.
pub fn split_lines(fragments: &[Fragment]) -> Vec<Vec<Fragment>> {
    let mut lines = Vec::new();
    let mut line = Vec::new();

    for fragment in fragments {
        let mut parts = fragment.text.split('\n');
        if let Some(first) = parts.next() {
            push_part(&mut line, fragment, first);
        }
        for part in parts {
            lines.push(std::mem::take(&mut line));
            push_part(&mut line, fragment, part);
        }
    }
    lines.push(line);
    lines
}

fn push_part(line: &mut Vec<Fragment>, fragment: &Fragment, part: &str) {
    if !part.is_empty() {
        line.push(Fragment::new(fragment.style.clone(), part));
    }
}

/// A highlighted document indexed by line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightedDocument {
    lines: Vec<Vec<Fragment>>,
}

impl HighlightedDocument {
    /// Index fragments covering a whole document
    pub fn new(fragments: &[Fragment]) -> Self {
        Self {
            lines: split_lines(fragments),
        }
    }

    /// Fragments of line `index` (0-based); empty past the last line
    pub fn line(&self, index: usize) -> &[Fragment] {
        self.lines.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterate over lines in order
    pub fn lines(&self) -> impl Iterator<Item = &[Fragment]> {
        self.lines.iter().map(Vec::as_slice)
    }
}
