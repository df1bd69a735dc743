//! Capturing styled matches during a scan
//!
//! A styled rule records `(start, end, style)` into the [`ScanContext`]
//! every time it matches. The context is a journal: combinators take a
//! [`ScanContext::mark`] before trying a branch and roll back to it when
//! the branch fails, so backtracked matches never leave captures behind.

use std::collections::BTreeMap;
use std::ops::Range;

use super::rules::Rule;
use super::style::StyleTag;

/// A styled match recorded during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Byte offset where the match starts (after skipping)
    pub start: usize,
    /// Byte offset where the match ends (exclusive)
    pub end: usize,
    /// Style of the rule that matched
    pub style: StyleTag,
}

impl Capture {
    /// Create a new capture
    pub fn new(start: usize, end: usize, style: StyleTag) -> Self {
        Self { start, end, style }
    }

    /// The captured text, sliced from the original input
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.range()).unwrap_or("")
    }

    /// Byte range of the capture
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if the capture covers no text
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Position in the capture journal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// Call-scoped capture journal
///
/// Created empty for every highlight call and consumed by
/// [`ScanContext::into_table`] once the scan is done.
#[derive(Debug, Default)]
pub struct ScanContext {
    journal: Vec<Capture>,
}

impl ScanContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful styled match
    pub fn record(&mut self, capture: Capture) {
        self.journal.push(capture);
    }

    /// Current journal position
    pub fn mark(&self) -> Mark {
        Mark(self.journal.len())
    }

    /// Forget every capture recorded after `mark`
    pub fn rollback(&mut self, mark: Mark) {
        self.journal.truncate(mark.0);
    }

    /// Captures recorded after `mark`
    pub fn since(&self, mark: Mark) -> &[Capture] {
        self.journal.get(mark.0..).unwrap_or(&[])
    }

    /// Every capture recorded so far, in recording order
    pub fn captures(&self) -> &[Capture] {
        &self.journal
    }

    /// Re-record captures from a cached match
    pub fn replay(&mut self, captures: &[Capture]) {
        self.journal.extend_from_slice(captures);
    }

    /// Number of captures recorded so far
    pub fn len(&self) -> usize {
        self.journal.len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }

    /// Collapse the journal into one capture per start offset
    ///
    /// Later records win, so an outer styled rule that starts where an
    /// inner one does (and finishes after it) keeps its style.
    pub fn into_table(self) -> CaptureTable {
        let mut by_start = BTreeMap::new();
        for capture in self.journal {
            by_start.insert(capture.start, capture);
        }
        CaptureTable { by_start }
    }
}

/// Captures keyed by start offset
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CaptureTable {
    by_start: BTreeMap<usize, Capture>,
}

impl CaptureTable {
    /// Capture starting at `offset`, if any
    pub fn get(&self, offset: usize) -> Option<&Capture> {
        self.by_start.get(&offset)
    }

    /// Captures in ascending start order
    pub fn iter(&self) -> impl Iterator<Item = &Capture> {
        self.by_start.values()
    }

    /// Number of captures
    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    /// Check if nothing was captured
    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }
}

impl FromIterator<Capture> for CaptureTable {
    fn from_iter<I: IntoIterator<Item = Capture>>(iter: I) -> Self {
        let mut scan = ScanContext::new();
        for capture in iter {
            scan.record(capture);
        }
        scan.into_table()
    }
}

/// Wrap a rule so its matches are captured with `style`
///
/// The wrapped rule matches exactly what `rule` matches.
pub fn wrap(style: impl Into<StyleTag>, rule: Rule) -> Rule {
    Rule::Capture {
        style: style.into(),
        rule: Box::new(rule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollback_discards_captures() {
        let mut scan = ScanContext::new();
        scan.record(Capture::new(0, 1, StyleTag::class("a")));
        let mark = scan.mark();
        scan.record(Capture::new(2, 3, StyleTag::class("b")));
        assert_eq!(scan.since(mark).len(), 1);

        scan.rollback(mark);
        assert_eq!(scan.len(), 1);
        assert!(scan.since(mark).is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let table: CaptureTable = vec![
            Capture::new(0, 1, StyleTag::class("inner")),
            Capture::new(0, 4, StyleTag::class("outer")),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0).unwrap().style, StyleTag::class("outer"));
    }

    #[test]
    fn test_table_is_sorted() {
        let table: CaptureTable = vec![
            Capture::new(5, 6, StyleTag::class("b")),
            Capture::new(1, 2, StyleTag::class("a")),
        ]
        .into_iter()
        .collect();

        let starts: Vec<_> = table.iter().map(|c| c.start).collect();
        assert_eq!(starts, vec![1, 5]);
    }

    #[test]
    fn test_capture_text() {
        let capture = Capture::new(3, 5, StyleTag::class("int"));
        assert_eq!(capture.text("1, 42"), "42");
        assert_eq!(Capture::new(3, 9, StyleTag::plain()).text("1, 42"), "");
    }
}
