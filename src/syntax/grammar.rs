//! The grammar capability consumed by the scan driver

use std::fmt;

use super::capture::ScanContext;

/// A fault raised by grammar logic
///
/// Anything other than an ordinary non-match: a user rule that failed,
/// a match end outside the input, a panic caught by the scan driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarFault {
    /// Short name of the fault ("Panic", "InvalidMatch", ...)
    pub kind: String,
    /// Human-readable detail
    pub message: String,
}

impl GrammarFault {
    /// Create a new fault
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for GrammarFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GrammarFault {}

/// Result of one match attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Matched, consuming input up to `end`
    Matched { end: usize },
    /// The grammar does not match here (expected, drives the scan)
    NoMatch,
    /// Something went wrong inside grammar logic
    Fault(GrammarFault),
}

impl MatchOutcome {
    /// Check for a successful match
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}

/// A grammar that can be scanned across a text
///
/// Implementations may cache match results per offset; the scan driver
/// calls [`Grammar::invalidate_cache`] before every scan because an
/// instance is reused across unrelated inputs.
pub trait Grammar {
    /// Attempt a match starting exactly at `offset`
    ///
    /// Styled sub-rules record their captures into `scan`.
    fn match_at(&self, text: &str, offset: usize, scan: &mut ScanContext) -> MatchOutcome;

    /// Skip insignificant input (whitespace, comments) from `offset`
    ///
    /// An error here is fatal to the scan.
    fn skip(&self, text: &str, offset: usize) -> Result<usize, GrammarFault>;

    /// Drop any cached match results
    fn invalidate_cache(&self);
}

impl<G: Grammar + ?Sized> Grammar for Box<G> {
    fn match_at(&self, text: &str, offset: usize, scan: &mut ScanContext) -> MatchOutcome {
        (**self).match_at(text, offset, scan)
    }

    fn skip(&self, text: &str, offset: usize) -> Result<usize, GrammarFault> {
        (**self).skip(text, offset)
    }

    fn invalidate_cache(&self) {
        (**self).invalidate_cache()
    }
}

/// Advance `pos` to the next char boundary after it
pub(crate) fn next_boundary(text: &str, pos: usize) -> usize {
    let mut next = pos + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_boundary_ascii() {
        assert_eq!(next_boundary("abc", 0), 1);
        assert_eq!(next_boundary("abc", 3), 4);
    }

    #[test]
    fn test_next_boundary_multibyte() {
        let text = "aé€b";
        assert_eq!(next_boundary(text, 1), 3);
        assert_eq!(next_boundary(text, 3), 6);
        assert_eq!(next_boundary(text, 6), 7);
    }

    #[test]
    fn test_fault_display() {
        let fault = GrammarFault::new("Panic", "boom");
        assert_eq!(fault.to_string(), "Panic: boom");
    }
}
