//! Scanning a grammar across a whole input
//!
//! The driver tries the grammar at every position it has not yet
//! consumed. Non-matches move the cursor by one character; faults in
//! grammar code are reported to a [`DiagnosticSink`] and treated the same
//! way, so one bad spot never stops the rest of the text from being
//! highlighted.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::capture::{CaptureTable, ScanContext};
use super::grammar::{next_boundary, Grammar, GrammarFault, MatchOutcome};
use crate::error::{HighlightError, Result};

/// A non-fatal fault observed while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Offset of the attempt that faulted
    pub offset: usize,
    /// Fault kind ("Panic", "InvalidMatch", ...)
    pub kind: String,
    /// Fault detail
    pub message: String,
}

impl Diagnostic {
    fn from_fault(offset: usize, fault: GrammarFault) -> Self {
        Self {
            offset,
            kind: fault.kind,
            message: fault.message,
        }
    }
}

/// Receiver for scan diagnostics
pub trait DiagnosticSink {
    /// Called once per faulted attempt
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics for inspection
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            offset = diagnostic.offset,
            kind = %diagnostic.kind,
            "exception during parsing: {}",
            diagnostic.message
        );
    }
}

/// Outcome of a scan
#[derive(Debug)]
pub struct ScanReport {
    /// Captures left by successful matches
    pub captures: CaptureTable,
    /// Number of top-level match attempts
    pub attempts: usize,
    /// Number of attempts that faulted
    pub faults: usize,
}

/// Scan `grammar` across `text`, collecting captures
///
/// Only a failure of the grammar's skip step is returned as an error.
/// A match ending before its start, past the input or inside a character
/// is reported like any other fault. The cursor moves forward by at least
/// one character per attempt, so at most `text.len() + 1` attempts are
/// made.
///
/// Panics in grammar code are caught, but the process panic hook still
/// runs for them first. With the default hook that prints a
/// `thread ... panicked at` message to stderr; install a quieter hook with
/// [`std::panic::set_hook`] if that output is unwanted.
pub fn scan<G: Grammar + ?Sized>(
    grammar: &G,
    text: &str,
    sink: &mut dyn DiagnosticSink,
) -> Result<ScanReport> {
    grammar.invalidate_cache();

    let mut scan = ScanContext::new();
    let mut cursor = 0;
    let mut attempts = 0;
    let mut faults = 0;

    while cursor <= text.len() {
        let start = match catch_fault(|| grammar.skip(text, cursor)) {
            Ok(Ok(start)) => start,
            Ok(Err(fault)) | Err(fault) => {
                return Err(HighlightError::FatalGrammar {
                    offset: cursor,
                    message: fault.to_string(),
                });
            }
        };

        // A skip step that moves backwards or off a boundary cannot be trusted
        if start < cursor || start > text.len() || !text.is_char_boundary(start) {
            return Err(HighlightError::FatalGrammar {
                offset: cursor,
                message: format!("skip returned invalid offset {}", start),
            });
        }

        attempts += 1;
        let mark = scan.mark();
        let outcome = match catch_fault(|| grammar.match_at(text, start, &mut scan)) {
            Ok(outcome) => outcome,
            Err(fault) => MatchOutcome::Fault(fault),
        };
        let outcome = match outcome {
            MatchOutcome::Matched { end } if end < start || !text.is_char_boundary(end) => {
                MatchOutcome::Fault(GrammarFault::new(
                    "InvalidMatch",
                    format!("match from {} ended at invalid offset {}", start, end),
                ))
            }
            outcome => outcome,
        };

        cursor = match outcome {
            MatchOutcome::Matched { end } if end > cursor => end,
            MatchOutcome::Matched { .. } => next_boundary(text, start),
            MatchOutcome::NoMatch => {
                scan.rollback(mark);
                next_boundary(text, start)
            }
            MatchOutcome::Fault(fault) => {
                scan.rollback(mark);
                faults += 1;
                sink.report(Diagnostic::from_fault(start, fault));
                next_boundary(text, start)
            }
        };
    }

    tracing::debug!(
        len = text.len(),
        attempts,
        faults,
        captures = scan.len(),
        "scan finished"
    );

    Ok(ScanReport {
        captures: scan.into_table(),
        attempts,
        faults,
    })
}

/// Run grammar code, turning a panic into a fault
fn catch_fault<T>(f: impl FnOnce() -> T) -> std::result::Result<T, GrammarFault> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| GrammarFault::new("Panic", panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
