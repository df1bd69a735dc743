//! Rebuilding a gapless fragment sequence from scan captures

use super::capture::CaptureTable;
use super::style::{Fragment, StyleTag};

/// Merge captures with default-style filler into fragments covering `text`
///
/// Walks the text left to right. A capture starting at the current
/// position becomes a styled fragment; any other capture starting inside
/// it is dropped, whether properly nested or not. Text before the next
/// remaining capture becomes a `default_style` fragment. Empty captures
/// never produce fragments.
///
/// The fragment texts concatenate to `text`, and there are at most
/// `2 * captures.len() + 1` of them.
pub fn reconstruct(
    text: &str,
    captures: &CaptureTable,
    default_style: &StyleTag,
) -> Vec<Fragment> {
    let mut starts: Vec<usize> = captures
        .iter()
        .filter(|c| !c.is_empty() && text.get(c.range()).is_some())
        .map(|c| c.start)
        .collect();
    starts.push(text.len());

    let mut fragments = Vec::with_capacity(starts.len() * 2);
    let mut next = 0;
    let mut pos = 0;

    while pos < text.len() {
        // Starts already covered by an emitted fragment are superseded
        while starts[next] < pos {
            next += 1;
        }

        if starts[next] == pos {
            if let Some(capture) = captures.get(pos) {
                fragments.push(Fragment::new(capture.style.clone(), &text[pos..capture.end]));
                pos = capture.end;
                next += 1;
                continue;
            }
        }

        let boundary = starts[next];
        fragments.push(Fragment::new(default_style.clone(), &text[pos..boundary]));
        pos = boundary;
    }

    fragments
}
