//! Partition the gaps between matched pairs into Change/Add/Delete hunks.

use std::iter;

use super::{Hunk, MatchedPair, Side};

/// Scan the ascending matched pairs and classify every gap before a match.
///
/// Two cursors hold the next unprocessed line on each side, starting at 1.
/// Each pair `(b, a)` closes the gap `[cursor_b, b-1]` / `[cursor_a, a-1]`:
/// both sides non-empty is a Change, only before is a Delete, only after is
/// an Add, neither emits nothing. The cursors then jump past the pair.
///
/// A virtual pair `(m+1, n+1)` is appended so trailing unmatched lines are
/// flushed by the same rule; with no pairs at all this yields one hunk
/// covering everything.
pub fn classify<'a, T>(before: &'a [T], after: &'a [T], pairs: &[MatchedPair]) -> Vec<Hunk<'a, T>> {
    let sentinel = MatchedPair::new(before.len() + 1, after.len() + 1);
    let mut next_before = 1;
    let mut next_after = 1;
    let mut hunks = Vec::new();

    for pair in pairs.iter().copied().chain(iter::once(sentinel)) {
        debug_assert!(pair.before >= next_before && pair.after >= next_after);

        let has_before = next_before < pair.before;
        let has_after = next_after < pair.after;

        let hunk = match (has_before, has_after) {
            (true, true) => Some(Hunk::Change {
                before: Side::of(before, next_before, pair.before - 1),
                after: Side::of(after, next_after, pair.after - 1),
            }),
            (true, false) => Some(Hunk::Delete {
                before: Side::of(before, next_before, pair.before - 1),
            }),
            (false, true) => Some(Hunk::Add {
                after: Side::of(after, next_after, pair.after - 1),
            }),
            (false, false) => None,
        };

        if let Some(hunk) = hunk {
            log::trace!(
                "{:?} hunk: before {:?}, after {:?}",
                hunk.kind(),
                hunk.before().map(|s| s.range),
                hunk.after().map(|s| s.range)
            );
            hunks.push(hunk);
        }

        next_before = pair.before + 1;
        next_after = pair.after + 1;
    }

    hunks
}
