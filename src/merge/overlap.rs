use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::model::*;

/// A record that overlaps an earlier record of the same identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap<K> {
    pub key: K,
    /// The earlier same-identity record reaching furthest past `second`'s start.
    pub first: RecordId,
    pub second: RecordId,
    /// The intersection of the two spans.
    pub span: Span,
}

/// Report same-identity records that overlap in time, at most one per record.
///
/// Records are walked in start order. Each one is checked only against the
/// earlier record of its identity with the furthest end, so a pile of
/// identical spans yields `n - 1` overlaps, not every pair.
///
/// The mergers only chain on exact adjacency, so overlapping records end up
/// in separate groups. This lets callers see those cases instead of guessing.
pub fn find_overlaps<T: Reservation>(items: &[T]) -> Vec<Overlap<T::Key>> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|r| r.span().start);

    let mut furthest: HashMap<T::Key, &T> = HashMap::new();
    let mut found = Vec::new();
    for r in sorted {
        let span = r.span();
        match furthest.entry(r.key()) {
            Entry::Vacant(e) => {
                e.insert(r);
            }
            Entry::Occupied(mut e) => {
                let prev = *e.get();
                let prev_span = prev.span();
                if prev_span.overlaps(&span) {
                    found.push(Overlap {
                        key: e.key().clone(),
                        first: prev.id().clone(),
                        second: r.id().clone(),
                        span: Span::new(span.start, prev_span.end.min(span.end)),
                    });
                }
                if span.end > prev_span.end {
                    e.insert(r);
                }
            }
        }
    }
    found
}
