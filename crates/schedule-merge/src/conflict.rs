//! Pairwise overlap reports over a single event list.
//!
//! Useful before a merge, to see which bookings contend for the same time, and
//! after one, to check that a timeline is conflict-free. Adjacent events (one
//! ends exactly when the other starts) are NOT conflicts.

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Two events that share time, plus the shared region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict<E: Event> {
    /// The event appearing first in the input list.
    pub earlier: E,
    /// The event appearing later in the input list.
    pub later: E,
    pub overlap_start: E::Instant,
    pub overlap_end: E::Instant,
}

/// Find every pair of events in `events` whose time ranges overlap.
///
/// Two events overlap when `a.start < b.end && b.start < a.end`.
/// The shared region is `[max(a.start, b.start), min(a.end, b.end))`.
/// Pairs are reported in input order: `(0, 1), (0, 2), ..., (1, 2), ...`.
pub fn find_conflicts<E: Event>(events: &[E]) -> Vec<Conflict<E>> {
    let mut conflicts = Vec::new();

    for (i, a) in events.iter().enumerate() {
        for b in &events[i + 1..] {
            if a.overlaps(b) {
                conflicts.push(Conflict {
                    earlier: a.clone(),
                    later: b.clone(),
                    overlap_start: a.start().max(b.start()),
                    overlap_end: a.end().min(b.end()),
                });
            }
        }
    }

    conflicts
}

/// Whether no two events in `events` overlap.
///
/// Sorted input is checked in linear time; anything else falls back to the
/// pairwise scan.
pub fn is_conflict_free<E: Event>(events: &[E]) -> bool {
    if events.windows(2).all(|w| w[0].start() <= w[1].start()) {
        return events.windows(2).all(|w| w[0].end() <= w[1].start());
    }
    find_conflicts(events).is_empty()
}
