//! The event contract consumed by the merge engine.
//!
//! An event occupies the half-open interval `[start, end)`: two events where
//! one ends exactly when the other starts are adjacent, not overlapping.
//! Callers treat events as immutable; the setters exist so the engine can
//! derive boundary-adjusted fragments from clones.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-bounded entity that can take part in a merge.
///
/// `Clone` must be a deep copy: every payload field (ids, labels, ...) has to
/// survive unchanged, since one source event may be split into two fragments.
pub trait Event: Clone {
    /// Opaque timestamp type. Only its ordering matters to the engine.
    type Instant: Ord + Copy + Debug;

    fn start(&self) -> Self::Instant;

    fn end(&self) -> Self::Instant;

    fn set_start(&mut self, start: Self::Instant);

    fn set_end(&mut self, end: Self::Instant);

    /// Clone of this event starting at `start` instead.
    fn with_start(&self, start: Self::Instant) -> Self {
        let mut fragment = self.clone();
        fragment.set_start(start);
        fragment
    }

    /// Clone of this event ending at `end` instead.
    fn with_end(&self, end: Self::Instant) -> Self {
        let mut fragment = self.clone();
        fragment.set_end(end);
        fragment
    }

    /// Half-open overlap test: `a.start < b.end && b.start < a.end`.
    fn overlaps(&self, other: &Self) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }

    fn is_well_formed(&self) -> bool {
        self.start() < self.end()
    }
}

/// Supplies the key an event is ordered by before merging.
///
/// Higher keys are more desirable and win contested time.
pub trait Desirability {
    type Key: Ord;

    fn desirability(&self) -> Self::Key;
}

/// A calendar booking with an external id and an integer desirability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Opaque identifier, carried unchanged onto every fragment.
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Larger values win. Equal values fall back to input order.
    #[serde(default)]
    pub desirability: i64,
}

impl ScheduledEvent {
    pub fn new(
        id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        desirability: i64,
    ) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            desirability,
        }
    }
}

impl Event for ScheduledEvent {
    type Instant = DateTime<Utc>;

    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }

    fn set_start(&mut self, start: DateTime<Utc>) {
        self.start = start;
    }

    fn set_end(&mut self, end: DateTime<Utc>) {
        self.end = end;
    }
}

impl Desirability for ScheduledEvent {
    type Key = i64;

    fn desirability(&self) -> i64 {
        self.desirability
    }
}
