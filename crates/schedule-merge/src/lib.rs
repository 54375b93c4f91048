//! # schedule-merge
//!
//! Flattens a set of prioritized, possibly-overlapping events into one
//! conflict-free timeline.
//!
//! Events are folded in ascending desirability order. Whenever a newly folded
//! event overlaps fragments already on the timeline it wins the contested
//! region; the losers are either discarded or trimmed down to whatever
//! sub-intervals they can still occupy, depending on the [`OverlapPolicy`].
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use schedule_merge::{merge_schedule, OverlapPolicy, ScheduledEvent};
//!
//! let at = |h| Utc.with_ymd_and_hms(2026, 3, 1, h, 0, 0).unwrap();
//! let mut schedule = vec![
//!     ScheduledEvent::new("standup", at(9), at(12), 1),
//!     ScheduledEvent::new("review", at(10), at(11), 2),
//! ];
//!
//! let timeline = merge_schedule(&mut schedule, OverlapPolicy::Trim).unwrap();
//! let ids: Vec<&str> = timeline.iter().map(|e| e.id.as_str()).collect();
//! assert_eq!(ids, ["standup", "review", "standup"]);
//! ```
//!
//! ## Modules
//!
//! - [`event`] -- the `Event` contract and the concrete `ScheduledEvent`
//! - [`schedule`] -- ordering collaborator (stable sort by desirability)
//! - [`relation`] -- classification of two half-open intervals
//! - [`engine`] -- the merge engine and overlap policies
//! - [`conflict`] -- pairwise overlap reports
//! - [`error`] -- Error types

pub mod conflict;
pub mod engine;
pub mod error;
pub mod event;
pub mod relation;
pub mod schedule;

pub use conflict::{find_conflicts, is_conflict_free, Conflict};
pub use engine::{merge_schedule, Engine, OverlapPolicy};
pub use error::MergeError;
pub use event::{Desirability, Event, ScheduledEvent};
pub use relation::{classify, Relation};
pub use schedule::Schedule;
