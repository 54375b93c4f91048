//! The merge engine: folds desirability-ordered events into a conflict-free
//! timeline.
//!
//! Events are consumed least desirable first, so each newly folded event beats
//! everything already on the timeline. The timeline is kept sorted by start
//! time and pairwise non-overlapping after every insertion.
//!
//! Each insertion rebuilds the timeline from three zones:
//!
//! 1. the untouched prefix -- fragments ending at or before the new start,
//! 2. the spliced middle -- candidates classified with [`classify`],
//! 3. the untouched suffix -- candidates after the new event has been placed
//!    and no further overlap is possible.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{MergeError, Result};
use crate::event::Event;
use crate::relation::{classify, Relation};
use crate::schedule::Schedule;

/// What happens to the losing side of an overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// The less desirable event is dropped whole.
    #[default]
    Discard,
    /// The less desirable event keeps the parts that are still free, as up
    /// to two fragments.
    Trim,
}

impl OverlapPolicy {
    pub fn from_trim(trim: bool) -> Self {
        if trim {
            OverlapPolicy::Trim
        } else {
            OverlapPolicy::Discard
        }
    }
}

/// Resolves one fixed set of events into a timeline. Runs at most once.
#[derive(Debug, Clone)]
pub struct Engine<E: Event> {
    /// Not yet folded, least desirable first.
    pending: Vec<E>,
    /// Sorted by start, pairwise non-overlapping.
    resolved: Vec<E>,
    policy: OverlapPolicy,
    finished: bool,
}

impl<E: Event> Engine<E> {
    /// Sort `schedule` by desirability and take a snapshot of it.
    ///
    /// Later changes to `schedule` do not affect the engine.
    ///
    /// # Errors
    /// Returns `MergeError::InvalidInterval` if any event has `start >= end`.
    pub fn new<S>(schedule: &mut S, policy: OverlapPolicy) -> Result<Self>
    where
        S: Schedule<Event = E> + ?Sized,
    {
        schedule.sort_by_desirability();
        Self::from_ordered(schedule.events(), policy)
    }

    /// Build an engine from events already ordered least desirable first.
    ///
    /// # Errors
    /// Returns `MergeError::InvalidInterval` if any event has `start >= end`.
    pub fn from_ordered(events: Vec<E>, policy: OverlapPolicy) -> Result<Self> {
        if let Some((index, event)) = events
            .iter()
            .enumerate()
            .find(|(_, event)| !event.is_well_formed())
        {
            return Err(MergeError::InvalidInterval {
                index,
                start: format!("{:?}", event.start()),
                end: format!("{:?}", event.end()),
            });
        }

        Ok(Self {
            pending: events,
            resolved: Vec::new(),
            policy,
            finished: false,
        })
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Events not yet folded into the timeline.
    pub fn pending(&self) -> &[E] {
        &self.pending
    }

    /// The timeline as of the last [`merge`](Engine::merge); empty before.
    pub fn resolved(&self) -> &[E] {
        &self.resolved
    }

    pub fn into_resolved(mut self) -> Vec<E> {
        self.merge();
        self.resolved
    }

    /// Fold every pending event into the timeline and return it.
    ///
    /// Calling this again returns the same timeline without recomputing it.
    pub fn merge(&mut self) -> &[E] {
        if self.finished {
            return &self.resolved;
        }

        let pending = std::mem::take(&mut self.pending);
        debug!(events = pending.len(), policy = ?self.policy, "merging schedule");

        for incoming in pending {
            let timeline = std::mem::take(&mut self.resolved);
            self.resolved = self.insert(timeline, incoming);
        }

        debug!(fragments = self.resolved.len(), "merge finished");
        self.finished = true;
        &self.resolved
    }

    /// Splice `incoming` into `timeline`, returning the new timeline.
    fn insert(&self, timeline: Vec<E>, incoming: E) -> Vec<E> {
        let (new_start, new_end) = (incoming.start(), incoming.end());

        // Fragments ending at or before the new start are untouched. Since the
        // timeline is sorted and non-overlapping, the first fragment that does
        // not qualify ends the prefix.
        let prefix_len = timeline
            .iter()
            .position(|fragment| fragment.end() > new_start)
            .unwrap_or(timeline.len());

        let mut splice = Splice::new(incoming, timeline.len() + 2);
        let mut fragments = timeline.into_iter();
        splice.extend(fragments.by_ref().take(prefix_len));

        for candidate in fragments.by_ref() {
            let (cand_start, cand_end) = (candidate.start(), candidate.end());
            let relation = classify(new_start, new_end, cand_start, cand_end);
            trace!(
                ?relation,
                new = ?(new_start, new_end),
                candidate = ?(cand_start, cand_end),
                "classified"
            );

            match relation {
                Relation::Before => {
                    splice.place();
                    splice.push(candidate);
                    break;
                }
                Relation::After => splice.push(candidate),
                Relation::Covers => splice.place(),
                Relation::Within => {
                    debug_assert!(!splice.is_placed(), "placed before an enclosing fragment");
                    match self.policy {
                        OverlapPolicy::Discard => splice.place(),
                        OverlapPolicy::Trim => {
                            splice.push_head(&candidate, new_start);
                            splice.place();
                            splice.push_tail(&candidate, new_end);
                        }
                    }
                    break;
                }
                Relation::ClipsHead => {
                    splice.place();
                    if self.policy == OverlapPolicy::Trim {
                        splice.push_tail(&candidate, new_end);
                    }
                }
                Relation::ClipsTail => {
                    if self.policy == OverlapPolicy::Trim {
                        splice.push_head(&candidate, new_start);
                    }
                }
            }
        }

        splice.extend(fragments);
        splice.finish()
    }
}

/// Sort `schedule` by desirability and resolve it in one call.
///
/// # Errors
/// Returns `MergeError::InvalidInterval` if any event has `start >= end`.
pub fn merge_schedule<S>(schedule: &mut S, policy: OverlapPolicy) -> Result<Vec<S::Event>>
where
    S: Schedule + ?Sized,
{
    Ok(Engine::new(schedule, policy)?.into_resolved())
}

/// Whether the incoming event has been emitted yet. Transitions once.
enum Placement<E> {
    Pending(E),
    Placed,
}

/// Output buffer for a single insertion.
struct Splice<E: Event> {
    out: Vec<E>,
    placement: Placement<E>,
}

impl<E: Event> Splice<E> {
    fn new(incoming: E, capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            placement: Placement::Pending(incoming),
        }
    }

    fn is_placed(&self) -> bool {
        matches!(self.placement, Placement::Placed)
    }

    /// Emit the incoming event unless it already has been.
    fn place(&mut self) {
        if let Placement::Pending(incoming) =
            std::mem::replace(&mut self.placement, Placement::Placed)
        {
            self.out.push(incoming);
        }
    }

    fn push(&mut self, fragment: E) {
        self.out.push(fragment);
    }

    /// Emit the part of `source` before `cut`, if it is not empty.
    fn push_head(&mut self, source: &E, cut: E::Instant) {
        if source.start() < cut {
            self.out.push(source.with_end(cut));
        }
    }

    /// Emit the part of `source` from `cut` on, if it is not empty.
    fn push_tail(&mut self, source: &E, cut: E::Instant) {
        if cut < source.end() {
            self.out.push(source.with_start(cut));
        }
    }

    fn extend(&mut self, fragments: impl IntoIterator<Item = E>) {
        self.out.extend(fragments);
    }

    /// Close the splice. An incoming event that outlasted every candidate
    /// goes last.
    fn finish(mut self) -> Vec<E> {
        self.place();
        self.out
    }
}
