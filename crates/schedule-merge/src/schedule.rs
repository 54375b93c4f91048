//! Ordering collaborator: arranges events least desirable first.

use crate::event::{Desirability, Event};

/// A collection of events that can order itself by desirability.
///
/// The sort must be stable. When two equally desirable events overlap, the
/// one that comes later in the stable order is folded last and wins.
pub trait Schedule {
    type Event: Event;

    /// Sort in place, ascending by desirability.
    fn sort_by_desirability(&mut self);

    /// Snapshot of the events in their current order.
    fn events(&self) -> Vec<Self::Event>;
}

impl<E> Schedule for Vec<E>
where
    E: Event + Desirability,
{
    type Event = E;

    fn sort_by_desirability(&mut self) {
        // `sort_by_key` is stable.
        self.sort_by_key(|event| event.desirability());
    }

    fn events(&self) -> Vec<E> {
        self.clone()
    }
}
