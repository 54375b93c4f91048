//! Classification of a new event against an existing timeline fragment.
//!
//! Every pair of well-formed half-open intervals falls into exactly one
//! [`Relation`]. Containment is tested before partial overlap, so an interval
//! sharing a boundary with the candidate is never classified as partial:
//!
//! ```text
//! Before     new: [----)              After      new:        [----)
//!            cand:      [----)                   cand: [----)
//!
//! Covers     new: [--------)          Within     new:   [----)
//!            cand:  [----)                       cand: [--------)
//!
//! ClipsHead  new: [----)              ClipsTail  new:     [----)
//!            cand:   [----)                      cand: [----)
//! ```

/// Position of the new (more desirable) interval relative to a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// New ends at or before the candidate starts.
    Before,
    /// New starts at or after the candidate ends.
    After,
    /// New fully contains the candidate, including exact equality.
    Covers,
    /// Candidate fully contains new, sharing at most one boundary.
    Within,
    /// New starts before the candidate and ends inside it.
    ClipsHead,
    /// New starts inside the candidate and ends after it.
    ClipsTail,
}

impl Relation {
    /// Whether the two intervals share any time.
    pub fn overlaps(self) -> bool {
        !matches!(self, Relation::Before | Relation::After)
    }
}

/// Classify `[new_start, new_end)` against `[cand_start, cand_end)`.
///
/// Both intervals must satisfy `start < end`; the result is unspecified
/// otherwise.
pub fn classify<T: Ord>(new_start: T, new_end: T, cand_start: T, cand_end: T) -> Relation {
    if new_end <= cand_start {
        Relation::Before
    } else if cand_end <= new_start {
        Relation::After
    } else if new_start <= cand_start && cand_end <= new_end {
        Relation::Covers
    } else if cand_start <= new_start && new_end <= cand_end {
        Relation::Within
    } else if new_start < cand_start {
        Relation::ClipsHead
    } else {
        Relation::ClipsTail
    }
}
