//! Chronological k-way merge of several occurrence streams.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use chrono::NaiveDateTime;
use eventide_core::model::Scheduling;
use eventide_rfc::rfc::recurrence::RecurrenceRule;

use super::{OccurrenceIter, Occurrences};

/// Prepared expansion of several schedulings.
#[derive(Debug, Clone)]
pub struct MergedOccurrences<R> {
    sources: Vec<Occurrences<R>>,
}

impl<R: RecurrenceRule> MergedOccurrences<R> {
    pub(crate) fn new(sources: Vec<Occurrences<R>>) -> Self {
        Self { sources }
    }

    /// Per-scheduling expansions, in input order.
    #[must_use]
    pub fn sources(&self) -> &[Occurrences<R>] {
        &self.sources
    }

    /// Returns whether any scheduling has a never-ending rule.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.sources.iter().any(Occurrences::is_unbounded)
    }

    /// ## Summary
    /// Starts a fresh pass yielding the occurrences of all schedulings in
    /// ascending start order.
    ///
    /// Occurrences with identical starts come out in input order.
    #[must_use]
    pub fn iter(&self) -> MergedIter<'_> {
        let state = match self.sources.as_slice() {
            [single] => MergeState::Single(single.iter()),
            sources => {
                let mut iters: Vec<_> = sources.iter().map(Occurrences::iter).collect();
                let mut queue = BinaryHeap::with_capacity(iters.len());
                for (source, iter) in iters.iter_mut().enumerate() {
                    if let Some(occurrence) = iter.next() {
                        queue.push(Reverse(Pending::new(source, occurrence)));
                    }
                }
                MergeState::Heap { iters, queue }
            }
        };
        MergedIter { state }
    }
}

impl<'a, R: RecurrenceRule> IntoIterator for &'a MergedOccurrences<R> {
    type Item = Scheduling;
    type IntoIter = MergedIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the merged occurrences of several schedulings.
#[derive(Debug)]
pub struct MergedIter<'a> {
    state: MergeState<'a>,
}

#[derive(Debug)]
enum MergeState<'a> {
    Single(OccurrenceIter<'a>),
    Heap {
        iters: Vec<OccurrenceIter<'a>>,
        queue: BinaryHeap<Reverse<Pending>>,
    },
}

impl Iterator for MergedIter<'_> {
    type Item = Scheduling;

    fn next(&mut self) -> Option<Scheduling> {
        match &mut self.state {
            MergeState::Single(iter) => iter.next(),
            MergeState::Heap { iters, queue } => {
                let Reverse(Pending {
                    source, occurrence, ..
                }) = queue.pop()?;

                if let Some(next) = iters.get_mut(source).and_then(Iterator::next) {
                    queue.push(Reverse(Pending::new(source, next)));
                }
                Some(occurrence)
            }
        }
    }
}

/// Head of one source stream, ordered by start and then by source index.
#[derive(Debug)]
struct Pending {
    start: NaiveDateTime,
    source: usize,
    occurrence: Scheduling,
}

impl Pending {
    fn new(source: usize, occurrence: Scheduling) -> Self {
        Self {
            start: occurrence.start(),
            source,
            occurrence,
        }
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.source.cmp(&other.source))
    }
}
