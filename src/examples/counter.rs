//! A numeric counter puzzle.
//!
//! Starting from some count, each move replaces `n` with `3n - 1` or with
//! `n / 2` (integer division); the puzzle is solved on reaching the target
//! exactly, and a count of zero is hopeless. The state space is infinite in
//! the `3n - 1` direction, which makes this a handy stress case for
//! filter-gated search.

use std::fmt;
use std::sync::Arc;

use crate::solver::{
    funnel::{Funnel, PrimitiveSink},
    state::PuzzleState,
};

/// One counter value on its way to the target.
///
/// Equality and hash cover the count only: the target is search-wide
/// configuration and the predecessor is path data, so neither takes part in
/// deduplication.
#[derive(Debug, Clone)]
pub struct CounterState {
    count: i64,
    target: i64,
    pred: Option<Arc<CounterState>>,
}

impl CounterState {
    pub fn new(count: i64, target: i64) -> Self {
        Self {
            count,
            target,
            pred: None,
        }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    fn step(&self, count: i64) -> Self {
        Self {
            count,
            target: self.target,
            pred: Some(Arc::new(self.clone())),
        }
    }
}

impl PartialEq for CounterState {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count
    }
}
impl Eq for CounterState {}

impl std::hash::Hash for CounterState {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.count.hash(state);
    }
}

impl fmt::Display for CounterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count)
    }
}

impl PuzzleState for CounterState {
    fn is_solution(&self) -> bool {
        self.count == self.target
    }

    fn is_hopeless(&self) -> bool {
        self.count == 0
    }

    fn successors(&self) -> Box<dyn Iterator<Item = Self> + Send + '_> {
        let count = self.count;
        Box::new(
            [count * 3 - 1, count / 2]
                .into_iter()
                .filter(move |&c| c != count)
                .map(|c| self.step(c)),
        )
    }

    fn predecessor(&self) -> Option<&Self> {
        self.pred.as_deref()
    }

    fn funnel(&self) -> Option<Arc<dyn Funnel<Self>>> {
        Some(Arc::new(|state: &Self, sink: &mut dyn PrimitiveSink| {
            sink.put_i64(state.count)
        }))
    }
}
