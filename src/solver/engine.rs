use std::sync::Mutex;

use tracing::debug;

use crate::{
    error::Result,
    solver::{
        filter::StateFilter,
        filters::{bloom::BloomStateFilter, exact::ExactStateFilter},
        state::PuzzleState,
        stats::FilterStats,
    },
};

/// Interface for algorithms that search for solutions to puzzles of the
/// parameterized state type.
pub trait PuzzleSolver<T: PuzzleState> {
    /// Finds a solution to the puzzle defined by the initial state.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(path))` with the states from the initial state to a
    ///   solution state, inclusive.
    /// * `Ok(None)` if no solution is reachable from the initial state
    ///   under the active filter's guarantees. This is a normal result,
    ///   not a failure — with a lossy filter it may also mean a reachable
    ///   solution was missed to a false positive.
    /// * `Err(error)` if the filter configuration is invalid.
    fn solution(&self, initial_state: T) -> Result<Option<Vec<T>>>;
}

/// What a concrete search strategy implements: find a terminal solution
/// state from the initial state, deduplicating through the given filter.
///
/// Strategies gate every candidate state through [`accept_state`] and
/// differ only in frontier order.
pub trait SearchStrategy<T: PuzzleState> {
    fn solution_state(&self, initial_state: T, filter: &dyn StateFilter<T>) -> Option<T>;
}

pub type FilterFactory<T> = Box<dyn Fn() -> Box<dyn StateFilter<T>> + Send + Sync>;

enum FilterSelection<T: PuzzleState> {
    /// Always an exact filter.
    Exact,
    /// A Bloom filter with these sizing parameters when the state type
    /// supplies a funnel, an exact filter otherwise.
    Sized { expected_insertions: u64, fpp: f64 },
    /// Whatever the factory produces.
    Factory(FilterFactory<T>),
}

/// Shared machinery for filter-gated search.
///
/// The engine owns the filter lifecycle — one fresh filter per
/// [`solution`](SolverEngine::solution) call, selected once at call start
/// and fixed for the duration of the search — plus solution-path
/// materialization and the retention of the final filter's statistics for
/// inspection. Search order is supplied by a [`SearchStrategy`].
///
/// Deduplication is what makes a general-purpose solver possible at all:
/// without tracking which states have been seen there is no way to know
/// whether a state was already examined. Because the state space can be too
/// large to store every seen state, the filter abstraction allows searches
/// that use bounded memory but may occasionally fail to search a valid
/// branch.
pub struct SolverEngine<T: PuzzleState> {
    selection: FilterSelection<T>,
    last_stats: Mutex<FilterStats>,
}

impl<T: PuzzleState> SolverEngine<T> {
    /// An engine that always uses an exact filter, which stores each state
    /// seen but always reports correctly on whether a state has been seen.
    pub fn exact() -> Self {
        Self {
            selection: FilterSelection::Exact,
            last_stats: Mutex::new(FilterStats::default()),
        }
    }

    /// An engine that uses a Bloom filter with the given sizing parameters
    /// when solving initial states whose type defines a funnel, and an
    /// exact filter otherwise (the parameters are ignored in that case).
    pub fn sized(expected_insertions: u64, fpp: f64) -> Self {
        Self {
            selection: FilterSelection::Sized {
                expected_insertions,
                fpp,
            },
            last_stats: Mutex::new(FilterStats::default()),
        }
    }

    /// An engine that always uses the filters produced by the factory.
    pub fn with_filter_factory(factory: FilterFactory<T>) -> Self {
        Self {
            selection: FilterSelection::Factory(factory),
            last_stats: Mutex::new(FilterStats::default()),
        }
    }

    /// Runs the strategy against a freshly selected filter and converts the
    /// terminal state, if any, into a solution path.
    ///
    /// The final filter's statistics are retained for [`last_stats`]
    /// regardless of the outcome.
    ///
    /// [`last_stats`]: SolverEngine::last_stats
    pub fn solution(
        &self,
        strategy: &dyn SearchStrategy<T>,
        initial_state: T,
    ) -> Result<Option<Vec<T>>> {
        let filter = self.make_filter(&initial_state)?;

        let terminal = strategy.solution_state(initial_state, filter.as_ref());

        let stats = FilterStats {
            approximate_element_count: filter.approximate_element_count(),
            expected_fpp: filter.expected_fpp(),
        };
        debug!(
            "search saw ~{} states, expected fpp {}",
            stats.approximate_element_count, stats.expected_fpp
        );
        *self.last_stats.lock().expect("stats lock poisoned") = stats;

        Ok(terminal.map(|state| to_solution(&state)))
    }

    /// Statistics of the filter used by the most recent
    /// [`solution`](SolverEngine::solution) call.
    pub fn last_stats(&self) -> FilterStats {
        *self.last_stats.lock().expect("stats lock poisoned")
    }

    fn make_filter(&self, initial_state: &T) -> Result<Box<dyn StateFilter<T>>> {
        match &self.selection {
            FilterSelection::Exact => Ok(Box::new(ExactStateFilter::new())),
            FilterSelection::Sized {
                expected_insertions,
                fpp,
            } => match initial_state.funnel() {
                Some(funnel) => Ok(Box::new(BloomStateFilter::new(
                    funnel,
                    *expected_insertions,
                    *fpp,
                )?)),
                None => Ok(Box::new(ExactStateFilter::new())),
            },
            FilterSelection::Factory(factory) => Ok(factory()),
        }
    }
}

/// The single chokepoint through which every candidate state — initial and
/// successor alike — must pass before being expanded or tested as a
/// solution.
///
/// If the filter says the state might already have been seen, returns
/// `None` (do not re-expand). On first sight the state is replaced with its
/// [`initialized`](PuzzleState::initialized) form, and the hopelessness
/// test is made on that form: a hopeless state also yields `None`.
///
/// Marking seen happens *before* the hopelessness check: a rediscovered
/// known-hopeless state must be suppressed by the filter just as
/// aggressively as a rediscovered known-good state.
pub fn accept_state<T: PuzzleState>(state: T, filter: &dyn StateFilter<T>) -> Option<T> {
    if !filter.put(&state) {
        // State might have been seen already.
        return None;
    }

    // First time seeing the state, so precompute it.
    let state = state.initialized();

    if state.is_hopeless() {
        None
    } else {
        Some(state)
    }
}

/// Converts a terminal solution state into the full path from the initial
/// state, by walking predecessor links backwards and reversing.
///
/// A state type that never populates predecessors legitimately yields the
/// single-element path containing only the terminal state.
pub fn to_solution<T: PuzzleState>(terminal: &T) -> Vec<T> {
    debug_assert!(terminal.is_solution());

    let mut path = vec![terminal.clone()];
    let mut current = terminal;
    while let Some(pred) = current.predecessor() {
        path.push(pred.clone());
        current = pred;
    }
    path.reverse();
    path
}
