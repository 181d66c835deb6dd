use std::collections::VecDeque;

use rayon::iter::{ParallelBridge, ParallelIterator};
use tracing::debug;

use crate::{
    error::Result,
    solver::{
        engine::{accept_state, FilterFactory, PuzzleSolver, SearchStrategy, SolverEngine},
        filter::StateFilter,
        state::PuzzleState,
        stats::FilterStats,
    },
};

/// Breadth-first-search puzzle solver.
///
/// Explores the frontier in FIFO order: a state is dequeued, tested as a
/// solution, and its successors — each gated through the engine's accept
/// chokepoint — are enqueued at the back. With
/// [`parallel`](BfsSolver::parallel) enabled, one state's successor set is
/// filtered concurrently through rayon; this parallelizes the filtering
/// work only, never the traversal order, so breadth semantics are kept
/// (within a single batch the enqueue order is unspecified).
pub struct BfsSolver<T: PuzzleState> {
    engine: SolverEngine<T>,
    parallel: bool,
}

impl<T: PuzzleState> BfsSolver<T> {
    /// Constructs a BFS solver with an exact (non-lossy) filter.
    pub fn new() -> Self {
        Self {
            engine: SolverEngine::exact(),
            parallel: false,
        }
    }

    /// Constructs a BFS solver that will use a Bloom filter with the given
    /// sizing parameters for state types that define a funnel, and an exact
    /// filter otherwise.
    pub fn sized(expected_insertions: u64, fpp: f64) -> Self {
        Self {
            engine: SolverEngine::sized(expected_insertions, fpp),
            parallel: false,
        }
    }

    /// Constructs a BFS solver that will always use the filters produced by
    /// the factory.
    pub fn with_filter_factory(factory: FilterFactory<T>) -> Self {
        Self {
            engine: SolverEngine::with_filter_factory(factory),
            parallel: false,
        }
    }

    /// Enables or disables concurrent filtering of each state's successor
    /// set.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Filter statistics of the most recent solve.
    pub fn last_stats(&self) -> FilterStats {
        self.engine.last_stats()
    }
}

impl<T: PuzzleState> Default for BfsSolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PuzzleState> SearchStrategy<T> for BfsSolver<T> {
    fn solution_state(&self, initial_state: T, filter: &dyn StateFilter<T>) -> Option<T> {
        let mut queue: VecDeque<T> = VecDeque::new();
        queue.extend(accept_state(initial_state, filter));

        while let Some(state) = queue.pop_front() {
            if state.is_solution() {
                debug!("BFS found a solution, queue size {}", queue.len());
                return Some(state);
            }

            if self.parallel {
                let accepted: Vec<T> = state
                    .successors()
                    .par_bridge()
                    .filter_map(|successor| accept_state(successor, filter))
                    .collect();
                queue.extend(accepted);
            } else {
                queue.extend(
                    state
                        .successors()
                        .filter_map(|successor| accept_state(successor, filter)),
                );
            }
        }

        debug!("BFS exhausted the frontier without a solution");
        None
    }
}

impl<T: PuzzleState> PuzzleSolver<T> for BfsSolver<T> {
    fn solution(&self, initial_state: T) -> Result<Option<Vec<T>>> {
        self.engine.solution(self, initial_state)
    }
}
