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

/// Default limit on recursion depth.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Depth-first-search puzzle solver.
///
/// Explores by bounded recursive descent: a state is tested as a solution
/// on entry, then its successors are accepted and descended one branch at a
/// time. The depth bound (default [`DEFAULT_MAX_DEPTH`]) caps call-stack
/// growth for state spaces without early hopelessness detection: at the
/// bound a branch is abandoned like a dead end, and the states beyond it
/// are never offered to the filter, so they stay discoverable through
/// shallower routes.
///
/// With [`parallel`](DfsSolver::parallel) enabled, the branches under each
/// state are explored concurrently and the first solution found on any
/// branch is returned — any one solution, with no ordering guarantee among
/// branches.
///
/// Warning: without a funnel-aware filter or hopelessness detection, deep
/// state spaces make depth-first search explore very unevenly; prefer
/// [`BfsSolver`](crate::solver::bfs::BfsSolver) when in doubt.
pub struct DfsSolver<T: PuzzleState> {
    engine: SolverEngine<T>,
    max_depth: usize,
    parallel: bool,
}

impl<T: PuzzleState> DfsSolver<T> {
    /// Constructs a DFS solver with an exact (non-lossy) filter and the
    /// default depth bound.
    pub fn new() -> Self {
        Self {
            engine: SolverEngine::exact(),
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: false,
        }
    }

    /// Constructs a DFS solver that will use a Bloom filter with the given
    /// sizing parameters for state types that define a funnel, and an exact
    /// filter otherwise.
    pub fn sized(expected_insertions: u64, fpp: f64) -> Self {
        Self {
            engine: SolverEngine::sized(expected_insertions, fpp),
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: false,
        }
    }

    /// Constructs a DFS solver that will always use the filters produced by
    /// the factory.
    pub fn with_filter_factory(factory: FilterFactory<T>) -> Self {
        Self {
            engine: SolverEngine::with_filter_factory(factory),
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: false,
        }
    }

    /// Sets the maximum recursion depth. States more than `max_depth` moves
    /// from the initial state are treated as dead ends.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enables or disables concurrent exploration of the branches under
    /// each state.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Filter statistics of the most recent solve.
    pub fn last_stats(&self) -> FilterStats {
        self.engine.last_stats()
    }

    fn dfs(&self, state: T, depth: usize, filter: &dyn StateFilter<T>) -> Option<T> {
        if state.is_solution() {
            return Some(state);
        }
        if depth >= self.max_depth {
            // Successors would exceed the bound; leave them unmarked so a
            // shallower route can still reach them.
            return None;
        }

        if self.parallel {
            state
                .successors()
                .par_bridge()
                .filter_map(|successor| accept_state(successor, filter))
                .find_map_any(|successor| self.dfs(successor, depth + 1, filter))
        } else {
            for successor in state.successors() {
                if let Some(successor) = accept_state(successor, filter) {
                    if let Some(found) = self.dfs(successor, depth + 1, filter) {
                        return Some(found);
                    }
                }
            }
            None
        }
    }
}

impl<T: PuzzleState> Default for DfsSolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PuzzleState> SearchStrategy<T> for DfsSolver<T> {
    fn solution_state(&self, initial_state: T, filter: &dyn StateFilter<T>) -> Option<T> {
        let initial_state = accept_state(initial_state, filter)?;
        let found = self.dfs(initial_state, 0, filter);
        if found.is_none() {
            debug!("DFS exhausted all branches within depth {}", self.max_depth);
        }
        found
    }
}

impl<T: PuzzleState> PuzzleSolver<T> for DfsSolver<T> {
    fn solution(&self, initial_state: T) -> Result<Option<Vec<T>>> {
        self.engine.solution(self, initial_state)
    }
}
