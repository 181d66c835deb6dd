use std::hash::Hash;
use std::sync::Arc;

use crate::solver::funnel::Funnel;

/// A representation of the state of a puzzle that involves finding a
/// sequence of moves from an initial state to a solution state.
///
/// This is the primary interface for connecting a concrete puzzle (like the
/// counter puzzle or peg solitaire) to the generic search engine. A state
/// can enumerate its successors (the states one move away), report whether
/// it is a solution, and optionally report that it is hopeless, meaning no
/// solution is reachable from it.
///
/// # Equality
///
/// `Eq` and `Hash` must depend only on the puzzle configuration a state
/// represents, never on its predecessor or any other path-dependent data.
/// Two states reached by different routes that represent the same
/// configuration must compare equal, or deduplication silently breaks: the
/// same configuration would be tracked as two distinct entries, and the
/// search would re-expand it.
///
/// # Predecessor chains
///
/// A state knows the state it was reached from. Chains fan out (many states
/// share a common ancestor) but never cycle, and are never mutated after
/// construction, so implementations should hold their predecessor behind an
/// `Arc` and surface it as a borrow. Solvers walk these links backwards to
/// reconstruct the solution path.
pub trait PuzzleState: Clone + Eq + Hash + Send + Sync + Sized {
    /// Returns whether this is a solution state.
    fn is_solution(&self) -> bool;

    /// The states obtainable by a single move from this state.
    ///
    /// The iterator must be finite; it is consumed at most once per
    /// expansion. Successor states are responsible for recording `self` as
    /// their predecessor if the client wants full solution paths.
    fn successors(&self) -> Box<dyn Iterator<Item = Self> + Send + '_>;

    /// Returns true if it is known that no solution state can be reached
    /// from this state. Returns false otherwise, i.e. if it is not known
    /// whether a solution state is reachable from here.
    fn is_hopeless(&self) -> bool {
        false
    }

    /// The state from which this state was reached.
    fn predecessor(&self) -> Option<&Self> {
        None
    }

    /// Returns a state equivalent to this one, but which might implement
    /// some methods more efficiently, e.g. by precomputing commonly needed
    /// values. The engine applies this exactly once, when a state is first
    /// accepted by the filter. The default returns self unchanged.
    fn initialized(self) -> Self {
        self
    }

    /// A rating of how good this state is; lower is better. The base engine
    /// ignores scores, but best-first extensions can use them.
    fn score(&self) -> i32 {
        0
    }

    /// Optionally returns a funnel encoding states of this type as a stable
    /// primitive sequence, for use in approximate containment tests. A state
    /// type without a funnel always gets an exact filter.
    fn funnel(&self) -> Option<Arc<dyn Funnel<Self>>> {
        None
    }
}
