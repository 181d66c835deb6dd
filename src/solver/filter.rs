use crate::solver::state::PuzzleState;

/// A container for states that offers only an approximate containment test,
/// no removal, and no iteration.
///
/// Implementations are free to make the containment test exact, in which
/// case [`might_contain`](StateFilter::might_contain) returns true *iff* the
/// state has been put, the return value of [`put`](StateFilter::put)
/// reflects exactly whether this was the first insertion,
/// [`expected_fpp`](StateFilter::expected_fpp) is always `0.0`, and
/// [`approximate_element_count`](StateFilter::approximate_element_count) is
/// the true number of distinct states added.
///
/// A lossy implementation may report "seen" for a state that was never put
/// (a false positive), but must never report "unseen" for a state that was
/// (no false negatives).
///
/// All operations must be safe under concurrent callers; in particular
/// `put` must behave as an atomic test-and-set per logical state, so that
/// exactly one of several concurrent callers presenting equal states
/// observes the first insertion.
pub trait StateFilter<T: PuzzleState>: Send + Sync {
    /// Returns true if the given state might have been put in this filter,
    /// false if this is definitely not the case.
    fn might_contain(&self, state: &T) -> bool;

    /// Adds the given state to the filter, returning true if this was
    /// definitely the first time the state was added, false otherwise, i.e.
    /// if this might not be the first time it was added.
    ///
    /// This return value is the sole gate solvers use to decide whether a
    /// state gets expanded.
    fn put(&self, state: &T) -> bool;

    /// An approximation of the number of distinct states added so far.
    fn approximate_element_count(&self) -> u64;

    /// Expected probability that [`might_contain`](StateFilter::might_contain)
    /// returns a false positive.
    fn expected_fpp(&self) -> f64;
}
