//! Statewalk is a generic, reusable state-space puzzle solver.
//!
//! The engine is problem-agnostic: any puzzle that can be expressed as an
//! initial state, a successor relation, and a solution predicate can be
//! searched. The core idea is a two-layered architecture: a generic search
//! backend (breadth-first or depth-first), and a problem-specific state type
//! supplied by the client.
//!
//! # Core Concepts
//!
//! - **[`PuzzleState`]**: A trait you implement to define the "what" of your
//!   puzzle: the solution predicate, the moves available from a state, and
//!   (optionally) hopelessness detection and a byte encoding for lossy
//!   deduplication.
//! - **[`StateFilter`]**: A trait tracking which states the search has
//!   already seen. The crate provides [`ExactStateFilter`] (always correct)
//!   and [`BloomStateFilter`] (fixed memory, tunable false-positive rate).
//! - **[`BfsSolver`] / [`DfsSolver`]**: The search strategies, both built on
//!   [`SolverEngine`], which owns the filter lifecycle and reconstructs the
//!   solution path from predecessor links.
//!
//! # Example: The Counter Puzzle
//!
//! Starting from 1, each move replaces `n` with `3n - 1` or `n / 2`; the
//! puzzle is solved on reaching the target. Breadth-first search with the
//! default exact filter finds a path:
//!
//! ```
//! use statewalk::examples::counter::CounterState;
//! use statewalk::solver::bfs::BfsSolver;
//! use statewalk::solver::engine::PuzzleSolver;
//!
//! let solver = BfsSolver::new();
//! let solution = solver
//!     .solution(CounterState::new(1, 7))
//!     .unwrap()
//!     .expect("7 is reachable from 1");
//!
//! let counts: Vec<i64> = solution.iter().map(|s| s.count()).collect();
//! assert_eq!(counts, vec![1, 2, 5, 14, 7]);
//! ```
//!
//! [`PuzzleState`]: solver::state::PuzzleState
//! [`StateFilter`]: solver::filter::StateFilter
//! [`ExactStateFilter`]: solver::filters::exact::ExactStateFilter
//! [`BloomStateFilter`]: solver::filters::bloom::BloomStateFilter
//! [`BfsSolver`]: solver::bfs::BfsSolver
//! [`DfsSolver`]: solver::dfs::DfsSolver
//! [`SolverEngine`]: solver::engine::SolverEngine
pub mod error;
pub mod examples;
pub mod solver;
