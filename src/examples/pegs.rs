//! Peg solitaire on a rectangular board.
//!
//! A worked example of the state contract with a compact bit-vector
//! encoding: the board's holes and the current pegs are row-major bit
//! grids, a move jumps one peg over an orthogonal neighbour into an empty
//! hole (removing the jumped peg), and the puzzle is solved when a single
//! peg remains. The bit words double as the funnel encoding, so searches
//! over large boards can run against a Bloom filter.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::{
    error::{Result, SolverError},
    solver::{
        engine::PuzzleSolver,
        funnel::{Funnel, PrimitiveSink},
        state::PuzzleState,
    },
};

/// A board coordinate, row-major from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One legal move: the peg at `from` jumps the peg at `over` into `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub from: Position,
    pub over: Position,
    pub to: Position,
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "peg at {} jumps {} to {}, removing the jumped peg",
            self.from, self.over, self.to
        )
    }
}

// Jump target offsets; the jumped peg sits at half the offset.
const JUMP_OFFSETS: [(isize, isize); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

/// Row-major bit grid; the unit of both hole layout and peg occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BitGrid {
    words: Vec<u64>,
}

impl BitGrid {
    fn new(bits: usize) -> Self {
        Self {
            words: vec![0; (bits + 63) / 64],
        }
    }

    fn get(&self, index: usize) -> bool {
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    fn set(&mut self, index: usize) {
        self.words[index / 64] |= 1 << (index % 64);
    }

    fn flip(&mut self, index: usize) {
        self.words[index / 64] ^= 1 << (index % 64);
    }

    fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    fn words(&self) -> &[u64] {
        &self.words
    }
}

/// The static shape of one puzzle, shared by every state derived from it.
#[derive(Debug)]
struct Board {
    nrows: usize,
    ncols: usize,
    holes: BitGrid,
}

impl Board {
    fn index(&self, pos: Position) -> usize {
        pos.row * self.ncols + pos.col
    }

    fn offset(&self, pos: Position, dr: isize, dc: isize) -> Option<Position> {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < self.nrows && col < self.ncols).then_some(Position { row, col })
    }

    fn is_hole(&self, pos: Position) -> bool {
        self.holes.get(self.index(pos))
    }
}

/// A peg-jumping puzzle: a hole layout plus the starting peg placement.
pub struct PegsPuzzle {
    board: Arc<Board>,
    holes: BTreeSet<Position>,
    pegs: BTreeSet<Position>,
}

impl PegsPuzzle {
    /// Creates a puzzle on an `nrows x ncols` board. Every peg must sit in
    /// a hole and every hole must be on the board.
    pub fn new(
        nrows: usize,
        ncols: usize,
        holes: BTreeSet<Position>,
        pegs: BTreeSet<Position>,
    ) -> Result<Self> {
        if let Some(outside) = holes.iter().find(|p| p.row >= nrows || p.col >= ncols) {
            return Err(
                SolverError::Custom(format!("hole {outside} is outside the board")).into(),
            );
        }
        if let Some(stray) = pegs.iter().find(|&p| !holes.contains(p)) {
            return Err(SolverError::Custom(format!("peg {stray} is not in a hole")).into());
        }

        let mut hole_grid = BitGrid::new(nrows * ncols);
        for hole in &holes {
            hole_grid.set(hole.row * ncols + hole.col);
        }

        Ok(Self {
            board: Arc::new(Board {
                nrows,
                ncols,
                holes: hole_grid,
            }),
            holes,
            pegs,
        })
    }

    /// Creates the classic cross-shaped puzzle with the initial empty hole
    /// in the center: a `size x size` square with `corner = (size - arm_size) / 2`
    /// holes cut from each corner. Both sizes must be odd and positive, and
    /// the arm must fit in the square.
    pub fn cross(size: usize, arm_size: usize) -> Result<Self> {
        if arm_size > size || arm_size < 1 || size % 2 != 1 || arm_size % 2 != 1 {
            return Err(SolverError::Custom(format!(
                "cross sizes must be odd and positive with arm {arm_size} <= size {size}"
            ))
            .into());
        }

        let corner = (size - arm_size) / 2;
        let min_arm = corner;
        let max_arm = size - corner - 1;
        let center = Position::new(size / 2, size / 2);

        let holes: BTreeSet<Position> = (0..size)
            .flat_map(|row| (0..size).map(move |col| Position::new(row, col)))
            .filter(|p| {
                !((p.row < min_arm || p.row > max_arm) && (p.col < min_arm || p.col > max_arm))
            })
            .collect();
        let pegs: BTreeSet<Position> = holes.iter().copied().filter(|p| *p != center).collect();

        Self::new(size, size, holes, pegs)
    }

    pub fn holes(&self) -> &BTreeSet<Position> {
        &self.holes
    }

    pub fn pegs(&self) -> &BTreeSet<Position> {
        &self.pegs
    }

    pub fn initial_state(&self) -> PegsState {
        let mut peg_grid = BitGrid::new(self.board.nrows * self.board.ncols);
        for peg in &self.pegs {
            peg_grid.set(self.board.index(*peg));
        }
        PegsState {
            board: Arc::clone(&self.board),
            pegs: peg_grid,
            last_jump: None,
            pred: None,
        }
    }

    pub fn solve(&self, solver: &dyn PuzzleSolver<PegsState>) -> Result<Option<Vec<PegsState>>> {
        solver.solution(self.initial_state())
    }
}

/// One peg placement reached during a search.
///
/// Equality and hash cover the peg bits only; the jump that produced the
/// placement and the predecessor chain are path data.
#[derive(Debug, Clone)]
pub struct PegsState {
    board: Arc<Board>,
    pegs: BitGrid,
    last_jump: Option<Jump>,
    pred: Option<Arc<PegsState>>,
}

impl PegsState {
    pub fn last_jump(&self) -> Option<Jump> {
        self.last_jump
    }

    /// The occupied positions, row-major.
    pub fn peg_positions(&self) -> Vec<Position> {
        (0..self.board.nrows)
            .flat_map(|row| (0..self.board.ncols).map(move |col| Position::new(row, col)))
            .filter(|p| self.has_peg(*p))
            .collect()
    }

    fn has_peg(&self, pos: Position) -> bool {
        self.pegs.get(self.board.index(pos))
    }

    fn legal_jumps(&self) -> Vec<Jump> {
        let mut jumps = Vec::new();
        for from in self.peg_positions() {
            for (dr, dc) in JUMP_OFFSETS {
                let Some(over) = self.board.offset(from, dr / 2, dc / 2) else {
                    continue;
                };
                let Some(to) = self.board.offset(from, dr, dc) else {
                    continue;
                };
                if self.has_peg(over) && self.board.is_hole(to) && !self.has_peg(to) {
                    jumps.push(Jump { from, over, to });
                }
            }
        }
        jumps
    }

    fn apply(&self, jump: Jump) -> Self {
        let mut pegs = self.pegs.clone();
        pegs.flip(self.board.index(jump.from));
        pegs.flip(self.board.index(jump.over));
        pegs.flip(self.board.index(jump.to));
        Self {
            board: Arc::clone(&self.board),
            pegs,
            last_jump: Some(jump),
            pred: Some(Arc::new(self.clone())),
        }
    }
}

impl PartialEq for PegsState {
    fn eq(&self, other: &Self) -> bool {
        self.pegs == other.pegs
    }
}
impl Eq for PegsState {}

impl std::hash::Hash for PegsState {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.pegs.hash(state);
    }
}

impl fmt::Display for PegsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.last_jump {
            Some(jump) => writeln!(f, "{jump}:")?,
            None => writeln!(f, "Initial position:")?,
        }
        for row in 0..self.board.nrows {
            for col in 0..self.board.ncols {
                let pos = Position::new(row, col);
                if self.has_peg(pos) {
                    write!(f, "X")?;
                } else if self.board.is_hole(pos) {
                    write!(f, ".")?;
                } else {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl PuzzleState for PegsState {
    fn is_solution(&self) -> bool {
        self.pegs.count_ones() == 1
    }

    fn successors(&self) -> Box<dyn Iterator<Item = Self> + Send + '_> {
        Box::new(self.legal_jumps().into_iter().map(move |jump| self.apply(jump)))
    }

    fn predecessor(&self) -> Option<&Self> {
        self.pred.as_deref()
    }

    fn funnel(&self) -> Option<Arc<dyn Funnel<Self>>> {
        Some(Arc::new(|state: &Self, sink: &mut dyn PrimitiveSink| {
            for word in state.pegs.words() {
                sink.put_u64(*word);
            }
        }))
    }
}
