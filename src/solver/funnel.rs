//! Encoding of puzzle states into stable primitive sequences.
//!
//! Probabilistic filters cannot store states; they hash an encoding of each
//! state instead. A [`Funnel`] describes how to feed the identity-bearing
//! fields of a state into a [`PrimitiveSink`]. The encoding must be a pure
//! function of the state's equality: equal states must funnel identical
//! sequences, and path-dependent data (predecessors) must be left out.

/// A byte-oriented sink that a [`Funnel`] writes a state's fields into.
///
/// The integer, bool, and string methods default-delegate to the wider
/// primitives so implementors only have to handle raw bytes and fixed-width
/// integers.
pub trait PrimitiveSink {
    fn put_u8(&mut self, value: u8);

    fn put_u32(&mut self, value: u32);

    fn put_u64(&mut self, value: u64);

    fn put_bytes(&mut self, bytes: &[u8]);

    fn put_i32(&mut self, value: i32) {
        self.put_u32(value as u32);
    }

    fn put_i64(&mut self, value: i64) {
        self.put_u64(value as u64);
    }

    fn put_bool(&mut self, value: bool) {
        self.put_u8(value as u8);
    }

    fn put_str(&mut self, value: &str) {
        self.put_bytes(value.as_bytes());
    }
}

/// An encoder from states of type `T` to a primitive sequence.
///
/// Closures of the right shape are funnels, so a state type can supply one
/// inline:
///
/// ```
/// use std::sync::Arc;
/// use statewalk::solver::funnel::{Funnel, PrimitiveSink};
///
/// struct Board { cells: u64 }
///
/// let funnel: Arc<dyn Funnel<Board>> =
///     Arc::new(|board: &Board, sink: &mut dyn PrimitiveSink| {
///         sink.put_u64(board.cells);
///     });
/// ```
pub trait Funnel<T>: Send + Sync {
    /// Feeds the identity-bearing fields of `state` into `sink`.
    fn fill(&self, state: &T, sink: &mut dyn PrimitiveSink);
}

impl<T, F> Funnel<T> for F
where
    F: Fn(&T, &mut dyn PrimitiveSink) + Send + Sync,
{
    fn fill(&self, state: &T, sink: &mut dyn PrimitiveSink) {
        self(state, sink)
    }
}
