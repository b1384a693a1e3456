use crate::puzzle::{Move, format_moves};
use std::{fmt, num::NonZeroUsize};
use thiserror::Error;

/// The stack of moves leading from the root of a search to the node being
/// visited. After a successful solve it holds the solution.
#[derive(Debug, Clone)]
pub struct MoveHistory {
    moves: Vec<Move>,
    capacity: NonZeroUsize,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveHistoryError {
    #[error("A move history must be able to hold at least one move")]
    ZeroCapacity,
}

impl MoveHistory {
    /// Create an empty history that holds at most `capacity` moves.
    ///
    /// # Errors
    ///
    /// If `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, MoveHistoryError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(MoveHistoryError::ZeroCapacity)?;
        Ok(Self {
            moves: Vec::with_capacity(capacity.get()),
            capacity,
        })
    }

    /// Push a move onto the history. The caller must not push past the
    /// capacity.
    pub fn push(&mut self, move_: Move) {
        debug_assert!(self.moves.len() < self.capacity.get());
        self.moves.push(move_);
    }

    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    pub fn reset(&mut self) {
        self.moves.clear();
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

impl fmt::Display for MoveHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_moves(&self.moves))
    }
}
