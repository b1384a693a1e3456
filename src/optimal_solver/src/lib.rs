//! An optimal solver for the 3x3x3 Rubik's Cube.
//!
//! The cube is split into two packed sub-states, one for the eight corners and
//! one for the twelve edges. A breadth-first enumeration of every corner state
//! produces an exact pattern database, which then guides an [iterative
//! deepening A*][IDA] search over the full cube.
//!
//! [IDA]: https://en.wikipedia.org/wiki/Iterative_deepening_A*

pub mod config;
pub mod move_history;
pub mod pruning;
pub mod puzzle;
pub mod solver;

pub use config::{ConfigError, PruningTableConfig, SearchConfig, SolverConfig};
pub use move_history::{MoveHistory, MoveHistoryError};
pub use pruning::{CornerPatternDatabase, PruningTableError, build_heuristic};
pub use puzzle::{CornerState, CubeState, EdgeState, Move, MoveParseError};
pub use solver::{OptimalSolver, SolveStats, SolverError, solve};

/// Every position of the 3x3x3 can be solved in 20 moves or fewer in the half
/// turn metric.
pub const GODS_NUMBER: u8 = 20;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
