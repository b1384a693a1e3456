use itertools::Itertools;
use std::{fmt, str::FromStr};
use thiserror::Error;

pub mod corners;
pub mod edges;

pub use corners::{CornerState, CountedCornerState};
pub use edges::EdgeState;

/// The six faces of the cube, named by their center color. The cube is held
/// with white up, orange in front, green to the right, red at the back, blue to
/// the left and yellow down.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    Orange,
    Green,
    Red,
    Blue,
    White,
    Yellow,
}

impl Face {
    pub const ALL: [Self; 6] = [
        Face::Orange,
        Face::Green,
        Face::Red,
        Face::Blue,
        Face::White,
        Face::Yellow,
    ];
}

/// One of the 18 face turns of the half turn metric.
///
/// The discriminants fix the order in which the solver and the pattern
/// database generator expand moves: for every face in [`Face::ALL`] order, the
/// clockwise quarter turn, the counterclockwise quarter turn, then the half
/// turn. Clockwise is as seen looking straight at the face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Move {
    Orange90Cw,
    Orange90Ccw,
    Orange180,
    Green90Cw,
    Green90Ccw,
    Green180,
    Red90Cw,
    Red90Ccw,
    Red180,
    Blue90Cw,
    Blue90Ccw,
    Blue180,
    White90Cw,
    White90Ccw,
    White180,
    Yellow90Cw,
    Yellow90Ccw,
    Yellow180,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("Invalid rotation type `{0}`, expected a name such as `orange90CW`, `red90CCW` or `white180`")]
    UnknownMove(String),
}

impl Move {
    pub const ALL: [Self; 18] = {
        use Move::*;
        let v = [
            Orange90Cw,
            Orange90Ccw,
            Orange180,
            Green90Cw,
            Green90Ccw,
            Green180,
            Red90Cw,
            Red90Ccw,
            Red180,
            Blue90Cw,
            Blue90Ccw,
            Blue180,
            White90Cw,
            White90Ccw,
            White180,
            Yellow90Cw,
            Yellow90Ccw,
            Yellow180,
        ];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The move turning `face` by `turn`.
    pub fn new(face: Face, turn: Turn) -> Self {
        let turn_index = match turn {
            Turn::Clockwise => 0,
            Turn::CounterClockwise => 1,
            Turn::Half => 2,
        };
        Self::ALL[face as usize * 3 + turn_index]
    }

    pub fn face(self) -> Face {
        Face::ALL[self as usize / 3]
    }

    pub fn turn(self) -> Turn {
        match self as usize % 3 {
            0 => Turn::Clockwise,
            1 => Turn::CounterClockwise,
            _ => Turn::Half,
        }
    }

    /// The move undoing `self`. Half turns are their own inverse.
    #[must_use]
    pub fn inverse(self) -> Self {
        let turn = match self.turn() {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        };
        Self::new(self.face(), turn)
    }

    /// The canonical name, e.g. `orange90CW`.
    pub fn name(self) -> &'static str {
        use Move::*;
        match self {
            Orange90Cw => "orange90CW",
            Orange90Ccw => "orange90CCW",
            Orange180 => "orange180",
            Green90Cw => "green90CW",
            Green90Ccw => "green90CCW",
            Green180 => "green180",
            Red90Cw => "red90CW",
            Red90Ccw => "red90CCW",
            Red180 => "red180",
            Blue90Cw => "blue90CW",
            Blue90Ccw => "blue90CCW",
            Blue180 => "blue180",
            White90Cw => "white90CW",
            White90Ccw => "white90CCW",
            White180 => "white180",
            Yellow90Cw => "yellow90CW",
            Yellow90Ccw => "yellow90CCW",
            Yellow180 => "yellow180",
        }
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::ALL
            .into_iter()
            .find(|move_| move_.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MoveParseError::UnknownMove(s.to_owned()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a whitespace separated move sequence.
///
/// # Errors
///
/// If any token is not the name of a move.
pub fn parse_moves(sequence: &str) -> Result<Vec<Move>, MoveParseError> {
    sequence.split_whitespace().map(str::parse).collect()
}

/// Format a move sequence the way `parse_moves` reads it.
pub fn format_moves<'a>(moves: impl IntoIterator<Item = &'a Move>) -> String {
    moves.into_iter().join(" ")
}

/// Draw `length` uniformly random moves from `rng`.
pub fn random_moves(length: usize, rng: &mut fastrand::Rng) -> Vec<Move> {
    (0..length)
        .map(|_| Move::ALL[rng.usize(..Move::ALL.len())])
        .collect()
}

/// The full cube as a pair of independently tracked sub-cubes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CubeState {
    pub corners: CornerState,
    pub edges: EdgeState,
}

impl CubeState {
    pub const SOLVED: Self = Self {
        corners: CornerState::SOLVED,
        edges: EdgeState::SOLVED,
    };

    pub const fn new(corners: CornerState, edges: EdgeState) -> Self {
        Self { corners, edges }
    }

    #[must_use]
    pub fn apply(self, move_: Move) -> Self {
        Self {
            corners: self.corners.apply(move_),
            edges: self.edges.apply(move_),
        }
    }

    #[must_use]
    pub fn apply_moves<'a>(self, moves: impl IntoIterator<Item = &'a Move>) -> Self {
        moves
            .into_iter()
            .fold(self, |state, &move_| state.apply(move_))
    }

    pub fn is_solved(self) -> bool {
        self == Self::SOLVED
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.corners)?;
        write!(f, "{}", self.edges)
    }
}
