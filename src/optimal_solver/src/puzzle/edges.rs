//! The edge sub-cube.
//!
//! An edge state packs twelve 5-bit fields into the low 60 bits of a word.
//! Field `i` describes the edge slot `i`: its upper four bits hold the id of the
//! cubie sitting there and its lowest bit is that cubie's flip.
//!
//! ```text
//!                 ---0---
//!                 1 white 2
//!                 ---3---
//!  ---1---    ---3---    ---2---    ---0---
//!  4 blue 5   5 orange 6 6 green 7  7  red 4
//!  ---8---    ---9---    --10---    --11---
//!                 ---9---
//!                 8 yellow 10
//!                 --11---
//! ```
//!
//! Slots 0 to 3 belong to the white face, 4, 5 and 8 to blue, 6 and 9 to
//! orange, 7 and 10 to green and 11 to red. Cubie `i` is the one whose home is
//! slot `i`, and its first color is the color of slot `i`'s face. An edge is
//! unflipped when its first color lies on the face of the slot it occupies.

use super::Move;
use std::fmt;

const FIELD_BITS: u32 = 5;
const FIELD_MASK: u64 = 0b11111;
const CUBIE_MASK: u64 = 0b11110;
const FLIP_MASK: u64 = 0b00001;
const EDGE_COUNT: usize = 12;

/// The bits covered by the twelve edge fields.
pub const EDGE_STATE_MASK: u64 = (1 << (FIELD_BITS as usize * EDGE_COUNT)) - 1;

/// The edge sub-cube. Bits above [`EDGE_STATE_MASK`] are always zero.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct EdgeState(u64);

/// How a single face turn moves the edges: four `(destination, source, flip)`
/// triples. The cubie in `source` ends up in `destination`, flipped if `flip`
/// is set.
struct EdgeTurn {
    cycle: [(u8, u8, bool); 4],
    untouched: u64,
}

const fn edge_turn(cycle: [(u8, u8, bool); 4]) -> EdgeTurn {
    let mut untouched = EDGE_STATE_MASK;
    let mut i = 0;
    while i < cycle.len() {
        untouched &= !(FIELD_MASK << (FIELD_BITS * cycle[i].0 as u32));
        i += 1;
    }
    EdgeTurn { cycle, untouched }
}

const F: bool = true;
const K: bool = false;

// White and yellow are the reference faces and never flip. A quarter turn of
// any other face flips exactly the two edges that move between its side of the
// cube and the white or yellow side.
const EDGE_TURNS: [EdgeTurn; 18] = [
    // orange
    edge_turn([(3, 5, K), (5, 9, F), (6, 3, F), (9, 6, K)]),
    edge_turn([(3, 6, F), (5, 3, K), (6, 9, K), (9, 5, F)]),
    edge_turn([(3, 9, F), (5, 6, F), (6, 5, F), (9, 3, F)]),
    // green
    edge_turn([(2, 6, K), (6, 10, F), (7, 2, F), (10, 7, K)]),
    edge_turn([(2, 7, F), (6, 2, K), (7, 10, K), (10, 6, F)]),
    edge_turn([(2, 10, F), (6, 7, F), (7, 6, F), (10, 2, F)]),
    // red
    edge_turn([(0, 7, K), (4, 0, K), (7, 11, F), (11, 4, F)]),
    edge_turn([(0, 4, K), (4, 11, F), (7, 0, K), (11, 7, F)]),
    edge_turn([(0, 11, F), (4, 7, K), (7, 4, K), (11, 0, F)]),
    // blue
    edge_turn([(1, 4, F), (4, 8, K), (5, 1, F), (8, 5, K)]),
    edge_turn([(1, 5, F), (4, 1, F), (5, 8, K), (8, 4, K)]),
    edge_turn([(1, 8, F), (4, 5, K), (5, 4, K), (8, 1, F)]),
    // white
    edge_turn([(0, 1, K), (1, 3, K), (2, 0, K), (3, 2, K)]),
    edge_turn([(0, 2, K), (1, 0, K), (2, 3, K), (3, 1, K)]),
    edge_turn([(0, 3, K), (1, 2, K), (2, 1, K), (3, 0, K)]),
    // yellow
    edge_turn([(8, 11, K), (9, 8, K), (10, 9, K), (11, 10, K)]),
    edge_turn([(8, 9, K), (9, 10, K), (10, 11, K), (11, 8, K)]),
    edge_turn([(8, 10, K), (9, 11, K), (10, 8, K), (11, 9, K)]),
];

impl EdgeState {
    pub const SOLVED: Self = {
        let mut raw = 0;
        let mut slot = 0;
        while slot < EDGE_COUNT {
            raw |= ((slot as u64) << 1) << (FIELD_BITS as usize * slot);
            slot += 1;
        }
        EdgeState(raw)
    };

    /// Interpret a packed word. Bits above the edge fields are discarded.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw & EDGE_STATE_MASK)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Build a state from `(cubie id, flip)` pairs indexed by slot. The pairs
    /// are packed as given; no legality check takes place.
    pub fn from_cubies(cubies: [(u8, u8); EDGE_COUNT]) -> Self {
        let raw = cubies
            .iter()
            .enumerate()
            .fold(0, |raw, (slot, &(id, flip))| {
                let field = ((u64::from(id) << 1) & CUBIE_MASK) | (u64::from(flip) & FLIP_MASK);
                raw | (field << (FIELD_BITS as usize * slot))
            });
        Self(raw)
    }

    /// The `(cubie id, flip)` pair in `slot`.
    ///
    /// # Panics
    ///
    /// If `slot` is not less than twelve.
    pub fn cubie(self, slot: usize) -> (u8, u8) {
        assert!(slot < EDGE_COUNT, "Edge slot {slot} out of range");
        let field = (self.0 >> (FIELD_BITS as usize * slot)) & FIELD_MASK;
        (((field & CUBIE_MASK) >> 1) as u8, (field & FLIP_MASK) as u8)
    }

    pub fn cubies(self) -> [(u8, u8); EDGE_COUNT] {
        std::array::from_fn(|slot| self.cubie(slot))
    }

    #[must_use]
    pub fn apply(self, move_: Move) -> Self {
        let turn = &EDGE_TURNS[move_ as usize];
        let mut raw = self.0 & turn.untouched;
        for &(destination, source, flip) in &turn.cycle {
            let field = (self.0 >> (FIELD_BITS * u32::from(source))) & FIELD_MASK;
            raw |= (field ^ u64::from(flip)) << (FIELD_BITS * u32::from(destination));
        }
        Self(raw)
    }
}

impl Default for EdgeState {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl fmt::Debug for EdgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeState({:#017x})", self.0)
    }
}

impl fmt::Display for EdgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (slot, (id, flip)) in self.cubies().into_iter().enumerate() {
            if slot != 0 {
                f.write_str("; ")?;
            }
            write!(f, "E{slot}: {id}, {flip}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Face, random_moves};
    use itertools::Itertools;

    fn scrambled(seed: u64) -> EdgeState {
        let mut rng = fastrand::Rng::with_seed(seed);
        random_moves(30, &mut rng)
            .iter()
            .fold(EdgeState::SOLVED, |state, &move_| state.apply(move_))
    }

    #[test]
    fn test_solved_encoding() {
        assert_eq!(
            EdgeState::SOLVED.raw(),
            0b1011_0101_0010_0101_0000_0111_0011_0001_0100_1000_0011_0001_0000_0100_0000
        );
        for slot in 0..12 {
            assert_eq!(EdgeState::SOLVED.cubie(slot), (slot as u8, 0));
        }
    }

    #[test]
    fn test_from_cubies() {
        let mut cubies = EdgeState::SOLVED.cubies();
        cubies.swap(0, 11);
        cubies[3].1 = 1;
        cubies[7].1 = 1;
        let state = EdgeState::from_cubies(cubies);
        assert_eq!(state.cubies(), cubies);
        assert_eq!(state.cubie(0), (11, 0));
        assert_eq!(state.cubie(3), (3, 1));
    }

    #[test]
    fn test_quarter_turns_round_trip() {
        for seed in 0..20 {
            let state = scrambled(seed);
            for move_ in Move::ALL {
                assert_eq!(state.apply(move_).apply(move_.inverse()), state, "{move_}");
            }
        }
    }

    #[test]
    fn test_half_turn_is_two_quarter_turns() {
        for seed in 0..20 {
            let state = scrambled(seed);
            for (clockwise, _, half) in Move::ALL.into_iter().tuples() {
                assert_eq!(state.apply(half), state.apply(clockwise).apply(clockwise));
            }
        }
    }

    #[test]
    fn test_moves_preserve_permutation_and_flip_parity() {
        let mut rng = fastrand::Rng::with_seed(4);
        let mut state = EdgeState::SOLVED;
        for move_ in random_moves(1000, &mut rng) {
            state = state.apply(move_);
            let cubies = state.cubies();
            assert_eq!(
                cubies.iter().map(|&(id, _)| id).sorted().collect_vec(),
                (0..12).collect_vec(),
                "{state}"
            );
            let flips: u32 = cubies.iter().map(|&(_, flip)| u32::from(flip)).sum();
            assert_eq!(flips % 2, 0, "{state}");
            assert_eq!(state.raw() & !EDGE_STATE_MASK, 0);
        }
    }

    #[test]
    fn test_reference_faces_do_not_flip() {
        for move_ in Move::ALL
            .into_iter()
            .filter(|move_| matches!(move_.face(), Face::White | Face::Yellow))
        {
            let state = EdgeState::SOLVED.apply(move_);
            assert!(state.cubies().iter().all(|&(_, flip)| flip == 0), "{move_}");
        }
        let state = EdgeState::SOLVED.apply(Move::Blue90Cw);
        assert_eq!(state.cubie(1), (4, 1));
        assert_eq!(state.cubie(5), (1, 1));
        assert_eq!(state.cubie(4), (8, 0));
    }
}
