//! The corner sub-cube.
//!
//! A corner state packs eight 5-bit fields into the low 40 bits of a word.
//! Field `i` describes the corner slot `i`: its upper three bits hold the id of
//! the cubie sitting there and its lower two bits hold that cubie's
//! orientation.
//!
//! Slots 0 to 3 are on the orange face and 4 to 7 on the red face:
//!
//! ```text
//!   orange, seen from the front      red, seen from the back
//!
//!          white                            white
//!        ---------                        ---------
//!        | 0   1 |                        | 4   5 |
//!  blue  |       |  green          green  |       |  blue
//!        | 2   3 |                        | 6   7 |
//!        ---------                        ---------
//!         yellow                           yellow
//! ```
//!
//! Cubie `i` is the one whose home is slot `i`. The orientation counts how far
//! the cubie's orange or red sticker is turned clockwise away from the orange
//! or red face, so it is always in `0..3`.

use super::Move;
use std::fmt;

const FIELD_BITS: u32 = 5;
const FIELD_MASK: u64 = 0b11111;
const CUBIE_MASK: u64 = 0b11100;
const ORIENTATION_MASK: u64 = 0b00011;
const CORNER_COUNT: usize = 8;

/// The bits covered by the eight corner fields.
pub const CORNER_STATE_MASK: u64 = (1 << (FIELD_BITS as usize * CORNER_COUNT)) - 1;

const MOVE_COUNTER_SHIFT: u32 = 56;

/// The corner sub-cube. Bits above [`CORNER_STATE_MASK`] are always zero.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct CornerState(u64);

/// How a single face turn moves the corners: four `(destination, source,
/// twist)` slot triples. The cubie in `source` ends up in `destination` with
/// `twist` added to its orientation modulo three. All other slots are left
/// alone.
struct CornerTurn {
    cycle: [(u8, u8, u8); 4],
    untouched: u64,
}

const fn corner_turn(cycle: [(u8, u8, u8); 4]) -> CornerTurn {
    let mut untouched = CORNER_STATE_MASK;
    let mut i = 0;
    while i < cycle.len() {
        untouched &= !(FIELD_MASK << (FIELD_BITS * cycle[i].0 as u32));
        i += 1;
    }
    CornerTurn { cycle, untouched }
}

// Orange and red turns never twist. Every quarter turn of the other four faces
// twists each moved cubie by one or two, summing to zero modulo three.
const CORNER_TURNS: [CornerTurn; 18] = [
    // orange
    corner_turn([(0, 2, 0), (1, 0, 0), (2, 3, 0), (3, 1, 0)]),
    corner_turn([(0, 1, 0), (1, 3, 0), (2, 0, 0), (3, 2, 0)]),
    corner_turn([(0, 3, 0), (1, 2, 0), (2, 1, 0), (3, 0, 0)]),
    // green
    corner_turn([(1, 3, 1), (3, 6, 2), (4, 1, 2), (6, 4, 1)]),
    corner_turn([(1, 4, 1), (3, 1, 2), (4, 6, 2), (6, 3, 1)]),
    corner_turn([(1, 6, 0), (3, 4, 0), (4, 3, 0), (6, 1, 0)]),
    // red
    corner_turn([(4, 6, 0), (5, 4, 0), (6, 7, 0), (7, 5, 0)]),
    corner_turn([(4, 5, 0), (5, 7, 0), (6, 4, 0), (7, 6, 0)]),
    corner_turn([(4, 7, 0), (5, 6, 0), (6, 5, 0), (7, 4, 0)]),
    // blue
    corner_turn([(0, 5, 2), (2, 0, 1), (5, 7, 1), (7, 2, 2)]),
    corner_turn([(0, 2, 2), (2, 7, 1), (5, 0, 1), (7, 5, 2)]),
    corner_turn([(0, 7, 0), (2, 5, 0), (5, 2, 0), (7, 0, 0)]),
    // white
    corner_turn([(0, 1, 1), (1, 4, 2), (4, 5, 1), (5, 0, 2)]),
    corner_turn([(0, 5, 1), (1, 0, 2), (4, 1, 1), (5, 4, 2)]),
    corner_turn([(0, 4, 0), (1, 5, 0), (4, 0, 0), (5, 1, 0)]),
    // yellow
    corner_turn([(2, 7, 2), (3, 2, 1), (6, 3, 2), (7, 6, 1)]),
    corner_turn([(2, 3, 2), (3, 6, 1), (6, 7, 2), (7, 2, 1)]),
    corner_turn([(2, 6, 0), (3, 7, 0), (6, 2, 0), (7, 3, 0)]),
];

impl CornerState {
    pub const SOLVED: Self = {
        let mut raw = 0;
        let mut slot = 0;
        while slot < CORNER_COUNT {
            raw |= ((slot as u64) << 2) << (FIELD_BITS as usize * slot);
            slot += 1;
        }
        CornerState(raw)
    };

    /// Interpret a packed word. Bits above the corner fields are discarded.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw & CORNER_STATE_MASK)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Build a state from `(cubie id, orientation)` pairs indexed by slot. The
    /// pairs are packed as given; no legality check takes place.
    pub fn from_cubies(cubies: [(u8, u8); CORNER_COUNT]) -> Self {
        let raw = cubies
            .iter()
            .enumerate()
            .fold(0, |raw, (slot, &(id, orientation))| {
                let field = ((u64::from(id) << 2) & CUBIE_MASK)
                    | (u64::from(orientation) & ORIENTATION_MASK);
                raw | (field << (FIELD_BITS as usize * slot))
            });
        Self(raw)
    }

    /// The `(cubie id, orientation)` pair in `slot`.
    ///
    /// # Panics
    ///
    /// If `slot` is not less than eight.
    pub fn cubie(self, slot: usize) -> (u8, u8) {
        assert!(slot < CORNER_COUNT, "Corner slot {slot} out of range");
        let field = (self.0 >> (FIELD_BITS as usize * slot)) & FIELD_MASK;
        (((field & CUBIE_MASK) >> 2) as u8, (field & ORIENTATION_MASK) as u8)
    }

    pub fn cubies(self) -> [(u8, u8); CORNER_COUNT] {
        std::array::from_fn(|slot| self.cubie(slot))
    }

    #[must_use]
    pub fn apply(self, move_: Move) -> Self {
        let turn = &CORNER_TURNS[move_ as usize];
        let mut raw = self.0 & turn.untouched;
        for &(destination, source, twist) in &turn.cycle {
            let field = (self.0 >> (FIELD_BITS * u32::from(source))) & FIELD_MASK;
            let orientation = ((field & ORIENTATION_MASK) + u64::from(twist)) % 3;
            raw |= ((field & CUBIE_MASK) | orientation) << (FIELD_BITS * u32::from(destination));
        }
        Self(raw)
    }
}

impl Default for CornerState {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl fmt::Debug for CornerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CornerState({:#012x})", self.0)
    }
}

impl fmt::Display for CornerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (slot, (id, orientation)) in self.cubies().into_iter().enumerate() {
            if slot != 0 {
                f.write_str("; ")?;
            }
            write!(f, "C{slot}: {id}, {orientation}")?;
        }
        Ok(())
    }
}

/// A corner state tagged with the number of moves taken to reach it. The
/// count lives in bits 56 to 63 of the same word so that a breadth-first
/// frontier stores one word per state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CountedCornerState(u64);

impl CountedCornerState {
    /// Tag `state` with a move count of zero.
    pub const fn new(state: CornerState) -> Self {
        Self(state.0)
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The corner state with the move count masked off.
    pub const fn state(self) -> CornerState {
        CornerState(self.0 & CORNER_STATE_MASK)
    }

    pub const fn move_count(self) -> u8 {
        (self.0 >> MOVE_COUNTER_SHIFT) as u8
    }

    /// Apply `move_` and count it.
    #[must_use]
    pub fn apply(self, move_: Move) -> Self {
        let move_count = self.move_count().wrapping_add(1);
        Self(self.state().apply(move_).0 | (u64::from(move_count) << MOVE_COUNTER_SHIFT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Face, random_moves};
    use itertools::Itertools;

    fn assert_valid(state: CornerState) {
        let cubies = state.cubies();
        assert_eq!(
            cubies.iter().map(|&(id, _)| id).sorted().collect_vec(),
            (0..8).collect_vec(),
            "{state}"
        );
        assert!(cubies.iter().all(|&(_, orientation)| orientation < 3), "{state}");
        let twist: u32 = cubies.iter().map(|&(_, orientation)| u32::from(orientation)).sum();
        assert_eq!(twist % 3, 0, "{state}");
        assert_eq!(state.raw() & !CORNER_STATE_MASK, 0);
    }

    #[test]
    fn test_solved_encoding() {
        assert_eq!(
            CornerState::SOLVED.raw(),
            0b1110_0110_0010_1001_0000_0110_0010_0000_1000_0000
        );
        for slot in 0..8 {
            assert_eq!(CornerState::SOLVED.cubie(slot), (slot as u8, 0));
        }
    }

    #[test]
    fn test_from_cubies() {
        let cubies = [(3, 1), (0, 2), (1, 0), (2, 0), (4, 0), (5, 0), (7, 0), (6, 0)];
        let state = CornerState::from_cubies(cubies);
        assert_eq!(state.cubies(), cubies);
        assert_eq!(
            CornerState::from_cubies(CornerState::SOLVED.cubies()),
            CornerState::SOLVED
        );
    }

    #[test]
    fn test_quarter_turns_round_trip() {
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..20 {
            let state = random_moves(30, &mut rng)
                .iter()
                .fold(CornerState::SOLVED, |state, &move_| state.apply(move_));
            for move_ in Move::ALL {
                assert_eq!(state.apply(move_).apply(move_.inverse()), state, "{move_}");
            }
        }
    }

    #[test]
    fn test_half_turn_is_two_quarter_turns() {
        let mut rng = fastrand::Rng::with_seed(2);
        for _ in 0..20 {
            let state = random_moves(30, &mut rng)
                .iter()
                .fold(CornerState::SOLVED, |state, &move_| state.apply(move_));
            for (clockwise, _, half) in Move::ALL.into_iter().tuples() {
                assert_eq!(state.apply(half), state.apply(clockwise).apply(clockwise));
            }
        }
    }

    #[test]
    fn test_moves_preserve_permutation_and_twist() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut state = CornerState::SOLVED;
        for move_ in random_moves(1000, &mut rng) {
            state = state.apply(move_);
            assert_valid(state);
        }
    }

    #[test]
    fn test_orange_and_red_do_not_twist() {
        for move_ in Move::ALL
            .into_iter()
            .filter(|move_| matches!(move_.face(), Face::Orange | Face::Red))
        {
            let state = CornerState::SOLVED.apply(move_);
            assert!(state.cubies().iter().all(|&(_, orientation)| orientation == 0), "{move_}");
        }
        let state = CornerState::SOLVED.apply(Move::Green90Cw);
        assert!(state.cubies().iter().any(|&(_, orientation)| orientation != 0));
    }

    #[test]
    fn test_counted_state() {
        let counted = CountedCornerState::new(CornerState::SOLVED)
            .apply(Move::White90Cw)
            .apply(Move::Blue180);
        assert_eq!(counted.move_count(), 2);
        assert_eq!(
            counted.state(),
            CornerState::SOLVED.apply(Move::White90Cw).apply(Move::Blue180)
        );
        assert_eq!(CountedCornerState::from_raw(counted.raw()), counted);
        assert_ne!(counted.raw(), counted.state().raw());
    }
}
