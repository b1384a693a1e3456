use super::PruningTableError;
use crate::puzzle::corners::CORNER_STATE_MASK;
use std::num::NonZeroUsize;

const DISTANCE_SHIFT: u32 = 56;
/// An all-ones word. Its distance byte reads as `0xFF`, which no stored
/// distance uses, and its key bits overlap the unused middle bits a real entry
/// always leaves clear.
const EMPTY: u64 = u64::MAX;
const HASH_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

/// A fixed capacity open addressing map from packed corner states to their
/// distance from solved.
///
/// Each entry is one word: the key occupies the low 40 bits and the distance
/// the top byte. Collisions are resolved by linear probing. Entries are never
/// removed and the table never grows.
pub struct DistanceTable {
    entries: Box<[u64]>,
    len: usize,
}

impl DistanceTable {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: vec![EMPTY; capacity.get()].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// The number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn hash(&self, key: u64) -> usize {
        let key = key & CORNER_STATE_MASK;
        let rotated = ((key >> 2) | (key << 38)) & CORNER_STATE_MASK;
        (rotated.wrapping_mul(HASH_MULTIPLIER) % self.entries.len() as u64) as usize
    }

    /// Map `key` to `distance`, replacing any previous distance for the same
    /// key.
    ///
    /// # Errors
    ///
    /// If `key` is new and every slot is already taken.
    pub fn put(&mut self, key: u64, distance: u8) -> Result<(), PruningTableError> {
        debug_assert_ne!(distance, u8::MAX);
        let key = key & CORNER_STATE_MASK;
        let entry = key | (u64::from(distance) << DISTANCE_SHIFT);
        let capacity = self.entries.len();
        let mut index = self.hash(key);
        for _ in 0..capacity {
            let slot = &mut self.entries[index];
            if *slot == EMPTY {
                *slot = entry;
                self.len += 1;
                return Ok(());
            }
            if *slot & CORNER_STATE_MASK == key {
                *slot = entry;
                return Ok(());
            }
            index += 1;
            if index == capacity {
                index = 0;
            }
        }
        Err(PruningTableError::DistanceTableFull { capacity })
    }

    /// The distance stored for `key`, or `None` if it was never put.
    pub fn get(&self, key: u64) -> Option<u8> {
        let key = key & CORNER_STATE_MASK;
        let capacity = self.entries.len();
        let mut index = self.hash(key);
        for _ in 0..capacity {
            let entry = self.entries[index];
            if entry == EMPTY {
                return None;
            }
            if entry & CORNER_STATE_MASK == key {
                return Some((entry >> DISTANCE_SHIFT) as u8);
            }
            index += 1;
            if index == capacity {
                index = 0;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{CornerState, random_moves};

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_get_returns_last_put() {
        let mut table = DistanceTable::new(capacity(101));
        assert!(table.is_empty());
        table.put(CornerState::SOLVED.raw(), 0).unwrap();
        table.put(12345, 7).unwrap();
        table.put(12345, 3).unwrap();
        assert_eq!(table.get(CornerState::SOLVED.raw()), Some(0));
        assert_eq!(table.get(12345), Some(3));
        assert_eq!(table.get(54321), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_key_is_masked() {
        let mut table = DistanceTable::new(capacity(17));
        let state = CornerState::SOLVED.apply(crate::Move::Green90Cw);
        table.put(state.raw() | (5 << 56), 1).unwrap();
        assert_eq!(table.get(state.raw()), Some(1));
    }

    #[test]
    fn test_colliding_keys_probe() {
        // Eight keys in eight slots fill the table.
        let mut table = DistanceTable::new(capacity(8));
        let mut rng = fastrand::Rng::with_seed(3);
        let mut state = CornerState::SOLVED;
        let mut keys = vec![];
        while keys.len() < 8 {
            state = random_moves(5, &mut rng)
                .into_iter()
                .fold(state, CornerState::apply);
            if !keys.contains(&state.raw()) {
                keys.push(state.raw());
            }
        }
        for (distance, &key) in keys.iter().enumerate() {
            table.put(key, distance as u8).unwrap();
        }
        for (distance, &key) in keys.iter().enumerate() {
            assert_eq!(table.get(key), Some(distance as u8));
        }
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_full_table() {
        let mut table = DistanceTable::new(capacity(3));
        for key in 1..=3 {
            table.put(key, 1).unwrap();
        }
        table.put(2, 4).unwrap();
        assert_eq!(table.get(2), Some(4));
        assert!(matches!(
            table.put(4, 1),
            Err(PruningTableError::DistanceTableFull { capacity: 3 })
        ));
        assert_eq!(table.get(4), None);
    }
}
