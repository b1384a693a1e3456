use std::num::NonZeroUsize;

/// One of the independent hash functions, applied as rotate, xorshift, then
/// multiply.
#[derive(Copy, Clone)]
struct Mixer {
    rotate: u32,
    shift: u32,
    multiplier: u64,
}

impl Mixer {
    fn mix(self, key: u64) -> u64 {
        let key = key.rotate_left(self.rotate);
        (key ^ (key >> self.shift)).wrapping_mul(self.multiplier)
    }
}

const MIXERS: [Mixer; 6] = [
    Mixer { rotate: 0, shift: 31, multiplier: 0x9E37_79B9_7F4A_7C15 },
    Mixer { rotate: 7, shift: 27, multiplier: 0xBF58_476D_1CE4_E5B9 },
    Mixer { rotate: 13, shift: 33, multiplier: 0x94D0_49BB_1331_11EB },
    Mixer { rotate: 21, shift: 29, multiplier: 0xD6E8_FEB8_6659_FD93 },
    Mixer { rotate: 38, shift: 23, multiplier: 0xFF51_AFD7_ED55_8CCD },
    Mixer { rotate: 50, shift: 35, multiplier: 0xC4CE_B9FE_1A85_EC53 },
];

/// A probabilistic set of packed states made of six bit tables, each indexed
/// by its own hash of the key.
///
/// A key is discovered only if its bit is set in every table. Keys are never
/// reported as undiscovered after being discovered, but an undiscovered key may
/// be reported as discovered when all six of its bits were set by other keys.
pub struct DiscoverySet {
    tables: [Box<[u64]>; 6],
    capacity: u64,
}

impl DiscoverySet {
    /// Create a set whose tables each hold `capacity` bits.
    pub fn new(capacity: NonZeroUsize) -> Self {
        let words = capacity.get().div_ceil(64);
        Self {
            tables: std::array::from_fn(|_| vec![0; words].into_boxed_slice()),
            capacity: capacity.get() as u64,
        }
    }

    /// The word index and bit mask of `key` in the table hashed by `mixer`.
    fn locate(&self, mixer: Mixer, key: u64) -> (usize, u64) {
        let index = mixer.mix(key) % self.capacity;
        ((index / 64) as usize, 1 << (index % 64))
    }

    pub fn discover(&mut self, key: u64) {
        let locations = MIXERS.map(|mixer| self.locate(mixer, key));
        for (table, (word, bit)) in self.tables.iter_mut().zip(locations) {
            table[word] |= bit;
        }
    }

    pub fn is_discovered(&self, key: u64) -> bool {
        MIXERS.iter().zip(&self.tables).all(|(&mixer, table)| {
            let (word, bit) = self.locate(mixer, key);
            table[word] & bit != 0
        })
    }
}
