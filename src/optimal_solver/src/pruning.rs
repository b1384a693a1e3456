//! The corner pattern database.
//!
//! Every corner configuration reachable from solved is enumerated breadth
//! first and its distance from solved recorded. The corners alone never need
//! more moves than the whole cube, so the recorded distance is an admissible
//! heuristic for the full search.

use crate::{
    config::PruningTableConfig,
    puzzle::{CornerState, CountedCornerState, Move},
    start, success, working,
};
use discovery_set::DiscoverySet;
use distance_table::DistanceTable;
use log::{debug, info, warn};
use state_queue::StateQueue;
use std::time::Instant;
use thiserror::Error;

pub mod discovery_set;
pub mod distance_table;
pub mod state_queue;

/// The number of reachable corner configurations, 8! * 3^7.
pub const CORNER_STATE_COUNT: u64 = 88_179_840;

#[derive(Error, Debug)]
pub enum PruningTableError {
    #[error("The distance table is full ({capacity} entries); increase its capacity")]
    DistanceTableFull { capacity: usize },
}

/// Exact distances from solved for every corner configuration, or for every
/// configuration up to a depth limit.
pub struct CornerPatternDatabase {
    distances: DistanceTable,
    max_depth: u8,
    truncated: bool,
}

impl CornerPatternDatabase {
    /// Enumerate the corner configurations breadth first from solved.
    ///
    /// # Errors
    ///
    /// If the distance table fills up before the enumeration ends.
    pub fn generate(config: &PruningTableConfig) -> Result<Self, PruningTableError> {
        info!(start!("Generating the corner pattern database"));
        let start = Instant::now();

        let mut distances = DistanceTable::new(config.distance_table_capacity);
        let mut discovered = DiscoverySet::new(config.discovery_capacity);
        let mut frontier = StateQueue::new(config.queue_capacity);

        frontier.push(CountedCornerState::new(CornerState::SOLVED).raw());
        discovered.discover(CornerState::SOLVED.raw());

        let mut max_depth = 0;
        let mut truncated = false;
        let mut layer_start = Instant::now();
        debug!(working!("Enumerating depth {}..."), max_depth);

        while let Some(raw) = frontier.pop() {
            let counted = CountedCornerState::from_raw(raw);
            let depth = counted.move_count();
            if depth > max_depth {
                debug!(
                    working!("Recorded {} states in {:.3}s"),
                    distances.len(),
                    layer_start.elapsed().as_secs_f64()
                );
                max_depth = depth;
                layer_start = Instant::now();
                debug!(working!("Enumerating depth {}..."), depth);
            }

            if config.depth_limit.is_some_and(|limit| depth >= limit) {
                // Leaves are recorded but not expanded. The enumeration is
                // truncated only if some leaf has an unseen neighbor.
                if !truncated {
                    let state = counted.state();
                    truncated = Move::ALL
                        .into_iter()
                        .any(|move_| !discovered.is_discovered(state.apply(move_).raw()));
                }
            } else {
                for move_ in Move::ALL {
                    let next = counted.apply(move_);
                    let key = next.state().raw();
                    if !discovered.is_discovered(key) {
                        frontier.push(next.raw());
                        discovered.discover(key);
                    }
                }
            }

            distances.put(counted.state().raw(), depth)?;
        }

        if frontier.overwritten() > 0 {
            warn!(
                "The frontier overflowed and dropped {} states; the database is incomplete",
                frontier.overwritten()
            );
        }
        info!(
            success!("Recorded {} corner states up to depth {} in {:.3}s"),
            distances.len(),
            max_depth,
            start.elapsed().as_secs_f64()
        );

        Ok(Self {
            distances,
            max_depth,
            truncated,
        })
    }

    /// The recorded distance of `corners` from solved.
    pub fn distance(&self, corners: CornerState) -> Option<u8> {
        self.distances.get(corners.raw())
    }

    /// A lower bound on the number of moves needed to solve any cube whose
    /// corners are `corners`.
    ///
    /// States missing from a truncated database are known to lie beyond the
    /// depth limit. States missing from a complete one are treated as if they
    /// could be solved immediately.
    pub fn admissible_heuristic(&self, corners: CornerState) -> u8 {
        match self.distance(corners) {
            Some(distance) => distance,
            None if self.truncated => self.max_depth.saturating_add(1),
            None => 0,
        }
    }

    pub fn state_count(&self) -> usize {
        self.distances.len()
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// Generate the complete corner pattern database with the default sizing.
///
/// # Errors
///
/// See [`CornerPatternDatabase::generate`].
pub fn build_heuristic() -> Result<CornerPatternDatabase, PruningTableError> {
    CornerPatternDatabase::generate(&PruningTableConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn small_config(depth_limit: Option<u8>) -> PruningTableConfig {
        PruningTableConfig {
            distance_table_capacity: NonZeroUsize::new(100_003).unwrap(),
            discovery_capacity: NonZeroUsize::new(1_000_003).unwrap(),
            queue_capacity: NonZeroUsize::new(100_003).unwrap(),
            depth_limit,
        }
    }

    #[test]
    fn test_depth_zero() {
        let db = CornerPatternDatabase::generate(&small_config(Some(0))).unwrap();
        assert_eq!(db.state_count(), 1);
        assert_eq!(db.max_depth(), 0);
        assert!(db.is_truncated());
        assert_eq!(db.admissible_heuristic(CornerState::SOLVED), 0);
        assert_eq!(db.admissible_heuristic(CornerState::SOLVED.apply(Move::Red180)), 1);
    }

    #[test]
    fn test_layer_sizes() {
        let db = CornerPatternDatabase::generate(&small_config(Some(2))).unwrap();
        assert_eq!(db.state_count(), 1 + 18 + 243);
        assert_eq!(db.max_depth(), 2);
        assert!(db.is_truncated());
        for move_ in Move::ALL {
            let corners = CornerState::SOLVED.apply(move_);
            assert_eq!(db.distance(corners), Some(1), "{move_}");
        }
        let far = [Move::Orange90Cw, Move::Green90Cw, Move::White90Cw]
            .into_iter()
            .fold(CornerState::SOLVED, CornerState::apply);
        assert_eq!(db.distance(far), None);
        assert_eq!(db.admissible_heuristic(far), 3);
    }

    #[test]
    fn test_distance_table_overflow() {
        let config = PruningTableConfig {
            distance_table_capacity: NonZeroUsize::new(7).unwrap(),
            ..small_config(Some(1))
        };
        assert!(matches!(
            CornerPatternDatabase::generate(&config),
            Err(PruningTableError::DistanceTableFull { capacity: 7 })
        ));
    }
}
