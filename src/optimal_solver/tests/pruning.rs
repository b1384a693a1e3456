use fxhash::FxHashMap;
use optimal_solver::{
    CornerPatternDatabase, CornerState, Move, PruningTableConfig, build_heuristic,
    pruning::CORNER_STATE_COUNT,
};
use std::num::NonZeroUsize;

fn config(depth_limit: u8) -> PruningTableConfig {
    PruningTableConfig {
        distance_table_capacity: NonZeroUsize::new(1_000_003).unwrap(),
        discovery_capacity: NonZeroUsize::new(10_000_019).unwrap(),
        queue_capacity: NonZeroUsize::new(1_000_003).unwrap(),
        depth_limit: Some(depth_limit),
    }
}

/// Distances of every corner state up to `depth` moves from solved.
fn reference_distances(depth: u8) -> FxHashMap<CornerState, u8> {
    let mut distances = FxHashMap::default();
    distances.insert(CornerState::SOLVED, 0);
    let mut layer = vec![CornerState::SOLVED];
    for distance in 1..=depth {
        let mut next_layer = vec![];
        for state in layer {
            for move_ in Move::ALL {
                let next = state.apply(move_);
                distances.entry(next).or_insert_with(|| {
                    next_layer.push(next);
                    distance
                });
            }
        }
        layer = next_layer;
    }
    distances
}

#[test_log::test]
fn test_distances_match_reference_search() {
    let depth_limit = 5;
    let reference = reference_distances(depth_limit);
    let db = CornerPatternDatabase::generate(&config(depth_limit)).unwrap();

    assert_eq!(db.state_count(), reference.len());
    assert_eq!(db.max_depth(), depth_limit);
    assert!(db.is_truncated());
    for (&state, &distance) in &reference {
        assert_eq!(db.distance(state), Some(distance), "{state}");
        assert_eq!(db.admissible_heuristic(state), distance);
    }
}

#[test_log::test]
fn test_truncated_heuristic_stays_admissible() {
    let db = CornerPatternDatabase::generate(&config(3)).unwrap();
    let reference = reference_distances(5);
    for (&state, &distance) in &reference {
        assert!(db.admissible_heuristic(state) <= distance, "{state}");
        if distance > 3 {
            assert_eq!(db.admissible_heuristic(state), 4);
        }
    }
}

#[test_log::test]
#[ignore = "allocates about 2.5 GB and takes minutes"]
fn test_full_database() {
    let db = build_heuristic().unwrap();
    assert!(!db.is_truncated());
    assert!(db.state_count() as u64 > 88_100_000);
    assert!(db.state_count() as u64 <= CORNER_STATE_COUNT);
    assert_eq!(db.max_depth(), 11);
    assert_eq!(db.admissible_heuristic(CornerState::SOLVED), 0);
    for move_ in Move::ALL {
        assert_eq!(db.admissible_heuristic(CornerState::SOLVED.apply(move_)), 1);
    }
}
